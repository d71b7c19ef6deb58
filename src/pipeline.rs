//! Export orchestration: rasterize charts, build blocks, paginate, render, write.

use crate::config::ExportConfig;
use crate::error::PipelineError;
use crate::raster::{EmbeddedImageRasterizer, RasterError, Rasterizer};
use log::{debug, info, warn};
use reportly_layout::{Document, PageGeometry, Paginator};
use reportly_render_core::{DocumentRenderer, paint_document};
use reportly_render_lopdf::LopdfRenderer;
use reportly_report::{
    BlockRenderError, ChartSlot, ReportBuilder, ReportOptions, ReportSource, Session, Theme,
    chart_target,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A builder for creating an `ExportPipeline`.
pub struct ExportPipelineBuilder<R = EmbeddedImageRasterizer> {
    config: ExportConfig,
    rasterizer: R,
}

impl Default for ExportPipelineBuilder {
    fn default() -> Self {
        Self {
            config: ExportConfig::default(),
            rasterizer: EmbeddedImageRasterizer,
        }
    }
}

impl ExportPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: Rasterizer> ExportPipelineBuilder<R> {
    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Selects a theme preset by name.
    pub fn with_theme(mut self, name: &str) -> Self {
        self.config.theme = name.to_string();
        self
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.config.geometry = geometry;
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.config.title = title;
        self
    }

    /// Swaps the chart rasterizer, e.g. for a headless browser service.
    pub fn with_rasterizer<R2: Rasterizer>(self, rasterizer: R2) -> ExportPipelineBuilder<R2> {
        ExportPipelineBuilder {
            config: self.config,
            rasterizer,
        }
    }

    /// Validates the configuration and creates the `ExportPipeline`.
    pub fn build(self) -> Result<ExportPipeline<R>, PipelineError> {
        self.config.validate()?;
        let theme = self.config.theme();
        let paginator = Paginator::new(self.config.layout.clone());
        Ok(ExportPipeline {
            config: self.config,
            theme,
            paginator,
            rasterizer: self.rasterizer,
        })
    }
}

/// Turns a report source into a paginated PDF.
pub struct ExportPipeline<R = EmbeddedImageRasterizer> {
    config: ExportConfig,
    theme: Theme,
    paginator: Paginator,
    rasterizer: R,
}

impl<R: Rasterizer> ExportPipeline<R> {
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Rasterizes every chart in order, one request at a time.
    ///
    /// Charts without a plot element, or whose markup holds no image, become
    /// `Missing` slots. Any other raster failure aborts the whole export.
    pub async fn rasterize_charts(&self, source: &ReportSource) -> Result<Vec<ChartSlot>, PipelineError> {
        let mut slots = Vec::with_capacity(source.charts.len());
        for (i, chart) in source.charts.iter().enumerate() {
            let Some(target) = chart_target(&chart.markup) else {
                warn!("Chart {} has no element to rasterize", i);
                slots.push(ChartSlot::Missing {
                    caption: chart.caption.clone(),
                    reason: BlockRenderError::MissingChartElement,
                });
                continue;
            };

            debug!("Rasterizing chart {} ({:?})", i, target.element_id);
            let slot = match self
                .rasterizer
                .rasterize(&target, &chart.markup, self.config.raster)
                .await
            {
                Ok(bitmap) => ChartSlot::Rendered {
                    bitmap,
                    caption: chart.caption.clone(),
                },
                Err(RasterError::NoImageData) => {
                    warn!("Chart {} has no image data", i);
                    ChartSlot::Missing {
                        caption: chart.caption.clone(),
                        reason: BlockRenderError::NoImageData,
                    }
                }
                Err(e) => {
                    return Err(PipelineError::ExternalService(format!("chart {}: {}", i, e)));
                }
            };
            slots.push(slot);
        }
        Ok(slots)
    }

    /// Rasterizes, builds and paginates, without rendering.
    pub async fn layout(&self, source: &ReportSource) -> Result<Document, PipelineError> {
        // Fail on bad geometry before any raster request goes out.
        self.config.geometry.validate()?;

        let slots = self.rasterize_charts(source).await?;
        let blocks = ReportBuilder::new(self.report_options()).build(source, slots);
        let document = self.paginator.paginate(&blocks, &self.config.geometry)?;
        info!(
            "Laid out {} blocks on {} pages",
            document.block_count(),
            document.page_count()
        );
        Ok(document)
    }

    /// Produces the PDF bytes for `source`.
    pub async fn export(&self, source: &ReportSource) -> Result<Vec<u8>, PipelineError> {
        let mut renderer = LopdfRenderer::new();
        if let Some(title) = &self.config.title {
            renderer = renderer.with_title(title.clone());
        }
        self.export_with(source, Box::new(renderer)).await
    }

    /// Like [`export`](Self::export), drawing onto a caller-supplied renderer.
    pub async fn export_with(
        &self,
        source: &ReportSource,
        mut renderer: Box<dyn DocumentRenderer + Send>,
    ) -> Result<Vec<u8>, PipelineError> {
        let start = Instant::now();
        let document = self.layout(source).await?;
        paint_document(
            &document,
            self.paginator.measure(),
            &self.theme.palette,
            renderer.as_mut(),
        )?;
        let bytes = renderer.finish()?;
        info!(
            "Rendered {} pages ({} bytes) in {:.2?}",
            document.page_count(),
            bytes.len(),
            start.elapsed()
        );
        Ok(bytes)
    }

    /// Exports into `dir` under the configured file name and returns the path.
    ///
    /// The file only appears once the whole PDF has been produced; a failed
    /// export leaves nothing behind.
    pub async fn export_to_dir(&self, source: &ReportSource, dir: &Path) -> Result<PathBuf, PipelineError> {
        let bytes = self.export(source).await?;
        tokio::fs::create_dir_all(dir).await?;

        let dir = dir.to_path_buf();
        let name = self.config.output_file_name.clone();
        let path = tokio::task::spawn_blocking(move || write_atomically(&dir, &name, &bytes))
            .await
            .map_err(io::Error::other)??;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Exports the session's current analysis, holding its export slot
    /// for the duration.
    pub async fn export_session(&self, session: &Session, dir: &Path) -> Result<PathBuf, PipelineError> {
        let _ticket = session.try_begin_export()?;
        let source = session.snapshot()?;
        self.export_to_dir(&source, dir).await
    }

    fn report_options(&self) -> ReportOptions {
        let title = self.config.title.clone().filter(|t| !t.trim().is_empty());
        let generated_on = title
            .as_ref()
            .map(|_| chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        ReportOptions {
            title,
            generated_on,
        }
    }
}

fn write_atomically(dir: &Path, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    let path = dir.join(name);
    file.persist(&path).map_err(|e| e.error)?;
    Ok(path)
}
