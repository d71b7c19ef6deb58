//! Paginated PDF export for AI-generated data analysis reports.
//!
//! ```no_run
//! # async fn run() -> Result<(), reportly::PipelineError> {
//! use reportly::{ExportPipelineBuilder, ReportSource};
//!
//! let payload = std::fs::read_to_string("analysis.json")?;
//! let source = ReportSource::from_json(&payload)?;
//! let pipeline = ExportPipelineBuilder::new().with_theme("minimal").build()?;
//! let path = pipeline.export_to_dir(&source, std::path::Path::new("out")).await?;
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod raster;

pub use config::{ExportConfig, OUTPUT_FILE_NAME};
pub use error::PipelineError;
pub use pipeline::{ExportPipeline, ExportPipelineBuilder};
pub use raster::{EmbeddedImageRasterizer, RasterError, RasterSize, Rasterizer};

pub use reportly_layout::{ContentBlock, Document, LayoutConfig, OversizePolicy, PageGeometry};
pub use reportly_report::{ChartTarget, ReportSource, Session, Theme};
