pub mod fixtures;

use lopdf::Document as LopdfDocument;
use reportly::{ChartTarget, RasterError, RasterSize, Rasterizer};
use reportly_layout::Bitmap;
use reportly_render_core::{DrawCommand, RecordedPage};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }
}

/// All text runs of a recorded page, in drawing order.
pub fn page_texts(page: &RecordedPage) -> Vec<String> {
    page.commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text(run) => Some(run.text.clone()),
            _ => None,
        })
        .collect()
}

pub fn image_count(page: &RecordedPage) -> usize {
    page.commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Image(_)))
        .count()
}

/// Returns a solid bitmap of the requested size and records every request.
#[derive(Default)]
pub struct SolidRasterizer {
    pub requests: Mutex<Vec<Option<String>>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl Rasterizer for SolidRasterizer {
    async fn rasterize(
        &self,
        target: &ChartTarget,
        _markup: &str,
        size: RasterSize,
    ) -> Result<Bitmap, RasterError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(target.element_id.clone());
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let len = size.width as usize * size.height as usize * Bitmap::CHANNELS;
        Ok(Bitmap::new(size.width, size.height, vec![180u8; len]))
    }
}

impl Rasterizer for &SolidRasterizer {
    fn rasterize(
        &self,
        target: &ChartTarget,
        markup: &str,
        size: RasterSize,
    ) -> impl Future<Output = Result<Bitmap, RasterError>> + Send {
        (**self).rasterize(target, markup, size)
    }
}

/// A raster service that is down.
pub struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    async fn rasterize(
        &self,
        _target: &ChartTarget,
        _markup: &str,
        _size: RasterSize,
    ) -> Result<Bitmap, RasterError> {
        Err(RasterError::Decode("raster service unavailable".into()))
    }
}
