//! The raster collaborator: turns chart markup into a bitmap.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use image::imageops::FilterType;
use regex::Regex;
use reportly_layout::Bitmap;
use reportly_report::ChartTarget;
use serde::Deserialize;
use std::future::Future;
use std::sync::LazyLock;
use thiserror::Error;

static DATA_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"data:(image/[A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/=\s]+)")
        .expect("BUG: invalid DATA_URI_RE regex literal")
});

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RasterError {
    /// Nothing to draw; the pipeline substitutes the chart instead of failing.
    #[error("Chart markup carries no image data")]
    NoImageData,
    #[error("Chart image could not be decoded: {0}")]
    Decode(String),
    #[error("Unsupported chart image: {0}")]
    Unsupported(String),
}

/// Pixel size requested from the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl Default for RasterSize {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

/// Renders one chart to a bitmap. Implementations may be slow or remote;
/// the pipeline awaits each call before issuing the next.
pub trait Rasterizer {
    fn rasterize(
        &self,
        target: &ChartTarget,
        markup: &str,
        size: RasterSize,
    ) -> impl Future<Output = Result<Bitmap, RasterError>> + Send;
}

/// Rasterizes charts whose markup embeds a ready-made PNG or JPEG as a
/// base64 data URI, resizing it to the requested size.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedImageRasterizer;

impl Rasterizer for EmbeddedImageRasterizer {
    async fn rasterize(
        &self,
        target: &ChartTarget,
        markup: &str,
        size: RasterSize,
    ) -> Result<Bitmap, RasterError> {
        let bitmap = decode_embedded(markup, size)?;
        log::debug!(
            "Rasterized chart {} to {}x{}",
            target.element_id.as_deref().unwrap_or("<unnamed>"),
            bitmap.width,
            bitmap.height
        );
        Ok(bitmap)
    }
}

fn decode_embedded(markup: &str, size: RasterSize) -> Result<Bitmap, RasterError> {
    if size.width == 0 || size.height == 0 {
        return Err(RasterError::Unsupported(format!(
            "raster size {}x{}",
            size.width, size.height
        )));
    }

    let caps = DATA_URI_RE
        .captures(markup)
        .ok_or(RasterError::NoImageData)?;
    let format = match &caps[1] {
        "image/png" => ImageFormat::Png,
        "image/jpeg" | "image/jpg" => ImageFormat::Jpeg,
        other => return Err(RasterError::Unsupported(other.to_string())),
    };

    let encoded: String = caps[2].chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| RasterError::Decode(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| RasterError::Decode(e.to_string()))?;

    let rgb = decoded
        .resize_exact(size.width, size.height, FilterType::Triangle)
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Bitmap::new(width, height, rgb.into_raw()))
}
