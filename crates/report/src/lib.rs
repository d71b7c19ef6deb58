//! The report model: everything between a raw analysis payload and the
//! ordered content blocks handed to the paginator.
//!
//! - [`ReportSource`] normalizes an untrusted JSON payload.
//! - [`chart_target`] inspects chart markup for something to rasterize.
//! - [`ReportBuilder`] turns a source plus rasterized chart slots into blocks.
//! - [`Theme`] holds the color presets.
//! - [`Session`] is the per-user context an export reads from.

use thiserror::Error;

pub mod builder;
pub mod markup;
pub mod payload;
pub mod session;
pub mod theme;

pub use builder::{ChartSlot, ReportBuilder, ReportOptions};
pub use markup::{ChartTarget, chart_target};
pub use payload::{ChartSpec, ReportSource};
pub use session::{ExportTicket, Session, UploadedFile};
pub use theme::Theme;

/// A chart that cannot become an image block. Recovered locally by
/// substituting a caption-only paragraph; never escalated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockRenderError {
    #[error("Chart markup contains no element to rasterize")]
    MissingChartElement,
    #[error("Chart markup carries no image data")]
    NoImageData,
    #[error("Chart bitmap has no usable pixel data ({width}x{height}, {len} bytes)")]
    EmptyBitmap { width: u32, height: u32, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("An export is already running for this session")]
    ExportInProgress,
    #[error("No analysis result is available to export")]
    NoAnalysis,
}
