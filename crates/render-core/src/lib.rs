//! Core rendering abstractions for report export.
//!
//! This crate sits between the paginated [`Document`](reportly_layout::Document)
//! and a concrete output format:
//! - `DocumentRenderer` trait, the draw-instruction interface backends implement
//! - `DrawCommand` and friends, positioned in top-down page coordinates
//! - `paint_document`, which turns placed blocks into draw calls
//! - `RecordingRenderer`, a backend that just keeps the instruction stream

mod error;
mod paint;
mod recording;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use paint::{BULLET_MARKER, paint_document};
pub use recording::{RecordedPage, RecordingRenderer};
pub use traits::DocumentRenderer;
pub use types::{DrawCommand, ImagePlacement, LineSegment, Palette, TextRun};
