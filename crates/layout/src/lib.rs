use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error(
        "Invalid page geometry: content area is {content_width:.2} x {content_height:.2}, both dimensions must be positive."
    )]
    InvalidGeometry {
        content_width: f32,
        content_height: f32,
    },
    #[error("Invalid page geometry: margin {margin:.2} is negative.")]
    NegativeMargin { margin: f32 },
}

pub mod algorithms;
pub mod block;
pub mod config;
pub mod engine;
pub mod fonts;
pub mod measure;
pub mod output;
pub mod page;
pub mod style;
pub mod text;

pub use self::block::{Bitmap, BlockKind, ContentBlock};
pub use self::config::{LayoutConfig, OversizePolicy, SpacingRules};
pub use self::engine::Paginator;
pub use self::fonts::FontFace;
pub use self::measure::{BlockMeasure, TextMeasure};
pub use self::output::{Document, Page, PlacedBlock};
pub use self::page::PageGeometry;
pub use self::style::{TextStyle, TypeScale};

// Re-export geometry types so downstream crates see a single definition
pub use reportly_types::geometry::{Rect, Size};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
