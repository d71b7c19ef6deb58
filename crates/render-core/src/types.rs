use reportly_layout::{Bitmap, FontFace};
use reportly_types::{Color, Rect};

/// One line of text. Coordinates are in points from the page's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    /// Baseline position, measured from the page top.
    pub baseline: f32,
    pub text: String,
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
}

/// A bitmap scaled into `rect` (top-left origin).
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    pub rect: Rect,
    pub bitmap: Bitmap,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text(TextRun),
    Image(ImagePlacement),
    Line(LineSegment),
}

/// Colors the painter assigns to each part of a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub heading: Color,
    pub body: Color,
    pub bullet: Color,
    pub caption: Color,
    pub rule: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            heading: Color::BLACK,
            body: Color::BLACK,
            bullet: Color::BLACK,
            caption: Color::gray(80),
            rule: Color::gray(200),
        }
    }
}
