use crate::fonts::FontFace;
use serde::Deserialize;

/// A resolved font face, size and line height (points) for one kind of text.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub line_height: f32,
}

impl TextStyle {
    /// Line height is 1.4x the font size.
    pub fn new(face: FontFace, size: f32) -> Self {
        Self {
            face,
            size,
            line_height: size * 1.4,
        }
    }

    /// Offset of the first baseline below the top of a line box.
    pub fn ascent(&self) -> f32 {
        (self.line_height - self.size) / 2.0 + self.size * 0.8
    }
}

/// Text styles for every block kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeScale {
    pub title: TextStyle,
    pub heading: TextStyle,
    pub subheading: TextStyle,
    pub body: TextStyle,
    pub caption: TextStyle,
}

impl Default for TypeScale {
    fn default() -> Self {
        Self {
            title: TextStyle::new(FontFace::Bold, 22.0),
            heading: TextStyle::new(FontFace::Bold, 14.0),
            subheading: TextStyle::new(FontFace::Bold, 12.0),
            body: TextStyle::new(FontFace::Regular, 11.0),
            caption: TextStyle::new(FontFace::Oblique, 10.0),
        }
    }
}

impl TypeScale {
    pub fn heading_level(&self, level: u8) -> TextStyle {
        match level {
            0 | 1 => self.title,
            2 => self.heading,
            _ => self.subheading,
        }
    }
}
