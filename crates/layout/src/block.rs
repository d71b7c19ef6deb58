//! Typed report content.
//!
//! A report is an ordered sequence of [`ContentBlock`]s. Blocks are immutable
//! once built; chart pixel buffers are shared so cloning a block is cheap.

use reportly_types::Size;
use std::fmt;
use std::sync::Arc;

/// A raster image in packed 8-bit RGB, row-major, no padding.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl Bitmap {
    pub const CHANNELS: usize = 3;

    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// A bitmap is usable when it has a non-zero size and a pixel buffer that
    /// matches its dimensions.
    pub fn is_usable(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.pixels.len() == self.width as usize * self.height as usize * Self::CHANNELS
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels_len", &self.pixels.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Heading { text: String, level: u8 },
    Paragraph { text: String },
    BulletItem { text: String },
    /// A chart and its caption, laid out as one unit.
    ChartImage { bitmap: Bitmap, caption: String },
}

/// The variant of a block without its payload, used by spacing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Paragraph,
    BulletItem,
    ChartImage,
}

impl ContentBlock {
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        ContentBlock::Heading {
            text: text.into(),
            level,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph { text: text.into() }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        ContentBlock::BulletItem { text: text.into() }
    }

    pub fn chart(bitmap: Bitmap, caption: impl Into<String>) -> Self {
        ContentBlock::ChartImage {
            bitmap,
            caption: caption.into(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Heading { .. } => BlockKind::Heading,
            ContentBlock::Paragraph { .. } => BlockKind::Paragraph,
            ContentBlock::BulletItem { .. } => BlockKind::BulletItem,
            ContentBlock::ChartImage { .. } => BlockKind::ChartImage,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.kind() == BlockKind::Heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_usability_checks_buffer_length() {
        assert!(Bitmap::new(2, 2, vec![0u8; 12]).is_usable());
        assert!(!Bitmap::new(2, 2, vec![0u8; 11]).is_usable());
        assert!(!Bitmap::new(0, 2, Vec::<u8>::new()).is_usable());
    }

    #[test]
    fn cloned_chart_shares_pixels() {
        let block = ContentBlock::chart(Bitmap::new(1, 1, vec![1u8, 2, 3]), "Revenue");
        let copy = block.clone();
        let (ContentBlock::ChartImage { bitmap: a, .. }, ContentBlock::ChartImage { bitmap: b, .. }) =
            (&block, &copy)
        else {
            panic!("expected chart blocks");
        };
        assert!(Arc::ptr_eq(&a.pixels, &b.pixels));
        assert_eq!(copy.kind(), BlockKind::ChartImage);
    }
}
