//! Output types from the paginator.

use crate::block::ContentBlock;
use crate::page::PageGeometry;

/// A block positioned on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    /// Position of the block in the paginator's input sequence.
    pub index: usize,
    pub block: ContentBlock,
    /// Offset of the block's top edge from the top of the page.
    pub y: f32,
    pub height: f32,
}

impl PlacedBlock {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub blocks: Vec<PlacedBlock>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Vertical extent used on the page: block heights plus the gaps between them.
    pub fn used_height(&self, geometry: &PageGeometry) -> f32 {
        self.blocks
            .last()
            .map(|last| last.bottom() - geometry.margin)
            .unwrap_or(0.0)
    }
}

/// A finished, paginated report. Built once per export and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }

    /// Index of the page holding the input block `index`.
    pub fn page_of(&self, index: usize) -> Option<usize> {
        self.pages
            .iter()
            .position(|p| p.blocks.iter().any(|b| b.index == index))
    }
}
