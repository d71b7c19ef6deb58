use crate::algorithms::pagination::{EPSILON, keep_with_next_end};
use crate::block::{Bitmap, ContentBlock};
use crate::config::SpacingRules;
use crate::measure::BlockMeasure;
use crate::output::Document;
use std::collections::HashMap;

/// A measure with hand-picked heights, keyed by block text (or chart caption).
#[derive(Debug, Clone, Default)]
pub struct FixedMeasure {
    default: f32,
    heights: HashMap<String, f32>,
}

impl FixedMeasure {
    pub fn new(default: f32) -> Self {
        Self {
            default,
            heights: HashMap::new(),
        }
    }

    pub fn with(mut self, key: &str, height: f32) -> Self {
        self.heights.insert(key.to_string(), height);
        self
    }
}

impl BlockMeasure for FixedMeasure {
    fn measure(&self, block: &ContentBlock, _content_width: f32) -> f32 {
        let key = match block {
            ContentBlock::Heading { text, .. }
            | ContentBlock::Paragraph { text }
            | ContentBlock::BulletItem { text } => text,
            ContentBlock::ChartImage { caption, .. } => caption,
        };
        self.heights.get(key).copied().unwrap_or(self.default)
    }
}

pub fn heading(text: &str) -> ContentBlock {
    ContentBlock::heading(text, 2)
}

pub fn paragraph(text: &str) -> ContentBlock {
    ContentBlock::paragraph(text)
}

pub fn bullet(text: &str) -> ContentBlock {
    ContentBlock::bullet(text)
}

/// A chart with a 1x1 placeholder bitmap; use with [`FixedMeasure`].
pub fn chart(caption: &str) -> ContentBlock {
    ContentBlock::chart(Bitmap::new(1, 1, vec![255u8; 3]), caption)
}

pub fn real_chart(width: u32, height: u32, caption: &str) -> ContentBlock {
    let pixels = vec![200u8; width as usize * height as usize * Bitmap::CHANNELS];
    ContentBlock::chart(Bitmap::new(width, height, pixels), caption)
}

pub fn page_indices(doc: &Document) -> Vec<Vec<usize>> {
    doc.pages
        .iter()
        .map(|p| p.blocks.iter().map(|b| b.index).collect())
        .collect()
}

/// Checks the structural guarantees every paginated document must satisfy.
pub fn assert_document_invariants<M: BlockMeasure>(
    doc: &Document,
    blocks: &[ContentBlock],
    measure: &M,
    spacing: &SpacingRules,
) {
    let geometry = &doc.geometry;
    let max_content = geometry.max_content_height();
    let width = geometry.content_width();

    // Every block exactly once, in input order.
    let flat: Vec<usize> = page_indices(doc).into_iter().flatten().collect();
    assert_eq!(flat, (0..blocks.len()).collect::<Vec<_>>());

    for (page_no, page) in doc.pages.iter().enumerate() {
        assert!(!page.is_empty(), "page {page_no} is empty");
        assert_eq!(page.blocks[0].y, geometry.margin, "page {page_no} does not start at the margin");

        for pair in page.blocks.windows(2) {
            let gap = spacing.between(pair[0].block.kind(), pair[1].block.kind());
            assert!((pair[1].y - (pair[0].bottom() + gap)).abs() < 1e-3);
        }

        if page.blocks.len() > 1 {
            assert!(
                page.used_height(geometry) <= max_content + EPSILON,
                "page {page_no} overflows: {} > {}",
                page.used_height(geometry),
                max_content
            );
        }

        let is_last_page = page_no + 1 == doc.pages.len();
        if let Some(last) = page.blocks.last().filter(|_| !is_last_page) {
            if last.block.is_heading() {
                let end = keep_with_next_end(blocks, last.index)
                    .expect("a heading on a non-terminal page has a following block");
                let mut group = measure.measure(&blocks[last.index], width);
                for i in last.index + 1..end {
                    group += spacing.between(blocks[i - 1].kind(), blocks[i].kind())
                        + measure.measure(&blocks[i], width);
                }
                assert!(
                    group > max_content + EPSILON,
                    "heading {} ends page {page_no} but its group fits on one page",
                    last.index
                );
            }
        }
    }
}
