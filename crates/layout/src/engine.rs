//! The greedy page-filling engine.

use crate::algorithms::pagination::{EPSILON, check_fit, keep_with_next_end};
use crate::block::{BlockKind, ContentBlock};
use crate::config::{LayoutConfig, OversizePolicy, SpacingRules};
use crate::measure::{BlockMeasure, TextMeasure};
use crate::output::{Document, Page, PlacedBlock};
use crate::page::PageGeometry;
use crate::LayoutError;

/// Places content blocks onto fixed-size pages.
///
/// Single pass, no backtracking: each block goes on the current page if it
/// fits below the cursor, otherwise a new page is started. Blocks are never
/// split. A heading is pushed to the next page together with the block it
/// introduces, and a block taller than the content area gets a page of its own.
#[derive(Debug, Clone)]
pub struct Paginator<M = TextMeasure> {
    config: LayoutConfig,
    measure: M,
}

impl Paginator<TextMeasure> {
    pub fn new(config: LayoutConfig) -> Self {
        let measure = TextMeasure::new(&config);
        Self { config, measure }
    }
}

impl Default for Paginator<TextMeasure> {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl<M: BlockMeasure> Paginator<M> {
    pub fn with_measure(config: LayoutConfig, measure: M) -> Self {
        Self { config, measure }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn measure(&self) -> &M {
        &self.measure
    }

    pub fn paginate(
        &self,
        blocks: &[ContentBlock],
        geometry: &PageGeometry,
    ) -> Result<Document, LayoutError> {
        geometry.validate()?;

        let spacing = &self.config.spacing;
        let max_content = geometry.max_content_height();
        let max_y = geometry.max_y();
        let heights: Vec<f32> = blocks
            .iter()
            .map(|b| self.block_height(b, geometry))
            .collect();

        let mut pages = Vec::new();
        let mut current = PageCursor::new(geometry.margin);

        for (index, block) in blocks.iter().enumerate() {
            let height = heights[index];
            let oversized = height > max_content + EPSILON;
            let gap = current.gap_before(block.kind(), spacing);

            let mut should_break = !current.is_empty()
                && (oversized || check_fit(current.cursor_y, gap + height, max_y).should_break);

            if !should_break && !current.is_empty() && block.is_heading() {
                if let Some(end) = keep_with_next_end(blocks, index) {
                    let group = group_height(blocks, &heights, index, end, spacing);
                    // Only worth a break if the group can share a fresh page.
                    if group <= max_content + EPSILON
                        && check_fit(current.cursor_y, gap + group, max_y).should_break
                    {
                        log::debug!(
                            "Moving heading {} to a new page to keep it with block {}",
                            index,
                            end - 1
                        );
                        should_break = true;
                    }
                }
            }

            if should_break {
                pages.push(current.finish_page());
            }

            let gap = current.gap_before(block.kind(), spacing);
            current.place(index, block.clone(), gap, height);

            if oversized {
                log::debug!(
                    "Block {} is {:.2}pt tall, more than the {:.2}pt content area; placed alone",
                    index,
                    height,
                    max_content
                );
                pages.push(current.finish_page());
            }
        }

        if !current.is_empty() {
            pages.push(current.finish_page());
        }

        log::debug!("Paginated {} blocks onto {} pages", blocks.len(), pages.len());

        Ok(Document {
            geometry: *geometry,
            pages,
        })
    }

    fn block_height(&self, block: &ContentBlock, geometry: &PageGeometry) -> f32 {
        let width = geometry.content_width();
        let height = match (self.config.oversize, block) {
            (OversizePolicy::ShrinkToFit, ContentBlock::ChartImage { .. }) => {
                self.measure
                    .measure_within(block, width, geometry.max_content_height())
            }
            _ => self.measure.measure(block, width),
        };
        height.max(0.0)
    }
}

/// Total height of `blocks[start..end]` stacked with their gaps.
fn group_height(
    blocks: &[ContentBlock],
    heights: &[f32],
    start: usize,
    end: usize,
    spacing: &SpacingRules,
) -> f32 {
    let mut total = heights[start];
    for i in start + 1..end {
        total += spacing.between(blocks[i - 1].kind(), blocks[i].kind()) + heights[i];
    }
    total
}

struct PageCursor {
    page: Page,
    top: f32,
    cursor_y: f32,
}

impl PageCursor {
    fn new(top: f32) -> Self {
        Self {
            page: Page::default(),
            top,
            cursor_y: top,
        }
    }

    fn is_empty(&self) -> bool {
        self.page.is_empty()
    }

    fn gap_before(&self, next: BlockKind, spacing: &SpacingRules) -> f32 {
        self.page
            .blocks
            .last()
            .map(|prev| spacing.between(prev.block.kind(), next))
            .unwrap_or(0.0)
    }

    fn place(&mut self, index: usize, block: ContentBlock, gap: f32, height: f32) {
        let y = self.cursor_y + gap;
        self.page.blocks.push(PlacedBlock {
            index,
            block,
            y,
            height,
        });
        self.cursor_y = y + height;
    }

    fn finish_page(&mut self) -> Page {
        self.cursor_y = self.top;
        std::mem::take(&mut self.page)
    }
}
