//! Block height measurement.
//!
//! The paginator never looks at fonts or pixels itself; it asks a
//! [`BlockMeasure`] for each block's height at the page's content width.

use crate::block::ContentBlock;
use crate::config::LayoutConfig;
use crate::style::{TextStyle, TypeScale};
use crate::text::wrap_text;
use reportly_types::Size;

pub trait BlockMeasure {
    /// Rendered height of `block` when laid out `content_width` wide.
    fn measure(&self, block: &ContentBlock, content_width: f32) -> f32;

    /// Height of `block` when it may be scaled down to fit `max_height`.
    /// Blocks that cannot shrink report their natural height.
    fn measure_within(&self, block: &ContentBlock, content_width: f32, max_height: f32) -> f32 {
        let _ = max_height;
        self.measure(block, content_width)
    }
}

impl<M: BlockMeasure + ?Sized> BlockMeasure for &M {
    fn measure(&self, block: &ContentBlock, content_width: f32) -> f32 {
        (**self).measure(block, content_width)
    }

    fn measure_within(&self, block: &ContentBlock, content_width: f32, max_height: f32) -> f32 {
        (**self).measure_within(block, content_width, max_height)
    }
}

/// A block broken into drawable lines (text) or an image box plus caption lines (charts).
#[derive(Debug, Clone, PartialEq)]
pub enum BlockLines {
    Text {
        style: TextStyle,
        /// Left indent of the wrapped text relative to the content box.
        indent: f32,
        lines: Vec<String>,
    },
    Chart {
        image: Size,
        caption_style: TextStyle,
        caption_gap: f32,
        caption: Vec<String>,
    },
}

impl BlockLines {
    pub fn height(&self) -> f32 {
        match self {
            BlockLines::Text { style, lines, .. } => lines.len() as f32 * style.line_height,
            BlockLines::Chart {
                image,
                caption_style,
                caption_gap,
                caption,
            } => image.height + caption_block_height(caption, caption_style, *caption_gap),
        }
    }
}

fn caption_block_height(caption: &[String], style: &TextStyle, gap: f32) -> f32 {
    if caption.is_empty() {
        0.0
    } else {
        gap + caption.len() as f32 * style.line_height
    }
}

/// Measures blocks with the Helvetica metric tables.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMeasure {
    scale: TypeScale,
    bullet_indent: f32,
    image_to_caption: f32,
}

impl TextMeasure {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            scale: config.type_scale.clone(),
            bullet_indent: config.bullet_indent,
            image_to_caption: config.spacing.image_to_caption,
        }
    }

    pub fn type_scale(&self) -> &TypeScale {
        &self.scale
    }

    pub fn lay_out(&self, block: &ContentBlock, content_width: f32) -> BlockLines {
        self.lay_out_within(block, content_width, f32::INFINITY)
    }

    /// Like [`lay_out`](Self::lay_out), but shrinks a chart image so the whole
    /// chart fits in `max_height` when it would otherwise be taller.
    pub fn lay_out_within(&self, block: &ContentBlock, content_width: f32, max_height: f32) -> BlockLines {
        match block {
            ContentBlock::Heading { text, level } => {
                let style = self.scale.heading_level(*level);
                BlockLines::Text {
                    style,
                    indent: 0.0,
                    lines: wrap_text(text, &style, content_width),
                }
            }
            ContentBlock::Paragraph { text } => BlockLines::Text {
                style: self.scale.body,
                indent: 0.0,
                lines: wrap_text(text, &self.scale.body, content_width),
            },
            ContentBlock::BulletItem { text } => {
                let indent = self.bullet_indent.min(content_width / 2.0);
                BlockLines::Text {
                    style: self.scale.body,
                    indent,
                    lines: wrap_text(text, &self.scale.body, content_width - indent),
                }
            }
            ContentBlock::ChartImage { bitmap, caption } => {
                let caption_style = self.scale.caption;
                let caption = wrap_text(caption, &caption_style, content_width);
                let caption_height = caption_block_height(&caption, &caption_style, self.image_to_caption);
                let natural = bitmap.size().fit_width(content_width);
                let image = if natural.height + caption_height > max_height {
                    let available = (max_height - caption_height).max(0.0);
                    natural.fit_within(Size::new(content_width, available))
                } else {
                    natural
                };
                BlockLines::Chart {
                    image,
                    caption_style,
                    caption_gap: self.image_to_caption,
                    caption,
                }
            }
        }
    }
}

impl Default for TextMeasure {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl BlockMeasure for TextMeasure {
    fn measure(&self, block: &ContentBlock, content_width: f32) -> f32 {
        self.lay_out(block, content_width).height()
    }

    fn measure_within(&self, block: &ContentBlock, content_width: f32, max_height: f32) -> f32 {
        self.lay_out_within(block, content_width, max_height).height()
    }
}
