use crate::BlockRenderError;
use crate::payload::ReportSource;
use reportly_layout::{Bitmap, ContentBlock};

pub const EXECUTIVE_SUMMARY: &str = "Executive Summary";
pub const KEY_INSIGHTS: &str = "Key Insights";
pub const CHART_UNAVAILABLE: &str = "[Chart unavailable]";

/// The outcome of rasterizing one chart, in chart order.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSlot {
    Rendered { bitmap: Bitmap, caption: String },
    Missing { caption: String, reason: BlockRenderError },
}

impl ChartSlot {
    pub fn caption(&self) -> &str {
        match self {
            ChartSlot::Rendered { caption, .. } | ChartSlot::Missing { caption, .. } => caption,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    /// Report title. When set, the report opens with the title and a
    /// "Generated on" line.
    pub title: Option<String>,
    /// Preformatted timestamp for the "Generated on" line.
    pub generated_on: Option<String>,
}

/// Turns a [`ReportSource`] and its rasterized charts into content blocks.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    options: ReportOptions,
}

impl ReportBuilder {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn build(&self, source: &ReportSource, charts: Vec<ChartSlot>) -> Vec<ContentBlock> {
        let mut blocks = Vec::with_capacity(4 + source.insights.len() + charts.len());

        if let Some(title) = self.options.title.as_deref().filter(|t| !t.trim().is_empty()) {
            blocks.push(ContentBlock::heading(title, 1));
            if let Some(stamp) = &self.options.generated_on {
                blocks.push(ContentBlock::paragraph(format!("Generated on {stamp}")));
            }
        }

        if !source.summary.is_empty() {
            blocks.push(ContentBlock::heading(EXECUTIVE_SUMMARY, 2));
            blocks.push(ContentBlock::paragraph(source.summary.clone()));
        }

        if !source.insights.is_empty() {
            blocks.push(ContentBlock::heading(KEY_INSIGHTS, 2));
            blocks.extend(source.insights.iter().map(ContentBlock::bullet));
        }

        for (i, slot) in charts.into_iter().enumerate() {
            let block = match chart_block(slot) {
                Ok(block) => block,
                Err((caption, reason)) => {
                    log::warn!("Chart {} replaced by its caption: {}", i, reason);
                    ContentBlock::paragraph(unavailable_text(&caption))
                }
            };
            blocks.push(block);
        }

        log::debug!("Built {} content blocks", blocks.len());
        blocks
    }
}

fn chart_block(slot: ChartSlot) -> Result<ContentBlock, (String, BlockRenderError)> {
    match slot {
        ChartSlot::Rendered { bitmap, caption } if bitmap.is_usable() => {
            Ok(ContentBlock::chart(bitmap, caption))
        }
        ChartSlot::Rendered { bitmap, caption } => {
            let reason = BlockRenderError::EmptyBitmap {
                width: bitmap.width,
                height: bitmap.height,
                len: bitmap.pixels.len(),
            };
            Err((caption, reason))
        }
        ChartSlot::Missing { caption, reason } => Err((caption, reason)),
    }
}

/// Text of the paragraph that stands in for a chart that could not be drawn.
pub fn unavailable_text(caption: &str) -> String {
    let caption = caption.trim();
    if caption.is_empty() {
        CHART_UNAVAILABLE.to_string()
    } else {
        format!("{CHART_UNAVAILABLE} {caption}")
    }
}
