//! Turns a paginated document into draw calls.

use crate::error::RenderError;
use crate::traits::DocumentRenderer;
use crate::types::{DrawCommand, ImagePlacement, LineSegment, Palette, TextRun};
use reportly_layout::measure::BlockLines;
use reportly_layout::{ContentBlock, Document, PageGeometry, PlacedBlock, TextMeasure, TextStyle};
use reportly_types::{Color, Rect};

pub const BULLET_MARKER: &str = "•";

const RULE_WIDTH: f32 = 0.75;
// Slack so a chart placed at its natural height is never re-shrunk by rounding.
const FIT_SLACK: f32 = 0.01;

/// Paints every page of `document` onto `renderer`, blocks in placement order.
///
/// Blocks are laid out again with `measure`, which must be the one the
/// document was paginated with, so line breaks match the placed heights.
/// The caller finishes the renderer.
pub fn paint_document(
    document: &Document,
    measure: &TextMeasure,
    palette: &Palette,
    renderer: &mut dyn DocumentRenderer,
) -> Result<(), RenderError> {
    let geometry = &document.geometry;
    renderer.begin_document()?;

    for (page_no, page) in document.pages.iter().enumerate() {
        renderer.begin_page(geometry.width, geometry.height)?;
        let painter = BlockPainter {
            geometry,
            measure,
            palette,
        };
        for placed in &page.blocks {
            for command in painter.paint(placed) {
                renderer.draw(command)?;
            }
        }
        renderer.end_page()?;
        log::debug!("Painted page {} ({} blocks)", page_no + 1, page.blocks.len());
    }
    Ok(())
}

struct BlockPainter<'a> {
    geometry: &'a PageGeometry,
    measure: &'a TextMeasure,
    palette: &'a Palette,
}

impl BlockPainter<'_> {
    fn paint(&self, placed: &PlacedBlock) -> Vec<DrawCommand> {
        let width = self.geometry.content_width();
        let left = self.geometry.margin;
        let lines = self
            .measure
            .lay_out_within(&placed.block, width, placed.height + FIT_SLACK);

        let mut commands = Vec::new();
        match (&placed.block, lines) {
            (ContentBlock::ChartImage { bitmap, .. }, BlockLines::Chart { image, caption_style, caption_gap, caption }) => {
                let x = left + (width - image.width) / 2.0;
                commands.push(DrawCommand::Image(ImagePlacement {
                    rect: Rect::new(x, placed.y, image.width, image.height),
                    bitmap: bitmap.clone(),
                }));
                let top = placed.y + image.height + caption_gap;
                push_lines(&mut commands, &caption, &caption_style, left, top, self.palette.caption);
            }
            (block, BlockLines::Text { style, indent, lines }) => {
                let color = match block {
                    ContentBlock::Heading { .. } => self.palette.heading,
                    _ => self.palette.body,
                };
                if matches!(block, ContentBlock::BulletItem { .. }) && !lines.is_empty() {
                    commands.push(DrawCommand::Text(TextRun {
                        x: left,
                        baseline: placed.y + style.ascent(),
                        text: BULLET_MARKER.to_string(),
                        face: style.face,
                        size: style.size,
                        color: self.palette.bullet,
                    }));
                }
                push_lines(&mut commands, &lines, &style, left + indent, placed.y, color);

                if let ContentBlock::Heading { level: 0 | 1, .. } = block {
                    let y = placed.bottom();
                    commands.push(DrawCommand::Line(LineSegment {
                        x1: left,
                        y1: y,
                        x2: left + width,
                        y2: y,
                        width: RULE_WIDTH,
                        color: self.palette.rule,
                    }));
                }
            }
            (block, _) => {
                log::warn!("Layout mismatch for block {} ({:?}); skipped", placed.index, block.kind());
            }
        }
        commands
    }
}

fn push_lines(
    commands: &mut Vec<DrawCommand>,
    lines: &[String],
    style: &TextStyle,
    x: f32,
    top: f32,
    color: Color,
) {
    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        commands.push(DrawCommand::Text(TextRun {
            x,
            baseline: top + i as f32 * style.line_height + style.ascent(),
            text: line.clone(),
            face: style.face,
            size: style.size,
            color,
        }));
    }
}
