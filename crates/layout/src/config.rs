use crate::block::BlockKind;
use crate::style::TypeScale;
use serde::Deserialize;

/// Vertical gaps (in points) inserted between consecutive blocks on a page.
///
/// Gaps only exist between two blocks on the same page; the first block of a
/// page always sits directly on the top margin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacingRules {
    /// Heading followed by its body.
    pub after_heading: f32,
    /// Body block followed by the next section heading.
    pub before_heading: f32,
    /// Two body blocks (paragraphs, bullets) in a row.
    pub between_body: f32,
    /// Chart (image + caption) followed by anything.
    pub after_chart: f32,
    /// Gap between a chart image and its caption, part of the chart's own height.
    pub image_to_caption: f32,
}

impl Default for SpacingRules {
    fn default() -> Self {
        Self {
            after_heading: 6.0,
            before_heading: 24.0,
            between_body: 6.0,
            after_chart: 28.0,
            image_to_caption: 14.0,
        }
    }
}

impl SpacingRules {
    pub fn between(&self, previous: BlockKind, next: BlockKind) -> f32 {
        match (previous, next) {
            (BlockKind::Heading, _) => self.after_heading,
            (BlockKind::ChartImage, _) => self.after_chart,
            (_, BlockKind::Heading) => self.before_heading,
            _ => self.between_body,
        }
    }
}

/// What to do with a block that is taller than the page's content area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OversizePolicy {
    /// Place the block alone on its own page and let it overflow the bottom margin.
    #[default]
    Accept,
    /// Scale oversized charts down (aspect ratio kept) until image and caption fit.
    /// Text blocks cannot shrink and are accepted as-is.
    ShrinkToFit,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub spacing: SpacingRules,
    pub oversize: OversizePolicy,
    pub type_scale: TypeScale,
    /// Horizontal space reserved for the bullet marker in front of list items.
    pub bullet_indent: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: SpacingRules::default(),
            oversize: OversizePolicy::default(),
            type_scale: TypeScale::default(),
            bullet_indent: 12.0,
        }
    }
}
