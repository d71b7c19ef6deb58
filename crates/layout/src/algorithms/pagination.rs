use crate::block::ContentBlock;

/// Small tolerance for floating point drift in height sums.
pub const EPSILON: f32 = 0.01;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Checks whether `height` more points fit below `cursor_y` before `max_y`.
///
/// * `cursor_y`: The current Y position, measured from the top of the page.
/// * `height`: The space required, including any gap in front of the block.
/// * `max_y`: The bottom margin boundary.
pub fn check_fit(cursor_y: f32, height: f32, max_y: f32) -> BreakAnalysis {
    let available = (max_y - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: height > available + EPSILON,
        remaining_height: available,
    }
}

/// The run of blocks a heading must share a page with: the heading itself,
/// any headings directly after it, and the first non-heading block.
///
/// Returns the exclusive end index of that run. When only headings follow,
/// the run reaches the end of the input. `None` means the heading is the last
/// block and keeps nothing with it.
pub fn keep_with_next_end(blocks: &[ContentBlock], heading_index: usize) -> Option<usize> {
    if heading_index + 1 >= blocks.len() {
        return None;
    }
    let end = blocks
        .iter()
        .enumerate()
        .skip(heading_index + 1)
        .find(|(_, b)| !b.is_heading())
        .map(|(i, _)| i + 1)
        .unwrap_or(blocks.len());
    Some(end)
}
