use crate::error::RenderError;
use crate::types::DrawCommand;

/// A trait for document renderers, abstracting the output-format primitives.
///
/// Calls arrive in a fixed order: `begin_document`, then for every page
/// `begin_page`, any number of `draw`, `end_page`, and finally `finish`.
pub trait DocumentRenderer {
    fn begin_document(&mut self) -> Result<(), RenderError>;

    fn begin_page(&mut self, width: f32, height: f32) -> Result<(), RenderError>;

    fn draw(&mut self, command: DrawCommand) -> Result<(), RenderError>;

    fn end_page(&mut self) -> Result<(), RenderError>;

    /// Serializes the finished document.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}
