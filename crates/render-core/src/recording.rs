use crate::error::RenderError;
use crate::traits::DocumentRenderer;
use crate::types::DrawCommand;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPage {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

/// A renderer that keeps the draw-instruction stream instead of producing a
/// file. `finish` returns a plain-text listing of the instructions.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    started: bool,
    pages: Vec<RecordedPage>,
    current: Option<RecordedPage>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_started(&self) -> bool {
        self.started
    }

    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<RecordedPage> {
        self.pages
    }
}

impl DocumentRenderer for RecordingRenderer {
    fn begin_document(&mut self) -> Result<(), RenderError> {
        if self.started {
            return Err(RenderError::InvalidState("document already started"));
        }
        self.started = true;
        Ok(())
    }

    fn begin_page(&mut self, width: f32, height: f32) -> Result<(), RenderError> {
        if !self.started {
            return Err(RenderError::InvalidState("page begun before the document"));
        }
        if self.current.is_some() {
            return Err(RenderError::InvalidState("page begun inside another page"));
        }
        self.current = Some(RecordedPage {
            width,
            height,
            commands: Vec::new(),
        });
        Ok(())
    }

    fn draw(&mut self, command: DrawCommand) -> Result<(), RenderError> {
        let page = self
            .current
            .as_mut()
            .ok_or(RenderError::InvalidState("draw called outside a page"))?;
        page.commands.push(command);
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), RenderError> {
        let page = self
            .current
            .take()
            .ok_or(RenderError::InvalidState("end_page without begin_page"))?;
        self.pages.push(page);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        if self.current.is_some() {
            return Err(RenderError::InvalidState("finish called with an open page"));
        }
        let mut listing = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            let _ = writeln!(listing, "page {} {}x{}", i + 1, page.width, page.height);
            for command in &page.commands {
                let _ = match command {
                    DrawCommand::Text(run) => writeln!(
                        listing,
                        "  text {:.2} {:.2} {:?} {}",
                        run.x, run.baseline, run.face, run.text
                    ),
                    DrawCommand::Image(image) => writeln!(
                        listing,
                        "  image {:.2} {:.2} {:.2}x{:.2}",
                        image.rect.x, image.rect.y, image.rect.width, image.rect.height
                    ),
                    DrawCommand::Line(line) => writeln!(
                        listing,
                        "  line {:.2} {:.2} {:.2} {:.2}",
                        line.x1, line.y1, line.x2, line.y2
                    ),
                };
            }
        }
        Ok(listing.into_bytes())
    }
}
