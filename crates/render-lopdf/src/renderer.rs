use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use reportly_layout::{Bitmap, FontFace};
use reportly_render_core::utils::{flip_y, to_win_ansi};
use reportly_render_core::{DocumentRenderer, DrawCommand, ImagePlacement, LineSegment, RenderError, TextRun};
use reportly_types::Color;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

/// An in-memory PDF renderer using the `lopdf` library.
/// It builds the document's object graph and serializes it in `finish`.
pub struct LopdfRenderer {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    images: HashMap<ImageKey, String>,
    xobjects: Dictionary,
    page: Option<PageContext>,
    started: bool,
    title: Option<String>,
}

/// Identity of a bitmap's pixel buffer; blocks sharing a buffer share one XObject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ImageKey {
    pixels: usize,
    width: u32,
    height: u32,
}

impl ImageKey {
    fn of(bitmap: &Bitmap) -> Self {
        Self {
            pixels: Arc::as_ptr(&bitmap.pixels) as *const u8 as usize,
            width: bitmap.width,
            height: bitmap.height,
        }
    }
}

impl LopdfRenderer {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            images: HashMap::new(),
            xobjects: Dictionary::new(),
            page: None,
            started: false,
            title: None,
        }
    }

    /// Sets the title stored in the document information dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn font_resource(face: FontFace) -> &'static str {
        match face {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Oblique => "F3",
        }
    }

    fn font_dictionary(&mut self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for face in FontFace::ALL {
            let font_id = self.document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(Self::font_resource(face), font_id);
        }
        fonts
    }

    /// Returns the resource name of `bitmap`, adding it as an image XObject on first use.
    fn image_resource(&mut self, bitmap: &Bitmap) -> Result<String, RenderError> {
        let key = ImageKey::of(bitmap);
        if let Some(name) = self.images.get(&key) {
            return Ok(name.clone());
        }
        if !bitmap.is_usable() {
            return Err(RenderError::Pdf(format!(
                "bitmap {}x{} has {} bytes of pixel data",
                bitmap.width,
                bitmap.height,
                bitmap.pixels.len()
            )));
        }

        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => bitmap.width as i64,
                "Height" => bitmap.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            deflate(&bitmap.pixels)?,
        );
        let image_id = self.document.add_object(stream);
        let name = format!("Im{}", self.images.len() + 1);
        self.xobjects.set(name.as_str(), image_id);
        self.images.insert(key, name.clone());
        log::debug!("Embedded {}x{} image as /{}", bitmap.width, bitmap.height, name);
        Ok(name)
    }

    fn page_mut(&mut self) -> Result<&mut PageContext, RenderError> {
        self.page
            .as_mut()
            .ok_or(RenderError::InvalidState("draw called outside a page"))
    }
}

impl Default for LopdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for LopdfRenderer {
    fn begin_document(&mut self) -> Result<(), RenderError> {
        if self.started {
            return Err(RenderError::InvalidState("document already started"));
        }
        self.started = true;

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![],
            "Count" => 0,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);
        Ok(())
    }

    fn begin_page(&mut self, width: f32, height: f32) -> Result<(), RenderError> {
        if !self.started {
            return Err(RenderError::InvalidState("page begun before the document"));
        }
        if self.page.is_some() {
            return Err(RenderError::InvalidState("page begun inside another page"));
        }
        self.page = Some(PageContext::new(width, height));
        Ok(())
    }

    fn draw(&mut self, command: DrawCommand) -> Result<(), RenderError> {
        match command {
            DrawCommand::Text(run) => self.page_mut()?.draw_text(&run),
            DrawCommand::Line(line) => self.page_mut()?.draw_line(&line),
            DrawCommand::Image(image) => {
                // Checked before the resource is created so a stray image
                // never lands in the document.
                self.page_mut()?;
                let name = self.image_resource(&image.bitmap)?;
                self.page_mut()?.draw_image(&image, &name);
            }
        }
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), RenderError> {
        let page = self
            .page
            .take()
            .ok_or(RenderError::InvalidState("end_page without begin_page"))?;
        let (width, height) = (page.width, page.height);

        let content = page.finish();
        let content_stream = Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content.encode()?)?,
        );
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        if !self.started {
            return Err(RenderError::InvalidState("document was never started"));
        }
        if self.page.is_some() {
            return Err(RenderError::InvalidState("finish called with an open page"));
        }

        // Resources are shared by all pages and written last, once every
        // image is known.
        let fonts = self.font_dictionary();
        let mut resources = dictionary! { "Font" => fonts };
        if !self.xobjects.is_empty() {
            resources.set("XObject", std::mem::take(&mut self.xobjects));
        }
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        if let Some(Object::Dictionary(pages_dict)) = self.document.objects.get_mut(&self.pages_id) {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages_dict.set("Kids", kids);
            pages_dict.set("Count", self.page_ids.len() as i64);
        }

        let mut info = dictionary! {
            "Producer" => Object::String(b"reportly".to_vec(), StringFormat::Literal),
        };
        if let Some(title) = &self.title {
            info.set("Title", Object::String(to_win_ansi(title), StringFormat::Literal));
        }
        let info_id = self.document.add_object(info);
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        log::debug!("Serialized PDF: {} pages, {} bytes", self.page_ids.len(), bytes.len());
        Ok(bytes)
    }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn rgb_operands(color: Color) -> Vec<Object> {
    color.to_unit().into_iter().map(Object::from).collect()
}

struct PageContext {
    width: f32,
    height: f32,
    content: Content,
    state: PageRenderState,
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

impl PageContext {
    fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            self.push("Tf", vec![LopdfRenderer::font_resource(face).into(), size.into()]);
            self.state.font = Some((face, size));
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            self.push("rg", rgb_operands(color));
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
        if self.state.stroke_color != Some(color) {
            self.push("RG", rgb_operands(color));
            self.state.stroke_color = Some(color);
        }
    }

    fn draw_text(&mut self, run: &TextRun) {
        if run.text.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(run.face, run.size);
        self.set_fill_color(run.color);
        let pdf_y = flip_y(run.baseline, self.height);
        self.push("Td", vec![run.x.into(), pdf_y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(&run.text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn draw_line(&mut self, line: &LineSegment) {
        self.set_stroke(line.color, line.width);
        self.push("m", vec![line.x1.into(), flip_y(line.y1, self.height).into()]);
        self.push("l", vec![line.x2.into(), flip_y(line.y2, self.height).into()]);
        self.push("S", vec![]);
    }

    fn draw_image(&mut self, image: &ImagePlacement, name: &str) {
        let rect = image.rect;
        let bottom = flip_y(rect.bottom(), self.height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                bottom.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }
}
