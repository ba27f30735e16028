use crate::colour::Colour;
use crate::font::Typeface;
use crate::image::Image;
use crate::info::Info;
use crate::metrics::FontMetrics;
use crate::page::PageSettings;
use crate::refs::{ObjectReferences, RefType};
use crate::renderer::{CornerRadii, DrawStyle, Renderer};
use crate::units::Pt;
use crate::ReportError;
use pdf_writer::{Finish, Name, Pdf, Rect, Ref};
use std::io::Write;
use std::rc::Rc;

struct SavedState {
    colour: Colour,
    line_width: Pt,
    metrics: Option<FontMetrics>,
    active_font: Option<usize>,
}

/// Draws onto PDF pages and assembles the finished document.
///
/// The renderer exposes the top-left, margin-relative coordinate space of
/// [Renderer]; internally every operation is translated to PDF's
/// bottom-left page coordinates as it is emitted. Pages accumulate until
/// [write](Self::write) serializes the whole document.
///
/// Fonts and images are registered on first use and embedded once each, no
/// matter how many pages or items reference them.
pub struct PdfRenderer {
    settings: PageSettings,
    info: Option<Info>,
    fonts: Vec<Rc<dyn Typeface>>,
    images: Vec<Rc<Image>>,
    pages: Vec<Vec<u8>>,
    content: Vec<u8>,
    cursor: (Pt, Pt),
    metrics: Option<FontMetrics>,
    active_font: Option<usize>,
    colour: Colour,
    line_width: Pt,
    saved: Vec<SavedState>,
    // state already written into the current page's content stream; cleared
    // on every new page so the first use re-issues it
    issued_font: Option<(usize, Pt)>,
    issued_colour: Option<Colour>,
    issued_line_width: Option<Pt>,
}

impl PdfRenderer {
    pub fn new(settings: PageSettings) -> PdfRenderer {
        PdfRenderer {
            settings,
            info: None,
            fonts: Vec::new(),
            images: Vec::new(),
            pages: Vec::new(),
            content: Vec::new(),
            cursor: (Pt(0.0), Pt(0.0)),
            metrics: None,
            active_font: None,
            colour: Colour::new_grey(0.0),
            line_width: Pt(1.0),
            saved: Vec::new(),
            issued_font: None,
            issued_colour: None,
            issued_line_width: None,
        }
    }

    /// Attach document metadata (title, author, and so on) to be written
    /// into the PDF's info dictionary
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    pub fn page_settings(&self) -> &PageSettings {
        &self.settings
    }

    /// Horizontal page coordinate of a cursor x position
    fn pdf_x(&self, x: Pt) -> f32 {
        (self.settings.margins().left + x).0
    }

    /// Vertical page coordinate of a cursor y position; PDF y runs upward
    /// from the bottom of the page
    fn pdf_y(&self, y: Pt) -> f32 {
        (self.settings.total_height() - self.settings.margins().top - y).0
    }

    fn emit(&mut self, op: String) {
        self.content.extend_from_slice(op.as_bytes());
    }

    fn ensure_colour(&mut self) {
        if self.issued_colour == Some(self.colour) {
            return;
        }
        self.issued_colour = Some(self.colour);
        let op = match self.colour {
            Colour::RGB { r, g, b } => format!("{r} {g} {b} rg\n{r} {g} {b} RG\n"),
            Colour::Grey { g } => format!("{g} g\n{g} G\n"),
        };
        self.emit(op);
    }

    fn ensure_line_width(&mut self) {
        if self.issued_line_width == Some(self.line_width) {
            return;
        }
        self.issued_line_width = Some(self.line_width);
        self.emit(format!("{} w\n", self.line_width.0));
    }

    fn ensure_font(&mut self, index: usize, size: Pt) {
        if self.issued_font == Some((index, size)) {
            return;
        }
        self.issued_font = Some((index, size));
        self.emit(format!("/F{index} {} Tf\n", size.0));
    }

    /// The index of `face` in the font registry, registering it on first
    /// sight. Faces are compared by identity, so cloned handles to the same
    /// font share one embedded copy.
    fn register_face(&mut self, face: &Rc<dyn Typeface>) -> Result<usize, ReportError> {
        if face.as_font().is_none() {
            return Err(ReportError::MetricsOnlyTypeface);
        }
        for (i, registered) in self.fonts.iter().enumerate() {
            if Rc::ptr_eq(registered, face) {
                return Ok(i);
            }
        }
        self.fonts.push(face.clone());
        Ok(self.fonts.len() - 1)
    }

    fn register_image(&mut self, image: &Rc<Image>) -> usize {
        for (i, registered) in self.images.iter().enumerate() {
            if Rc::ptr_eq(registered, image) {
                return i;
            }
        }
        self.images.push(image.clone());
        self.images.len() - 1
    }

    /// Trace a rectangle path with the given corner rounding; the caller
    /// appends the painting operator
    fn rect_path(&mut self, x: f32, y_top: f32, width: f32, height: f32, corners: CornerRadii) {
        if !corners.is_rounded() {
            self.emit(format!("{x} {} {width} {height} re\n", y_top - height));
            return;
        }
        // each corner is a single bezier whose control point sits on the
        // corner vertex; its endpoints lie offset / (1 - cos 45°) along the
        // edges so the curve passes the requested distance from the corner
        let hyp_factor = 1.0 - std::f32::consts::FRAC_1_SQRT_2;
        let clamp = (width / 2.0).min(height / 2.0);
        let bez = |offset: Pt| (offset.0 / hyp_factor).clamp(0.0, clamp);
        let (tl, tr) = (bez(corners.top_left), bez(corners.top_right));
        let (br, bl) = (bez(corners.bottom_right), bez(corners.bottom_left));
        let (x2, y_bot) = (x + width, y_top - height);
        self.emit(format!("{x} {} m\n", y_top - tl));
        self.emit(format!("{x} {y_top} {} {y_top} v\n", x + tl));
        self.emit(format!("{} {y_top} l\n", x2 - tr));
        self.emit(format!("{x2} {y_top} {x2} {} v\n", y_top - tr));
        self.emit(format!("{x2} {} l\n", y_bot + br));
        self.emit(format!("{x2} {y_bot} {} {y_bot} v\n", x2 - br));
        self.emit(format!("{} {y_bot} l\n", x + bl));
        self.emit(format!("{x} {y_bot} {x} {} v\n", y_bot + bl));
        self.emit(format!("{x} {} l\n", y_top - tl));
    }

    fn write_page(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        id: Ref,
        content: &[u8],
        writer: &mut Pdf,
    ) {
        let mut page = writer.page(id);
        page.media_box(Rect {
            x1: 0.0,
            y1: 0.0,
            x2: self.settings.total_width().0,
            y2: self.settings.total_height().0,
        });
        let margins = self.settings.margins();
        page.art_box(Rect {
            x1: margins.left.0,
            y1: margins.bottom.0,
            x2: (self.settings.total_width() - margins.right).0,
            y2: (self.settings.total_height() - margins.top).0,
        });
        if let Some(tree) = refs.get(RefType::PageTree) {
            page.parent(tree);
        }

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (i, _) in self.fonts.iter().enumerate() {
            if let Some(font_ref) = refs.get(RefType::Font(i)) {
                resource_fonts.pair(Name(format!("F{i}").as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (i, _) in self.images.iter().enumerate() {
            if let Some(image_ref) = refs.get(RefType::Image(i)) {
                resource_xobjects.pair(Name(format!("I{i}").as_bytes()), image_ref);
            }
        }
        resource_xobjects.finish();
        resources.finish();

        let content_id = refs.gen(RefType::ContentForPage(page_index));
        page.contents(content_id);
        page.finish();

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            content,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);
    }

    /// Serialize the document. The page being drawn is included, so a
    /// renderer that was never drawn to still produces a single blank page.
    pub fn write<W: Write>(mut self, mut w: W) -> Result<(), ReportError> {
        let current = std::mem::take(&mut self.content);
        self.pages.push(current);

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        for (i, face) in self.fonts.iter().enumerate() {
            if let Some(font) = face.as_font() {
                font.write(&mut refs, i, &mut writer);
            }
        }
        for (i, image) in self.images.iter().enumerate() {
            image.write(&mut refs, i, &mut writer)?;
        }

        for (i, content) in self.pages.iter().enumerate() {
            self.write_page(&mut refs, i, page_refs[i], content, &mut writer);
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice())?;
        Ok(())
    }

    /// Serialize the document into memory; see [write](Self::write)
    pub fn finish(self) -> Result<Vec<u8>, ReportError> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }
}

impl Renderer for PdfRenderer {
    fn cursor(&self) -> (Pt, Pt) {
        self.cursor
    }

    fn set_cursor(&mut self, x: Pt, y: Pt) {
        self.cursor = (x, y);
    }

    fn usable_width(&self) -> Pt {
        self.settings.usable_width()
    }

    fn usable_height(&self) -> Pt {
        self.settings.usable_height()
    }

    fn page_number(&self) -> u32 {
        self.pages.len() as u32 + 1
    }

    fn set_metrics(&mut self, metrics: &FontMetrics) -> Result<(), ReportError> {
        let index = self.register_face(metrics.face())?;
        self.active_font = Some(index);
        if let Some(colour) = metrics.colour() {
            self.colour = colour;
        }
        self.metrics = Some(metrics.clone());
        Ok(())
    }

    fn metrics(&self) -> Option<&FontMetrics> {
        self.metrics.as_ref()
    }

    fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    fn set_line_width(&mut self, width: Pt) {
        self.line_width = width;
    }

    fn line_width(&self) -> Pt {
        self.line_width
    }

    fn save_state(&mut self) {
        self.saved.push(SavedState {
            colour: self.colour,
            line_width: self.line_width,
            metrics: self.metrics.clone(),
            active_font: self.active_font,
        });
    }

    fn restore_state(&mut self) -> Result<(), ReportError> {
        let state = self.saved.pop().ok_or(ReportError::StateNotSaved)?;
        self.colour = state.colour;
        self.line_width = state.line_width;
        self.metrics = state.metrics;
        self.active_font = state.active_font;
        Ok(())
    }

    fn state_depth(&self) -> usize {
        self.saved.len()
    }

    fn draw_text(&mut self, text: &str) -> Result<(), ReportError> {
        let (metrics, index) = match (&self.metrics, self.active_font) {
            (Some(metrics), Some(index)) => (metrics.clone(), index),
            _ => return Err(ReportError::NoActiveFont),
        };
        let font = match self.fonts[index].as_font() {
            Some(font) => font,
            None => return Err(ReportError::MetricsOnlyTypeface),
        };

        let mut glyphs = String::with_capacity(text.len() * 4);
        for ch in text.chars() {
            let gid = font
                .glyph_id(ch)
                .or_else(|| font.fallback_glyph_id())
                .unwrap_or(0);
            glyphs.push_str(&format!("{gid:04x}"));
        }

        let x = self.pdf_x(self.cursor.0);
        // anchored by the top-left corner: drop down to the baseline
        let y = self.pdf_y(self.cursor.1 + metrics.spacing_top() + metrics.ascent());

        self.ensure_colour();
        self.ensure_font(index, metrics.size());
        self.emit(format!("BT\n{x} {y} Td\n<{glyphs}> Tj\nET\n"));

        self.cursor.0 += metrics.width(text);
        Ok(())
    }

    fn line_feed(&mut self) -> Result<(), ReportError> {
        let metrics = self.metrics.as_ref().ok_or(ReportError::NoActiveFont)?;
        self.cursor = (Pt(0.0), self.cursor.1 + metrics.line_height());
        Ok(())
    }

    fn draw_line(&mut self, dx: Pt, dy: Pt) {
        let (x1, y1) = (self.pdf_x(self.cursor.0), self.pdf_y(self.cursor.1));
        let end = (self.cursor.0 + dx, self.cursor.1 + dy);
        let (x2, y2) = (self.pdf_x(end.0), self.pdf_y(end.1));

        self.ensure_colour();
        self.ensure_line_width();
        self.emit(format!("{x1} {y1} m\n{x2} {y2} l\nS\n"));

        self.cursor = end;
    }

    fn draw_rect(&mut self, width: Pt, height: Pt, style: DrawStyle, corners: CornerRadii) {
        self.ensure_colour();

        match style {
            DrawStyle::Outline => {
                self.ensure_line_width();
                // pull the path in by half the line width so the stroke
                // stays inside the requested bounds
                let inset = self.line_width / 2.0;
                let x = self.pdf_x(self.cursor.0 + inset);
                let y_top = self.pdf_y(self.cursor.1 + inset);
                self.rect_path(
                    x,
                    y_top,
                    (width - self.line_width).0,
                    (height - self.line_width).0,
                    corners,
                );
                self.emit("S\n".to_string());
            }
            DrawStyle::Fill => {
                let x = self.pdf_x(self.cursor.0);
                let y_top = self.pdf_y(self.cursor.1);
                self.rect_path(x, y_top, width.0, height.0, corners);
                self.emit("f\n".to_string());
            }
        }
    }

    fn draw_image(&mut self, image: &Rc<Image>, width: Pt, height: Pt) {
        let index = self.register_image(image);
        let x = self.pdf_x(self.cursor.0);
        let y = self.pdf_y(self.cursor.1 + height);
        self.emit(format!(
            "q\n{} 0 0 {} {x} {y} cm\n/I{index} Do\nQ\n",
            width.0, height.0
        ));
    }

    fn start_new_page(&mut self) {
        let finished = std::mem::take(&mut self.content);
        self.pages.push(finished);
        self.cursor = (Pt(0.0), Pt(0.0));
        self.issued_font = None;
        self.issued_colour = None;
        self.issued_line_width = None;
    }
}
