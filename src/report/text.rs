use super::item::{Frame, ReportItem};
use super::page_count::PageCount;
use crate::metrics::FontMetrics;
use crate::renderer::Renderer;
use crate::units::Pt;
use crate::ReportError;
use std::rc::Rc;

/// How text is placed within its item's width. Alignment only shows when
/// the width is wider than the rendered text, as with
/// [Text::with_width] or the lines of a fitted block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Flush with the left edge
    #[default]
    Left,
    /// Centred, extra space split between both sides
    Center,
    /// Flush with the right edge
    Right,
}

/// A single line of text, one line height tall. The width defaults to the
/// measured text width; give it a wider one with
/// [with_width](Text::with_width) and the ink aligns within it.
///
/// Text containing [Text::PAGE_NUMBER] or [Text::TOTAL_PAGES] has those
/// tokens replaced when it prints — but only when a [PageCount] was
/// attached with [with_page_count](Text::with_page_count); without one the
/// tokens print literally. The current page comes from the renderer, the
/// total from the counter, which holds the true total because the report
/// is fully built before printing starts.
pub struct Text {
    metrics: FontMetrics,
    align: Align,
    content: String,
    page_count: Option<Rc<PageCount>>,
    frame: Frame,
}

impl Text {
    /// Replaced with the number of the page the text prints on
    pub const PAGE_NUMBER: &'static str = "{page}";

    /// Replaced with the total number of pages in the report
    pub const TOTAL_PAGES: &'static str = "{pages}";

    pub fn new<S: ToString>(metrics: &FontMetrics, text: S) -> Text {
        Text::aligned(metrics, Align::Left, text)
    }

    pub fn aligned<S: ToString>(metrics: &FontMetrics, align: Align, text: S) -> Text {
        let content = text.to_string();
        let width = metrics.width(&content);
        Text::sized(metrics, width, align, content)
    }

    /// Text with an explicit width; extra space appears to the left and/or
    /// right of the ink depending on alignment, which makes right-aligned
    /// columns line up
    pub fn with_width<S: ToString>(metrics: &FontMetrics, width: Pt, align: Align, text: S) -> Text {
        Text::sized(metrics, width, align, text.to_string())
    }

    fn sized(metrics: &FontMetrics, width: Pt, align: Align, content: String) -> Text {
        Text {
            metrics: metrics.clone(),
            align,
            content,
            page_count: None,
            frame: Frame::new(width, metrics.line_height()),
        }
    }

    /// Text with page-number tokens resolved against `page_count` at print
    /// time
    pub fn with_page_count<S: ToString>(
        metrics: &FontMetrics,
        align: Align,
        text: S,
        page_count: Rc<PageCount>,
    ) -> Text {
        let mut text = Text::aligned(metrics, align, text);
        text.page_count = Some(page_count);
        text
    }

    fn resolve(&self, renderer: &dyn Renderer) -> String {
        match &self.page_count {
            Some(count) => self
                .content
                .replace(Self::PAGE_NUMBER, &renderer.page_number().to_string())
                .replace(Self::TOTAL_PAGES, &count.total().to_string()),
            None => self.content.clone(),
        }
    }
}

impl ReportItem for Text {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn print(&self, renderer: &mut dyn Renderer) -> Result<(), ReportError> {
        renderer.save_state();
        renderer.set_metrics(&self.metrics)?;

        let content = self.resolve(renderer);
        // align within the item's own width
        match self.align {
            Align::Left => {}
            Align::Center => renderer.move_cursor(
                (self.frame.width - self.metrics.width(&content)) / 2.0,
                Pt(0.0),
            ),
            Align::Right => renderer.move_cursor(
                self.frame.width - self.metrics.width(&content),
                Pt(0.0),
            ),
        }
        renderer.draw_text(&content)?;

        renderer.restore_state()
    }
}

/// A block of text lines sharing one set of metrics, stacked a line height
/// apart. Lines are either supplied ready-made or produced by fitting a
/// string to a width with [FontMetrics::fit].
pub struct TextLines {
    metrics: FontMetrics,
    align: Align,
    lines: Vec<String>,
    page_count: Option<Rc<PageCount>>,
    frame: Frame,
}

impl TextLines {
    /// A block from pre-split lines; the width is the widest line
    pub fn new<S: ToString>(metrics: &FontMetrics, lines: Vec<S>) -> TextLines {
        let lines: Vec<String> = lines.into_iter().map(|line| line.to_string()).collect();
        let width = lines
            .iter()
            .map(|line| metrics.width(line))
            .fold(Pt(0.0), Pt::max);
        let height = metrics.line_height() * lines.len() as f32;
        TextLines {
            metrics: metrics.clone(),
            align: Align::Left,
            lines,
            page_count: None,
            frame: Frame::new(width, height),
        }
    }

    /// A block produced by word-wrapping `text` to `max_width`, honouring
    /// embedded CR/LF as hard breaks. The block is `max_width` wide even
    /// when every line falls short, so alignment and stacking work against
    /// the requested width.
    pub fn fit(metrics: &FontMetrics, text: &str, max_width: Pt) -> TextLines {
        let mut block = TextLines::new(metrics, metrics.fit(text, max_width));
        block.frame.width = max_width;
        block
    }

    pub fn set_align(&mut self, align: Align) {
        self.align = align;
    }

    /// Attach a page counter so page-number tokens in any line resolve at
    /// print time
    pub fn set_page_count(&mut self, page_count: Rc<PageCount>) {
        self.page_count = Some(page_count);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn resolve(&self, line: &str, renderer: &dyn Renderer) -> String {
        match &self.page_count {
            Some(count) => line
                .replace(Text::PAGE_NUMBER, &renderer.page_number().to_string())
                .replace(Text::TOTAL_PAGES, &count.total().to_string()),
            None => line.to_string(),
        }
    }
}

impl ReportItem for TextLines {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn print(&self, renderer: &mut dyn Renderer) -> Result<(), ReportError> {
        renderer.save_state();
        renderer.set_metrics(&self.metrics)?;

        let origin = renderer.cursor();
        let line_height = self.metrics.line_height();
        for (i, line) in self.lines.iter().enumerate() {
            let line = self.resolve(line, renderer);
            // each line aligns within the block's width
            let x = match self.align {
                Align::Left => origin.0,
                Align::Center => origin.0 + (self.frame.width - self.metrics.width(&line)) / 2.0,
                Align::Right => origin.0 + self.frame.width - self.metrics.width(&line),
            };
            renderer.set_cursor(x, origin.1 + line_height * i as f32);
            renderer.draw_text(&line)?;
        }
        renderer.set_cursor(origin.0, origin.1);

        renderer.restore_state()
    }
}
