//! Pagination behaviour of the report tree, observed through a recording
//! renderer.

use pdf_report::report::{Align, RectItem, ReportItem, Report, Spacer, Text, TextLines};
use pdf_report::{
    colours, Colour, CornerRadii, DrawStyle, FontMetrics, Image, Pt, Renderer, ReportError,
    Typeface,
};
use std::rc::Rc;

struct FixedFace;

impl Typeface for FixedFace {
    fn ascent(&self, size: Pt) -> Pt {
        size * 0.8
    }

    fn descent(&self, size: Pt) -> Pt {
        size * -0.2
    }

    fn advance(&self, _ch: char, _size: Pt) -> Pt {
        Pt(5.0)
    }
}

fn metrics() -> FontMetrics {
    FontMetrics::new(Rc::new(FixedFace), Pt(10.0))
}

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Text {
        page: u32,
        x: f32,
        y: f32,
        content: String,
    },
    Rect {
        page: u32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Line {
        page: u32,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
    },
    NewPage,
}

/// Records every drawing operation with the page and cursor it happened at
struct RecordingRenderer {
    usable: (Pt, Pt),
    cursor: (Pt, Pt),
    page: u32,
    metrics: Option<FontMetrics>,
    colour: Colour,
    line_width: Pt,
    saved: Vec<(Colour, Pt, Option<FontMetrics>)>,
    ops: Vec<Op>,
}

impl RecordingRenderer {
    fn new(width: Pt, height: Pt) -> RecordingRenderer {
        RecordingRenderer {
            usable: (width, height),
            cursor: (Pt(0.0), Pt(0.0)),
            page: 1,
            metrics: None,
            colour: colours::BLACK,
            line_width: Pt(1.0),
            saved: Vec::new(),
            ops: Vec::new(),
        }
    }
}

impl Renderer for RecordingRenderer {
    fn cursor(&self) -> (Pt, Pt) {
        self.cursor
    }

    fn set_cursor(&mut self, x: Pt, y: Pt) {
        self.cursor = (x, y);
    }

    fn usable_width(&self) -> Pt {
        self.usable.0
    }

    fn usable_height(&self) -> Pt {
        self.usable.1
    }

    fn page_number(&self) -> u32 {
        self.page
    }

    fn set_metrics(&mut self, metrics: &FontMetrics) -> Result<(), ReportError> {
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
        self.saved
            .push((self.colour, self.line_width, self.metrics.clone()));
    }

    fn restore_state(&mut self) -> Result<(), ReportError> {
        let (colour, line_width, metrics) = self.saved.pop().ok_or(ReportError::StateNotSaved)?;
        self.colour = colour;
        self.line_width = line_width;
        self.metrics = metrics;
        Ok(())
    }

    fn state_depth(&self) -> usize {
        self.saved.len()
    }

    fn draw_text(&mut self, text: &str) -> Result<(), ReportError> {
        let metrics = self.metrics.as_ref().ok_or(ReportError::NoActiveFont)?;
        self.ops.push(Op::Text {
            page: self.page,
            x: self.cursor.0 .0,
            y: self.cursor.1 .0,
            content: text.to_string(),
        });
        self.cursor.0 += metrics.width(text);
        Ok(())
    }

    fn line_feed(&mut self) -> Result<(), ReportError> {
        let metrics = self.metrics.as_ref().ok_or(ReportError::NoActiveFont)?;
        self.cursor = (Pt(0.0), self.cursor.1 + metrics.line_height());
        Ok(())
    }

    fn draw_line(&mut self, dx: Pt, dy: Pt) {
        self.ops.push(Op::Line {
            page: self.page,
            x: self.cursor.0 .0,
            y: self.cursor.1 .0,
            dx: dx.0,
            dy: dy.0,
        });
        self.cursor = (self.cursor.0 + dx, self.cursor.1 + dy);
    }

    fn draw_rect(&mut self, width: Pt, height: Pt, _style: DrawStyle, _corners: CornerRadii) {
        self.ops.push(Op::Rect {
            page: self.page,
            x: self.cursor.0 .0,
            y: self.cursor.1 .0,
            width: width.0,
            height: height.0,
        });
    }

    fn draw_image(&mut self, _image: &Rc<Image>, _width: Pt, _height: Pt) {}

    fn start_new_page(&mut self) {
        self.ops.push(Op::NewPage);
        self.page += 1;
        self.cursor = (Pt(0.0), Pt(0.0));
    }
}

fn block(height: f32) -> RectItem {
    RectItem::new(Pt(200.0), Pt(height), DrawStyle::Fill)
}

#[test]
fn breaks_before_the_item_that_would_overrun_the_footer() {
    // usable height 120, footer 20: two 50pt items fit exactly, the third
    // forces a break
    let mut report = Report::new(Pt(200.0), Pt(120.0));
    let footer: Rc<dyn ReportItem> = Rc::new(Spacer::new(Pt(200.0), Pt(20.0)));

    assert!(!report.add_vertical_paged(block(50.0), Some(&footer), None));
    assert!(!report.add_vertical_paged(block(50.0), Some(&footer), None));
    assert!(report.add_vertical_paged(block(50.0), Some(&footer), None));

    assert_eq!(report.page_count().total(), 2);

    let mut renderer = RecordingRenderer::new(Pt(200.0), Pt(120.0));
    report.print(&mut renderer).unwrap();

    let rects: Vec<(u32, f32)> = renderer
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Rect { page, y, .. } => Some((*page, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(rects, vec![(1, 0.0), (1, 50.0), (2, 0.0)]);
}

#[test]
fn an_item_filling_the_whole_page_fits_when_the_page_is_empty() {
    let mut report = Report::new(Pt(200.0), Pt(120.0));
    // taller than the page: no fit check applies to an empty page
    assert!(report.try_add_vertical(block(500.0), Pt(0.0)).is_ok());
}

#[test]
fn a_failed_fit_hands_the_item_back_unchanged() {
    let mut report = Report::new(Pt(200.0), Pt(120.0));
    report.add_vertical(block(100.0));

    let mut item = block(50.0);
    item.set_top(Pt(5.0));
    let item = report.try_add_vertical(item, Pt(0.0)).unwrap_err();
    assert_eq!(item.top(), Pt(5.0));
    assert_eq!(report.page_count().total(), 1);
}

#[test]
fn headers_restack_at_the_top_of_every_new_page() {
    let mut report = Report::new(Pt(200.0), Pt(120.0));
    let header: Rc<dyn ReportItem> = Rc::new(Spacer::new(Pt(200.0), Pt(30.0)));

    report.add_vertical(Spacer::new(Pt(200.0), Pt(100.0)));
    assert!(report.add_vertical_paged(block(50.0), None, Some(&header)));

    let mut renderer = RecordingRenderer::new(Pt(200.0), Pt(120.0));
    report.print(&mut renderer).unwrap();

    // the item lands below the 30pt header on page 2
    let rects: Vec<(u32, f32)> = renderer
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Rect { page, y, .. } => Some((*page, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(rects, vec![(2, 30.0)]);
}

#[test]
fn page_number_tokens_resolve_against_the_final_total() {
    let mut report = Report::new(Pt(200.0), Pt(120.0));
    let footer: Rc<dyn ReportItem> = Rc::new(Text::with_page_count(
        &metrics(),
        Align::Left,
        format!("Page {} of {}", Text::PAGE_NUMBER, Text::TOTAL_PAGES),
        report.page_count(),
    ));

    assert!(!report.add_vertical_paged(block(50.0), Some(&footer), None));
    assert!(!report.add_vertical_paged(block(50.0), Some(&footer), None));
    assert!(report.add_vertical_paged(block(50.0), Some(&footer), None));

    let mut renderer = RecordingRenderer::new(Pt(200.0), Pt(120.0));
    report
        .add_footer_and_print(&footer, &mut renderer)
        .unwrap();

    let texts: Vec<(u32, String)> = renderer
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Text { page, content, .. } => Some((*page, content.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        texts,
        vec![
            (1, "Page 1 of 2".to_string()),
            (2, "Page 2 of 2".to_string()),
        ]
    );
}

#[test]
fn footers_sit_flush_with_the_bottom_of_the_page() {
    let mut report = Report::new(Pt(200.0), Pt(120.0));
    let footer: Rc<dyn ReportItem> = Rc::new(Text::new(&metrics(), "footer"));
    let footer_height = metrics().line_height();

    report.add_vertical(block(50.0));
    report.add_footer(&footer);

    let mut renderer = RecordingRenderer::new(Pt(200.0), Pt(120.0));
    report.print(&mut renderer).unwrap();

    let footer_y = renderer
        .ops
        .iter()
        .find_map(|op| match op {
            Op::Text { y, .. } => Some(*y),
            _ => None,
        })
        .unwrap();
    assert_eq!(footer_y, (Pt(120.0) - footer_height).0);
}

#[test]
fn printing_never_mutates_the_report() {
    let mut report = Report::new(Pt(200.0), Pt(120.0));
    let footer: Rc<dyn ReportItem> = Rc::new(Spacer::new(Pt(200.0), Pt(20.0)));
    for _ in 0..5 {
        report.add_vertical_paged(block(50.0), Some(&footer), None);
    }
    let total = report.page_count().total();

    let mut first = RecordingRenderer::new(Pt(200.0), Pt(120.0));
    report.print(&mut first).unwrap();
    let mut second = RecordingRenderer::new(Pt(200.0), Pt(120.0));
    report.print(&mut second).unwrap();

    assert_eq!(first.ops, second.ops);
    assert_eq!(report.page_count().total(), total);

    let breaks = first
        .ops
        .iter()
        .filter(|op| matches!(op, Op::NewPage))
        .count();
    assert_eq!(breaks as u32, total - 1);
}

#[test]
fn aligned_text_stays_inside_its_frame() {
    // "hello" measures 25pt; the explicit width leaves 75pt of slack
    let mut report = Report::new(Pt(200.0), Pt(120.0));
    report.add(Text::with_width(&metrics(), Pt(100.0), Align::Right, "hello"));
    report.add(Text::with_width(&metrics(), Pt(100.0), Align::Center, "hello"));
    // without an explicit width the frame hugs the text, so alignment
    // cannot move it
    report.add(Text::aligned(&metrics(), Align::Right, "hello"));

    let mut renderer = RecordingRenderer::new(Pt(200.0), Pt(120.0));
    report.print(&mut renderer).unwrap();

    let xs: Vec<f32> = renderer
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Text { x, .. } => Some(*x),
            _ => None,
        })
        .collect();
    assert_eq!(xs, vec![75.0, 37.5, 0.0]);
}

#[test]
fn fitted_blocks_keep_the_requested_width() {
    let block = TextLines::fit(&metrics(), "aa bb", Pt(100.0));
    assert_eq!(block.width(), Pt(100.0));

    // pre-split lines hug the widest of them
    let block = TextLines::new(&metrics(), vec!["aa", "bbbb"]);
    assert_eq!(block.width(), Pt(20.0));
}

#[test]
fn item_printing_leaves_renderer_state_balanced() {
    let mut renderer = RecordingRenderer::new(Pt(200.0), Pt(120.0));
    assert!(matches!(
        renderer.restore_state(),
        Err(ReportError::StateNotSaved)
    ));

    let mut text = Text::new(&metrics(), "hello");
    text.set_position(Pt(10.0), Pt(10.0));
    let mut report = Report::new(Pt(200.0), Pt(120.0));
    report.add(text);
    report.print(&mut renderer).unwrap();

    assert_eq!(renderer.state_depth(), 0);
    // cursor-neutral: the group put the cursor back where printing started
    assert_eq!(renderer.cursor(), (Pt(0.0), Pt(0.0)));
}
