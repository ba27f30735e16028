//! Builds a multi-page report with a repeated header and a "page N of M"
//! footer, then writes it to `paginated-report.pdf`.
//!
//! Usage: cargo run --example paginated-report -- path/to/font.ttf

use pdf_report::report::{Align, Group, Line, ReportItem, Report, Shared, Text, TextLines};
use pdf_report::{
    colours, Font, FontMetrics, Margins, PageSettings, PdfRenderer, Pt, pagesize, Info,
};
use std::rc::Rc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let font_path = std::env::args()
        .nth(1)
        .ok_or("usage: paginated-report <font.ttf>")?;
    let font = Rc::new(Font::load(std::fs::read(font_path)?)?);

    let settings = PageSettings::with_margins(pagesize::A4, Margins::all(Pt(54.0)));

    let body = FontMetrics::new(font.clone(), Pt(11.0));
    let mut small = FontMetrics::new(font.clone(), Pt(8.0));
    small.set_colour(colours::BLUE);
    let mut heading = FontMetrics::new(font, Pt(18.0));
    heading.set_colour(colours::RED);

    let mut report = Report::with_settings(settings);

    // one header item, restacked at the top of every page
    let header: Rc<dyn ReportItem> = Rc::new({
        let mut group = Group::new();
        group.add(Text::new(&heading, "Quarterly Summary"));
        let mut rule = Line::horizontal(settings.usable_width());
        rule.set_top(Pt(4.0));
        group.add_vertical(rule);
        // breathing room below the rule
        group.add_vertical(pdf_report::report::Spacer::new(Pt(0.0), Pt(10.0)));
        group
    });

    let footer: Rc<dyn ReportItem> = Rc::new(Text::with_page_count(
        &small,
        Align::Left,
        format!("Page {} of {}", Text::PAGE_NUMBER, Text::TOTAL_PAGES),
        report.page_count(),
    ));

    report.add_vertical(Shared::new(header.clone()));
    for paragraph in 0..24 {
        let text = lipsum::lipsum_words_from_seed(48, paragraph);
        let mut block = TextLines::fit(&body, &text, settings.usable_width());
        block.set_top(Pt(8.0));
        report.add_vertical_paged(block, Some(&footer), Some(&header));
    }

    let mut renderer = PdfRenderer::new(settings);
    let mut info = Info::new();
    info.title("Quarterly Summary").author("pdf-report demo");
    renderer.set_info(info);

    report.add_footer_and_print(&footer, &mut renderer)?;

    let file = std::fs::File::create("paginated-report.pdf")?;
    renderer.write(file)?;
    println!("wrote paginated-report.pdf");
    Ok(())
}
