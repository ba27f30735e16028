use super::group::Group;
use super::item::{Frame, ReportItem, Shared};
use super::page_count::PageCount;
use crate::page::PageSettings;
use crate::renderer::Renderer;
use crate::units::Pt;
use crate::ReportError;
use derive_more::{Deref, DerefMut};
use std::rc::Rc;

/// A marker that ends the current page when printed. Zero-sized and added
/// without stacking, so items stacked after it start from the top of the
/// new page.
#[derive(Default)]
struct PageBreak {
    frame: Frame,
}

impl ReportItem for PageBreak {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn print(&self, renderer: &mut dyn Renderer) -> Result<(), ReportError> {
        renderer.start_new_page();
        Ok(())
    }
}

/// The root of a report: a [Group] plus the page geometry and page counter
/// that make pagination decisions possible.
///
/// A report is used in two phases. First the whole tree is built, with
/// [add_vertical_paged](Report::add_vertical_paged) (or explicit
/// [new_page](Report::new_page) calls) breaking pages as content runs out
/// of room; the page counter tracks the breaks as they happen. Only then
/// is the finished tree printed, which is what lets content on the first
/// page refer to the total page count. Printing never mutates the tree, so
/// a built report prints identically any number of times.
///
/// `Report` dereferences to its root [Group], so all the group stacking
/// operations are available directly on it.
#[derive(Deref, DerefMut)]
pub struct Report {
    #[deref]
    #[deref_mut]
    group: Group,
    settings: PageSettings,
    page_count: Rc<PageCount>,
}

impl Report {
    /// A report on pages of the given usable size, with no margins
    pub fn new(width: Pt, height: Pt) -> Report {
        Report::with_settings(PageSettings::new((width, height)))
    }

    pub fn with_settings(settings: PageSettings) -> Report {
        Report {
            group: Group::new(),
            settings,
            page_count: Rc::new(PageCount::new()),
        }
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    /// The shared page counter; hand clones of this to items that print
    /// page numbers
    pub fn page_count(&self) -> Rc<PageCount> {
        self.page_count.clone()
    }

    /// End the current page unconditionally and count the break
    pub fn new_page(&mut self) {
        self.group.add(PageBreak::default());
        self.page_count.increment();
    }

    /// Whether `item` can stack below the current content without
    /// overrunning the page, keeping `reserved_footer` points free at the
    /// bottom. An empty page always fits.
    pub fn fits_vertical(&self, item: &dyn ReportItem, reserved_footer: Pt) -> bool {
        match self.group.last() {
            None => true,
            Some(last) => {
                last.bottom() + item.bottom() + item.top() + reserved_footer
                    <= self.settings.usable_height()
            }
        }
    }

    /// Stack `item` below the current content if it fits, handing it back
    /// unchanged if it does not
    pub fn try_add_vertical<I: ReportItem + 'static>(
        &mut self,
        item: I,
        reserved_footer: Pt,
    ) -> Result<(), I> {
        if self.fits_vertical(&item, reserved_footer) {
            self.group.add_vertical(item);
            Ok(())
        } else {
            Err(item)
        }
    }

    /// Stack `item` below the current content, breaking to a new page
    /// first when it does not fit. On a break the current page's footer is
    /// placed, the counter advances, and the header (if any) is restacked
    /// at the top of the new page before the item. Returns whether a break
    /// happened.
    pub fn add_vertical_paged<I: ReportItem + 'static>(
        &mut self,
        item: I,
        footer: Option<&Rc<dyn ReportItem>>,
        header: Option<&Rc<dyn ReportItem>>,
    ) -> bool {
        let reserved = footer.map(|f| f.height()).unwrap_or(Pt(0.0));
        match self.try_add_vertical(item, reserved) {
            Ok(()) => false,
            Err(item) => {
                if let Some(footer) = footer {
                    self.add_footer(footer);
                }
                self.new_page();
                if let Some(header) = header {
                    self.group.add_vertical(Shared::new(header.clone()));
                }
                self.group.add_vertical(item);
                true
            }
        }
    }

    /// Place a footer flush against the bottom of the current page. No fit
    /// check is made; reserve the footer's height when stacking page
    /// content instead. The footer does not take part in vertical
    /// stacking, so only call this when the page is otherwise complete.
    pub fn add_footer(&mut self, footer: &Rc<dyn ReportItem>) {
        let mut wrapper = Shared::new(footer.clone());
        wrapper.set_top(self.settings.usable_height() - wrapper.height());
        self.group.add_boxed(Box::new(wrapper));
    }

    /// Place the final page's footer and print the whole report
    pub fn add_footer_and_print(
        &mut self,
        footer: &Rc<dyn ReportItem>,
        renderer: &mut dyn Renderer,
    ) -> Result<(), ReportError> {
        self.add_footer(footer);
        self.print(renderer)
    }

    /// Print the whole report from the top-left corner of the renderer's
    /// first page
    pub fn print(&self, renderer: &mut dyn Renderer) -> Result<(), ReportError> {
        renderer.set_cursor(Pt(0.0), Pt(0.0));
        self.group.print(renderer)
    }
}
