use crate::renderer::Renderer;
use crate::units::Pt;
use crate::ReportError;
use std::rc::Rc;

/// The rectangle an item occupies within its parent: an offset from the
/// parent's top-left corner plus a size
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub left: Pt,
    pub top: Pt,
    pub width: Pt,
    pub height: Pt,
}

impl Frame {
    pub fn new(width: Pt, height: Pt) -> Frame {
        Frame {
            left: Pt(0.0),
            top: Pt(0.0),
            width,
            height,
        }
    }

    /// The right edge: `left + width`
    pub fn right(&self) -> Pt {
        self.left + self.width
    }

    /// The bottom edge: `top + height`
    pub fn bottom(&self) -> Pt {
        self.top + self.height
    }
}

/// A node in the report tree: anything with a frame that can print itself
/// through a [Renderer].
///
/// Items own their children; adding an item to a [Group](super::Group)
/// moves it in, so a given item has exactly one position in the tree. To
/// draw the same content at several places (a repeated footer, say), wrap
/// one item in a [Shared] handle per insertion point.
///
/// An item's frame is relative to its parent. When a parent prints a child
/// it first moves the renderer cursor to the child's position; leaf items
/// just draw at the cursor and never consult their own offsets.
pub trait ReportItem {
    fn frame(&self) -> &Frame;

    fn frame_mut(&mut self) -> &mut Frame;

    /// Draw this item at the renderer's cursor. Printing must not change
    /// the item; a report prints identically as many times as asked.
    fn print(&self, renderer: &mut dyn Renderer) -> Result<(), ReportError>;

    fn left(&self) -> Pt {
        self.frame().left
    }

    fn top(&self) -> Pt {
        self.frame().top
    }

    fn width(&self) -> Pt {
        self.frame().width
    }

    fn height(&self) -> Pt {
        self.frame().height
    }

    fn right(&self) -> Pt {
        self.frame().right()
    }

    fn bottom(&self) -> Pt {
        self.frame().bottom()
    }

    fn set_left(&mut self, left: Pt) {
        self.frame_mut().left = left;
    }

    fn set_top(&mut self, top: Pt) {
        self.frame_mut().top = top;
    }

    fn set_width(&mut self, width: Pt) {
        self.frame_mut().width = width;
    }

    fn set_height(&mut self, height: Pt) {
        self.frame_mut().height = height;
    }

    fn set_position(&mut self, left: Pt, top: Pt) {
        let frame = self.frame_mut();
        frame.left = left;
        frame.top = top;
    }

    /// Shift the item by the given amounts
    fn translate(&mut self, dx: Pt, dy: Pt) {
        let frame = self.frame_mut();
        frame.left += dx;
        frame.top += dy;
    }
}

/// A handle that lets one item appear at several places in the tree.
///
/// Each `Shared` has its own frame (initialised from the wrapped item's
/// size) but delegates drawing to the one shared item, so content built
/// once can repeat on every page. Clone it once per insertion point.
pub struct Shared {
    item: Rc<dyn ReportItem>,
    frame: Frame,
}

impl Shared {
    pub fn new(item: Rc<dyn ReportItem>) -> Shared {
        let frame = Frame::new(item.width(), item.height());
        Shared { item, frame }
    }
}

impl Clone for Shared {
    /// A fresh wrapper around the same item, with the position reset so
    /// the new insertion point places it independently
    fn clone(&self) -> Shared {
        Shared::new(self.item.clone())
    }
}

impl ReportItem for Shared {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn print(&self, renderer: &mut dyn Renderer) -> Result<(), ReportError> {
        self.item.print(renderer)
    }
}

/// An invisible item that only occupies space; use it to push subsequent
/// stacked items down or across
pub struct Spacer {
    frame: Frame,
}

impl Spacer {
    pub fn new(width: Pt, height: Pt) -> Spacer {
        Spacer {
            frame: Frame::new(width, height),
        }
    }
}

impl ReportItem for Spacer {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn print(&self, _renderer: &mut dyn Renderer) -> Result<(), ReportError> {
        Ok(())
    }
}
