use super::item::{Frame, ReportItem};
use crate::renderer::Renderer;
use crate::units::Pt;
use crate::ReportError;

/// Horizontal anchor for [Group::add_aligned]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor for [Group::add_aligned]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// An ordered collection of items positioned relative to the group's own
/// top-left corner.
///
/// A group's size only ever grows: every added item expands the group just
/// enough to contain it, and an explicitly set size acts as a starting
/// minimum (useful for anchoring items against a known right or bottom
/// edge before anything else is added).
///
/// Groups are themselves items, so trees nest arbitrarily deep.
#[derive(Default)]
pub struct Group {
    frame: Frame,
    items: Vec<Box<dyn ReportItem>>,
}

impl Group {
    pub fn new() -> Group {
        Group::default()
    }

    /// A group pre-sized to the given dimensions; items can still grow it
    pub fn with_size(width: Pt, height: Pt) -> Group {
        Group {
            frame: Frame::new(width, height),
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The most recently added item; vertical and horizontal stacking
    /// chain from it
    pub fn last(&self) -> Option<&dyn ReportItem> {
        self.items.last().map(|item| item.as_ref())
    }

    fn expand_to_fit(&mut self, item: &dyn ReportItem) {
        self.frame.width = self.frame.width.max(item.right());
        self.frame.height = self.frame.height.max(item.bottom());
    }

    /// Add an item at the position already set on it, growing the group
    /// to contain it
    pub fn add<I: ReportItem + 'static>(&mut self, item: I) {
        self.add_boxed(Box::new(item));
    }

    pub(crate) fn add_boxed(&mut self, item: Box<dyn ReportItem>) {
        self.expand_to_fit(item.as_ref());
        self.items.push(item);
    }

    /// Add an item below the previously added one. The item's own top
    /// offset is kept as extra space between the two, and its left offset
    /// positions it horizontally as usual.
    pub fn add_vertical<I: ReportItem + 'static>(&mut self, item: I) {
        self.add_vertical_boxed(Box::new(item));
    }

    pub(crate) fn add_vertical_boxed(&mut self, mut item: Box<dyn ReportItem>) {
        if let Some(last) = self.last() {
            let top = item.top() + last.bottom();
            item.set_top(top);
        }
        self.add_boxed(item);
    }

    /// Add an item to the right of the previously added one; the item's
    /// own left offset is kept as extra space between the two
    pub fn add_horizontal<I: ReportItem + 'static>(&mut self, mut item: I) {
        if let Some(last) = self.last() {
            let left = item.left() + last.right();
            item.set_left(left);
        }
        self.add_boxed(Box::new(item));
    }

    /// Add an item below the previous one, flush against the group's
    /// current right edge
    pub fn add_vertical_right<I: ReportItem + 'static>(&mut self, mut item: I) {
        item.set_left(self.frame.width - item.width());
        self.add_vertical(item);
    }

    /// Add an item below the previous one, centred on the group's current
    /// width
    pub fn add_vertical_center<I: ReportItem + 'static>(&mut self, mut item: I) {
        item.set_left((self.frame.width - item.width()) / 2.0);
        self.add_vertical(item);
    }

    /// Add an item anchored within the group's current bounds. The anchor
    /// delta is applied on top of any position already set on the item,
    /// so a small offset can nudge an anchored item.
    pub fn add_aligned<I: ReportItem + 'static>(&mut self, mut item: I, h: HAlign, v: VAlign) {
        let dx = match h {
            HAlign::Left => Pt(0.0),
            HAlign::Center => (self.frame.width - item.width()) / 2.0,
            HAlign::Right => self.frame.width - item.width(),
        };
        let dy = match v {
            VAlign::Top => Pt(0.0),
            VAlign::Middle => (self.frame.height - item.height()) / 2.0,
            VAlign::Bottom => self.frame.height - item.height(),
        };
        item.translate(dx, dy);
        self.add_boxed(Box::new(item));
    }
}

impl ReportItem for Group {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    /// Print every child at its offset from the cursor, in insertion
    /// order, leaving the cursor where it started
    fn print(&self, renderer: &mut dyn Renderer) -> Result<(), ReportError> {
        let origin = renderer.cursor();
        for item in self.items.iter() {
            renderer.set_cursor(origin.0 + item.left(), origin.1 + item.top());
            item.print(renderer)?;
        }
        renderer.set_cursor(origin.0, origin.1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Spacer;

    #[test]
    fn bounds_grow_to_contain_every_item() {
        let mut group = Group::new();
        group.add(Spacer::new(Pt(40.0), Pt(10.0)));
        assert_eq!(group.width(), Pt(40.0));
        assert_eq!(group.height(), Pt(10.0));

        let mut wide = Spacer::new(Pt(30.0), Pt(5.0));
        wide.set_position(Pt(25.0), Pt(2.0));
        group.add(wide);
        assert_eq!(group.width(), Pt(55.0));
        assert_eq!(group.height(), Pt(10.0));
    }

    #[test]
    fn bounds_never_shrink() {
        let mut group = Group::with_size(Pt(100.0), Pt(100.0));
        group.add(Spacer::new(Pt(10.0), Pt(10.0)));
        assert_eq!(group.width(), Pt(100.0));
        assert_eq!(group.height(), Pt(100.0));
    }

    #[test]
    fn vertical_stacking_chains_from_the_last_bottom_edge() {
        let mut group = Group::new();
        group.add(Spacer::new(Pt(10.0), Pt(20.0)));

        let mut gapped = Spacer::new(Pt(10.0), Pt(20.0));
        gapped.set_top(Pt(5.0));
        group.add_vertical(gapped);

        // the item's own top becomes a gap below the previous bottom
        assert_eq!(group.last().unwrap().top(), Pt(25.0));
        assert_eq!(group.height(), Pt(45.0));
    }

    #[test]
    fn first_vertical_item_keeps_its_own_position() {
        let mut group = Group::new();
        let mut item = Spacer::new(Pt(10.0), Pt(20.0));
        item.set_top(Pt(7.0));
        group.add_vertical(item);
        assert_eq!(group.last().unwrap().top(), Pt(7.0));
    }

    #[test]
    fn horizontal_stacking_chains_from_the_last_right_edge() {
        let mut group = Group::new();
        group.add(Spacer::new(Pt(30.0), Pt(10.0)));
        group.add_horizontal(Spacer::new(Pt(30.0), Pt(10.0)));
        assert_eq!(group.last().unwrap().left(), Pt(30.0));
        assert_eq!(group.width(), Pt(60.0));
    }

    #[test]
    fn aligned_items_anchor_within_the_current_bounds() {
        let mut group = Group::with_size(Pt(100.0), Pt(50.0));
        group.add_aligned(Spacer::new(Pt(20.0), Pt(10.0)), HAlign::Right, VAlign::Bottom);
        let last = group.last().unwrap();
        assert_eq!(last.left(), Pt(80.0));
        assert_eq!(last.top(), Pt(40.0));

        group.add_aligned(
            Spacer::new(Pt(20.0), Pt(10.0)),
            HAlign::Center,
            VAlign::Middle,
        );
        let last = group.last().unwrap();
        assert_eq!(last.left(), Pt(40.0));
        assert_eq!(last.top(), Pt(20.0));
    }
}
