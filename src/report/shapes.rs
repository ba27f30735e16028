use super::group::Group;
use super::item::{Frame, ReportItem};
use crate::colour::Colour;
use crate::page::Margins;
use crate::renderer::{CornerRadii, DrawStyle, Renderer};
use crate::units::Pt;
use crate::ReportError;

/// A straight line segment, expressed as the offset from its position to
/// its far end.
///
/// Perfectly horizontal or vertical lines are nudged by half the stroke
/// width before drawing, so a separator under a row of text starts exactly
/// at the position it was given instead of straddling it.
pub struct Line {
    frame: Frame,
    dx: Pt,
    dy: Pt,
    line_width: Option<Pt>,
    colour: Option<Colour>,
}

impl Line {
    pub fn new(dx: Pt, dy: Pt) -> Line {
        Line {
            frame: Frame::new(Pt(dx.0.abs()), Pt(dy.0.abs())),
            dx,
            dy,
            line_width: None,
            colour: None,
        }
    }

    /// A horizontal rule of the given length
    pub fn horizontal(length: Pt) -> Line {
        Line::new(length, Pt(0.0))
    }

    /// A vertical rule of the given length
    pub fn vertical(length: Pt) -> Line {
        Line::new(Pt(0.0), length)
    }

    pub fn set_line_width(&mut self, width: Pt) {
        self.line_width = Some(width);
        // a flat line still occupies the stroke's thickness
        if self.dy == Pt(0.0) {
            self.frame.height = width;
        }
        if self.dx == Pt(0.0) {
            self.frame.width = width;
        }
    }

    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = Some(colour);
    }
}

impl ReportItem for Line {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn print(&self, renderer: &mut dyn Renderer) -> Result<(), ReportError> {
        renderer.save_state();
        if let Some(colour) = self.colour {
            renderer.set_colour(colour);
        }
        if let Some(width) = self.line_width {
            renderer.set_line_width(width);
        }

        // keep flat lines inside their frame rather than straddling it
        let half = renderer.line_width() / 2.0;
        if self.dy == Pt(0.0) {
            renderer.move_cursor(Pt(0.0), half);
        } else if self.dx == Pt(0.0) {
            renderer.move_cursor(half, Pt(0.0));
        }
        renderer.draw_line(self.dx, self.dy);

        renderer.restore_state()
    }
}

/// A rectangle, outlined or filled, with optional rounded corners
pub struct RectItem {
    frame: Frame,
    style: DrawStyle,
    corners: CornerRadii,
    line_width: Option<Pt>,
    colour: Option<Colour>,
}

impl RectItem {
    pub fn new(width: Pt, height: Pt, style: DrawStyle) -> RectItem {
        RectItem {
            frame: Frame::new(width, height),
            style,
            corners: CornerRadii::none(),
            line_width: None,
            colour: None,
        }
    }

    /// Round each corner independently; the order is top-left, top-right,
    /// bottom-right, bottom-left
    pub fn set_corner_radii(&mut self, top_left: Pt, top_right: Pt, bottom_right: Pt, bottom_left: Pt) {
        self.corners = CornerRadii {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        };
    }

    /// Round all four corners by the same offset
    pub fn set_corner_radius(&mut self, radius: Pt) {
        self.corners = CornerRadii::all(radius);
    }

    pub fn set_line_width(&mut self, width: Pt) {
        self.line_width = Some(width);
    }

    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = Some(colour);
    }

    /// Wrap `item` in this rectangle with `padding` on every side; see
    /// [enclose_padded](Self::enclose_padded)
    pub fn enclose<I: ReportItem + 'static>(self, padding: Pt, item: I) -> Group {
        self.enclose_padded(Margins::all(padding), item)
    }

    /// Wrap `item` in this rectangle with per-side padding, returning a
    /// group containing both. An outlined rectangle also reserves room for
    /// its own stroke so the border never overlaps the content, and the
    /// item's own position survives as an extra inset.
    pub fn enclose_padded<I: ReportItem + 'static>(mut self, padding: Margins, mut item: I) -> Group {
        let stroke = match self.style {
            DrawStyle::Outline => self.line_width.unwrap_or(Pt(1.0)),
            DrawStyle::Fill => Pt(0.0),
        };
        item.translate(padding.left + stroke, padding.top + stroke);
        self.frame.width = item.right() + padding.right + stroke;
        self.frame.height = item.bottom() + padding.bottom + stroke;
        self.frame.left = Pt(0.0);
        self.frame.top = Pt(0.0);

        let mut group = Group::new();
        group.add(self);
        group.add(item);
        group
    }
}

impl ReportItem for RectItem {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn print(&self, renderer: &mut dyn Renderer) -> Result<(), ReportError> {
        renderer.save_state();
        if let Some(colour) = self.colour {
            renderer.set_colour(colour);
        }
        if let Some(width) = self.line_width {
            renderer.set_line_width(width);
        }
        renderer.draw_rect(self.frame.width, self.frame.height, self.style, self.corners);
        renderer.restore_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclose_sizes_the_rect_around_the_item() {
        let mut rect = RectItem::new(Pt(0.0), Pt(0.0), DrawStyle::Outline);
        rect.set_line_width(Pt(2.0));
        let group = rect.enclose(Pt(3.0), super::super::Spacer::new(Pt(50.0), Pt(20.0)));

        // 50 + 2 * (3 padding + 2 stroke)
        assert_eq!(group.width(), Pt(60.0));
        assert_eq!(group.height(), Pt(30.0));
        // the item sits inside padding and stroke
        assert_eq!(group.last().unwrap().left(), Pt(5.0));
        assert_eq!(group.last().unwrap().top(), Pt(5.0));
    }

    #[test]
    fn per_side_padding_offsets_the_enclosed_item() {
        let mut rect = RectItem::new(Pt(0.0), Pt(0.0), DrawStyle::Outline);
        rect.set_line_width(Pt(1.0));
        let group = rect.enclose_padded(
            Margins::trbl(Pt(2.0), Pt(4.0), Pt(6.0), Pt(8.0)),
            super::super::Spacer::new(Pt(50.0), Pt(20.0)),
        );

        let item = group.last().unwrap();
        assert_eq!(item.left(), Pt(9.0));
        assert_eq!(item.top(), Pt(3.0));
        // left inset + 50 + right padding + stroke
        assert_eq!(group.width(), Pt(64.0));
        assert_eq!(group.height(), Pt(30.0));
    }
}
