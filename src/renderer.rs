use crate::colour::Colour;
use crate::image::Image;
use crate::metrics::FontMetrics;
use crate::units::Pt;
use crate::ReportError;
use std::rc::Rc;

/// How the interior and edge of a rectangle are painted
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawStyle {
    /// Stroke the edge at the current line width, leaving the interior
    /// untouched
    Outline,
    /// Flood the interior with the current colour
    Fill,
}

/// Corner rounding for [Renderer::draw_rect], one offset per corner.
///
/// Each offset is the perpendicular distance from the corner at which
/// that corner's curve is anchored; zero leaves the corner square.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: Pt,
    pub top_right: Pt,
    pub bottom_right: Pt,
    pub bottom_left: Pt,
}

impl CornerRadii {
    /// The same offset on all four corners
    pub fn all(offset: Pt) -> CornerRadii {
        CornerRadii {
            top_left: offset,
            top_right: offset,
            bottom_right: offset,
            bottom_left: offset,
        }
    }

    /// Square corners
    pub fn none() -> CornerRadii {
        CornerRadii::default()
    }

    pub fn is_rounded(&self) -> bool {
        self.top_left > Pt(0.0)
            || self.top_right > Pt(0.0)
            || self.bottom_right > Pt(0.0)
            || self.bottom_left > Pt(0.0)
    }
}

/// The drawing surface report items print themselves onto.
///
/// Coordinates are relative to the top-left corner of the page's usable
/// area (inside the margins), with y growing downward. The renderer keeps a
/// cursor; drawing operations start from it and most of them move it.
///
/// [PdfRenderer](crate::PdfRenderer) is the production implementation;
/// tests drive the report tree with lightweight stand-ins.
pub trait Renderer {
    /// The current cursor position, relative to the usable area's top-left
    /// corner
    fn cursor(&self) -> (Pt, Pt);

    /// Move the cursor to an absolute position within the usable area
    fn set_cursor(&mut self, x: Pt, y: Pt);

    /// Move the cursor relative to where it is now
    fn move_cursor(&mut self, dx: Pt, dy: Pt) {
        let (x, y) = self.cursor();
        self.set_cursor(x + dx, y + dy);
    }

    /// The width of the page inside the left and right margins
    fn usable_width(&self) -> Pt;

    /// The height of the page inside the top and bottom margins
    fn usable_height(&self) -> Pt;

    /// The 1-based number of the page currently being drawn
    fn page_number(&self) -> u32;

    /// Make `metrics` the active text state: face, size, line spacing, and
    /// the metrics' colour if one is set
    fn set_metrics(&mut self, metrics: &FontMetrics) -> Result<(), ReportError>;

    /// The active text state, if [set_metrics](Self::set_metrics) has been
    /// called
    fn metrics(&self) -> Option<&FontMetrics>;

    /// Set the colour used for text, lines, and fills
    fn set_colour(&mut self, colour: Colour);

    /// Set the stroke width for lines and outlined rectangles
    fn set_line_width(&mut self, width: Pt);

    fn line_width(&self) -> Pt;

    /// Push the current graphics state (colour, line width, text state)
    /// onto a stack
    fn save_state(&mut self);

    /// Restore the most recently saved graphics state. Fails if
    /// [save_state](Self::save_state) has not been called at least as many
    /// times.
    fn restore_state(&mut self) -> Result<(), ReportError>;

    /// How many saved states are waiting to be restored
    fn state_depth(&self) -> usize;

    /// Draw a single line of text at the cursor, anchored by its top-left
    /// corner, advancing the cursor by the text's width. Requires an active
    /// text state.
    fn draw_text(&mut self, text: &str) -> Result<(), ReportError>;

    /// Return the cursor to the left edge and move it down one line height
    /// of the active text state
    fn line_feed(&mut self) -> Result<(), ReportError>;

    /// Stroke a straight line from the cursor to the point `(dx, dy)` away,
    /// leaving the cursor at the far end
    fn draw_line(&mut self, dx: Pt, dy: Pt);

    /// Draw a rectangle with its top-left corner at the cursor, each corner
    /// rounded by its offset in `corners`. The cursor does not move.
    fn draw_rect(&mut self, width: Pt, height: Pt, style: DrawStyle, corners: CornerRadii);

    /// Draw an image with its top-left corner at the cursor, scaled to the
    /// given dimensions. The cursor does not move.
    fn draw_image(&mut self, image: &Rc<Image>, width: Pt, height: Pt);

    /// Finish the current page and start drawing on a fresh one. The cursor
    /// returns to the top-left corner and the page number advances.
    fn start_new_page(&mut self);
}
