use crate::pagesize::{PageSize, LETTER};
use crate::units::Pt;

/// Margins are the blank space between the page edges and the usable content
/// area. All layout coordinates in a report are relative to the top-left
/// corner of the area bounded by the margins, never the page itself.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise
    /// fashion starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and
    /// bottom) and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::default()
    }
}

/// Page size and margin settings for a document. The usable area (the page
/// minus all four margins) is what pagination decisions are measured
/// against, and is the coordinate space every renderer cursor position is
/// expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSettings {
    size: PageSize,
    margins: Margins,
}

impl PageSettings {
    /// Page settings with the given size and no margins
    pub fn new(size: PageSize) -> PageSettings {
        PageSettings {
            size,
            margins: Margins::empty(),
        }
    }

    /// Page settings with the given size and margins
    pub fn with_margins(size: PageSize, margins: Margins) -> PageSettings {
        PageSettings { size, margins }
    }

    /// Replace the margins, keeping the page size
    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Total page width, including margin space
    pub fn total_width(&self) -> Pt {
        self.size.0
    }

    /// Total page height, including margin space
    pub fn total_height(&self) -> Pt {
        self.size.1
    }

    /// The usable width, i.e. the distance between the left and right margins
    pub fn usable_width(&self) -> Pt {
        self.size.0 - self.margins.left - self.margins.right
    }

    /// The usable height, i.e. the distance between the top and bottom margins
    pub fn usable_height(&self) -> Pt {
        self.size.1 - self.margins.top - self.margins.bottom
    }
}

impl Default for PageSettings {
    /// Letter-sized portrait pages with no margins
    fn default() -> PageSettings {
        PageSettings::new(LETTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    #[test]
    fn usable_area_subtracts_all_four_margins() {
        let settings = PageSettings::with_margins(
            pagesize::LETTER,
            Margins::trbl(Pt(10.0), Pt(20.0), Pt(30.0), Pt(40.0)),
        );
        assert_eq!(settings.usable_width(), Pt(8.5 * 72.0 - 60.0));
        assert_eq!(settings.usable_height(), Pt(11.0 * 72.0 - 40.0));
    }

    #[test]
    fn empty_margins_leave_the_full_page() {
        let settings = PageSettings::new(pagesize::A4);
        assert_eq!(settings.usable_width(), settings.total_width());
        assert_eq!(settings.usable_height(), settings.total_height());
    }
}
