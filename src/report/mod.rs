//! The retained-mode report tree: positioned items, stacking groups, and
//! the paginating [Report] root.
//!
//! Build the whole tree first, then print it; see [Report] for the
//! two-phase flow.

mod group;
mod image;
mod item;
mod page_count;
mod report;
mod shapes;
mod text;

pub use group::{Group, HAlign, VAlign};
pub use image::ImageItem;
pub use item::{Frame, ReportItem, Shared, Spacer};
pub use page_count::PageCount;
pub use report::Report;
pub use shapes::{Line, RectItem};
pub use text::{Align, Text, TextLines};
