mod colour;
pub use colour::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

mod metrics;
pub use metrics::*;

mod page;
pub use page::*;

/// Pre-defined page sizes for common paper formats
pub mod pagesize;
pub use pagesize::*;

mod pdf;
pub use pdf::*;

pub(crate) mod refs;

mod renderer;
pub use renderer::*;

/// The report tree: items, groups, and the paginating report root
pub mod report;
pub use report::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom content generation
pub use pdf_writer;
