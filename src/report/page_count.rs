use std::cell::Cell;

/// A page counter shared between the build phase (which increments it at
/// every page break) and the items that print page numbers.
///
/// Because the whole report is built before anything is printed, the
/// counter holds the final total by print time; that is what lets a
/// "page N of M" footer on page one know the value of M. Share it with
/// `Rc<PageCount>`.
#[derive(Debug)]
pub struct PageCount {
    count: Cell<u32>,
}

impl PageCount {
    /// A new counter; a report has one page before any breaks
    pub fn new() -> PageCount {
        PageCount {
            count: Cell::new(1),
        }
    }

    /// Record a page break, returning the new total
    pub fn increment(&self) -> u32 {
        let next = self.count.get() + 1;
        self.count.set(next);
        next
    }

    /// The number of pages counted so far; after the build phase this is
    /// the document total
    pub fn total(&self) -> u32 {
        self.count.get()
    }
}

impl Default for PageCount {
    fn default() -> PageCount {
        PageCount::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_and_counts_breaks() {
        let count = PageCount::new();
        assert_eq!(count.total(), 1);
        assert_eq!(count.increment(), 2);
        assert_eq!(count.increment(), 3);
        assert_eq!(count.total(), 3);
    }
}
