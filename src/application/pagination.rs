//! Page-window arithmetic for the fixed-size catalog listing.

/// Entries per page. A fetched page shorter than this ends pagination
/// for its filter key.
pub const PAGE_SIZE: usize = 20;

/// Half-open `[start, end)` window selecting one page of store results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn for_page(page: u32) -> Self {
        let start = page as usize * PAGE_SIZE;
        Self {
            start,
            end: start + PAGE_SIZE,
        }
    }
}

/// Continuation after a page of `last_len` entries arrived, with
/// `fetched_pages` pages now held for the key.
///
/// A short page means the window reached past the end of the result
/// set; otherwise the next index equals the number of pages fetched.
pub fn next_page_after(fetched_pages: usize, last_len: usize) -> Option<u32> {
    if last_len < PAGE_SIZE {
        None
    } else {
        Some(fetched_pages as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_are_half_open_and_contiguous() {
        assert_eq!(PageWindow::for_page(0), PageWindow { start: 0, end: 20 });
        assert_eq!(PageWindow::for_page(1), PageWindow { start: 20, end: 40 });
        assert_eq!(
            PageWindow::for_page(2).start,
            PageWindow::for_page(1).end
        );
    }

    #[test]
    fn full_page_continues_at_the_page_count() {
        assert_eq!(next_page_after(1, PAGE_SIZE), Some(1));
        assert_eq!(next_page_after(3, PAGE_SIZE), Some(3));
    }

    #[test]
    fn short_page_ends_pagination() {
        assert_eq!(next_page_after(3, 5), None);
        assert_eq!(next_page_after(1, 0), None);
    }
}
