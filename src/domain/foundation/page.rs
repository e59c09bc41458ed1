//! Cursor pagination primitives.
//!
//! All list-style reads paginate by monotonically increasing identifier
//! rather than offset, so pages stay stable under concurrent inserts.
//! `last_id = 0` means "from the start".

use serde::{Deserialize, Serialize};

/// Incoming scroll request: resume after `last_id`, return up to `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollQuery {
    /// Identifier of the last item the caller has seen; 0 for the start.
    pub last_id: i64,
    /// Maximum number of items to return.
    pub size: u32,
}

impl ScrollQuery {
    /// Creates a scroll query.
    pub fn new(last_id: i64, size: u32) -> Self {
        Self { last_id, size }
    }

    /// Scroll from the beginning.
    pub fn from_start(size: u32) -> Self {
        Self { last_id: 0, size }
    }

    /// Returns true when the caller is at the start of the sequence.
    pub fn is_first_page(&self) -> bool {
        self.last_id == 0
    }
}

/// One page of a cursor scroll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorPage<T> {
    /// Items in this page, in scroll order.
    pub items: Vec<T>,
    /// Whether more items follow this page.
    pub has_next: bool,
    /// Cursor for the next request; 0 when the page is empty.
    pub last_id: i64,
}

impl<T> CursorPage<T> {
    /// Builds a page from items plus the has-next flag, deriving the
    /// cursor with the supplied id accessor.
    pub fn new(items: Vec<T>, has_next: bool, id_of: impl Fn(&T) -> i64) -> Self {
        let last_id = items.last().map(&id_of).unwrap_or(0);
        Self {
            items,
            has_next,
            last_id,
        }
    }

    /// An empty page with no continuation.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_next: false,
            last_id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_query_from_start_has_zero_cursor() {
        let query = ScrollQuery::from_start(10);
        assert!(query.is_first_page());
        assert_eq!(query.size, 10);
    }

    #[test]
    fn cursor_page_derives_last_id_from_final_item() {
        let page = CursorPage::new(vec![3i64, 5, 9], true, |v| *v);
        assert_eq!(page.last_id, 9);
        assert!(page.has_next);
    }

    #[test]
    fn empty_cursor_page_has_zero_cursor() {
        let page: CursorPage<i64> = CursorPage::empty();
        assert_eq!(page.last_id, 0);
        assert!(!page.has_next);
        assert!(page.items.is_empty());
    }
}
