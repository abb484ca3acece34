//! Page slicing for ordered listings.
//!
//! Every listing route shows `POSTS_PER_PAGE` posts per page, selected by a
//! 1-based `?page=` query parameter. The input sequence is expected to be
//! sorted already (reverse-chronological for posts); this module only slices
//! and reports position metadata.

use serde::Serialize;

/// Number of posts shown on each listing page.
pub const POSTS_PER_PAGE: usize = 10;

/// One page of an ordered listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based index of this page.
    pub number: usize,
    /// Total page count; at least 1 even for an empty listing.
    pub total_pages: usize,
    /// Item count across all pages.
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn previous_number(&self) -> usize {
        self.number.saturating_sub(1).max(1)
    }

    pub fn next_number(&self) -> usize {
        (self.number + 1).min(self.total_pages)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice an ordered collection into one page.
///
/// A page index below 1 is treated as 1. An index past the last page yields
/// an empty page with intact metadata, never an error, so listing URLs can be
/// probed freely.
pub fn paginate<T>(items: Vec<T>, page_size: usize, number: usize) -> Page<T> {
    assert!(page_size > 0, "page size must be positive");

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let number = number.max(1);

    let start = (number - 1).saturating_mul(page_size);
    let page_items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    Page {
        items: page_items,
        number,
        total_pages,
        total_items,
    }
}

/// Parse a `?page=` query value. Absent, malformed, or non-positive values
/// all fall back to the first page.
pub fn page_number(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn splits_24_items_into_10_10_4() {
        let p1 = paginate(numbers(24), 10, 1);
        let p2 = paginate(numbers(24), 10, 2);
        let p3 = paginate(numbers(24), 10, 3);

        assert_eq!(p1.len(), 10);
        assert_eq!(p2.len(), 10);
        assert_eq!(p3.len(), 4);
        assert_eq!(p1.total_pages, 3);
        assert_eq!(p3.total_items, 24);
    }

    #[test]
    fn exact_multiple_fills_last_page() {
        let p2 = paginate(numbers(20), 10, 2);
        assert_eq!(p2.len(), 10);
        assert_eq!(p2.total_pages, 2);
        assert!(!p2.has_next());
    }

    #[test]
    fn preserves_input_order() {
        let page = paginate(numbers(24), 10, 2);
        assert_eq!(page.items, (10..20).collect::<Vec<_>>());
    }

    #[test]
    fn page_past_the_end_is_empty_not_an_error() {
        let page = paginate(numbers(24), 10, 99);
        assert!(page.is_empty());
        assert_eq!(page.number, 99);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 24);
    }

    #[test]
    fn page_zero_clamps_to_first() {
        let page = paginate(numbers(24), 10, 0);
        assert_eq!(page.number, 1);
        assert_eq!(page.len(), 10);
    }

    #[test]
    fn empty_collection_still_has_one_page() {
        let page = paginate(Vec::<usize>::new(), 10, 1);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn previous_and_next_flags() {
        let p1 = paginate(numbers(24), 10, 1);
        let p2 = paginate(numbers(24), 10, 2);
        let p3 = paginate(numbers(24), 10, 3);

        assert!(!p1.has_previous() && p1.has_next());
        assert!(p2.has_previous() && p2.has_next());
        assert!(p3.has_previous() && !p3.has_next());
        assert_eq!(p2.previous_number(), 1);
        assert_eq!(p2.next_number(), 3);
    }

    #[test]
    fn page_number_falls_back_to_one() {
        assert_eq!(page_number(None), 1);
        assert_eq!(page_number(Some("")), 1);
        assert_eq!(page_number(Some("abc")), 1);
        assert_eq!(page_number(Some("0")), 1);
        assert_eq!(page_number(Some("-3")), 1);
        assert_eq!(page_number(Some("2")), 2);
    }
}
