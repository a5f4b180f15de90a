//! Pagination of a derived listing.

use serde::{Deserialize, Serialize};

/// Products shown per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Number of pages needed for `len` items. Zero for an empty list or a zero
/// page size.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// The half-open slice `[(page-1)*page_size, page*page_size)` of `items`.
///
/// Pages are 1-based. Page 0, a zero page size, and pages past the end all
/// give an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Pagination info for the pager widget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    pub page_size: usize,
    /// Total number of items across all pages.
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let total_pages = total_pages(total, page_size);
        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Page numbers for display, centred on the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }
        if max_visible == 0 {
            return Vec::new();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// 1-indexed number of the first item shown, 0 when nothing is shown.
    pub fn start_item(&self) -> usize {
        if self.page == 0 || self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// 1-indexed number of the last item shown, 0 when nothing is shown.
    pub fn end_item(&self) -> usize {
        if self.start_item() == 0 {
            0
        } else {
            self.page.saturating_mul(self.page_size).min(self.total)
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}

/// One page of a listing together with its pager info.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductPage<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Clone> ProductPage<T> {
    /// Slice page `page` out of `items`.
    pub fn from_slice(items: &[T], page: usize, page_size: usize) -> Self {
        Self {
            items: paginate(items, page, page_size).to_vec(),
            pagination: Pagination::new(page, page_size, items.len()),
        }
    }
}

impl<T> ProductPage<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_five_items_three_pages() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(total_pages(items.len(), 12), 3);
        assert_eq!(paginate(&items, 1, 12).len(), 12);
        assert_eq!(paginate(&items, 3, 12), &[25]);
        assert!(paginate(&items, 4, 12).is_empty());
    }

    #[test]
    fn test_degenerate_pages_are_empty() {
        let items: Vec<u32> = (1..=5).collect();
        assert!(paginate(&items, 0, 12).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
        assert!(paginate(&items, usize::MAX, 12).is_empty());
        assert_eq!(total_pages(5, 0), 0);
        assert_eq!(total_pages(0, 12), 0);
    }

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_first_and_last() {
        let first = Pagination::new(1, 10, 45);
        assert!(first.is_first());
        assert!(!first.has_prev);

        let last = Pagination::new(5, 10, 45);
        assert!(last.is_last());
        assert!(!last.has_next);
    }

    #[test]
    fn test_pagination_empty_listing() {
        let p = Pagination::new(1, 12, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
        assert!(p.page_numbers(5).is_empty());
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let near_end = Pagination::new(10, 10, 100);
        assert_eq!(near_end.page_numbers(5), vec![6, 7, 8, 9, 10]);

        let near_start = Pagination::new(1, 10, 100);
        assert_eq!(near_start.page_numbers(5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_pagination_item_range() {
        let p = Pagination::new(3, 12, 25);
        assert_eq!(p.start_item(), 25);
        assert_eq!(p.end_item(), 25);

        let past_end = Pagination::new(4, 12, 25);
        assert_eq!(past_end.start_item(), 0);
    }

    #[test]
    fn test_product_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = ProductPage::from_slice(&items, 2, 12);
        assert_eq!(page.len(), 12);
        assert_eq!(page.items[0], 13);
        assert_eq!(page.pagination.total, 25);
    }
}
