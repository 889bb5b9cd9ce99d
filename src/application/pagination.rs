//! Pagination with clamping semantics.
//!
//! Listing pages never fail on a bad page number: a missing, non-numeric or
//! zero page resolves to page 1, and a page past the end resolves to the
//! last page. Callers therefore always get a renderable page back.

use serde::{Deserialize, Serialize};

/// Default page size for question listings.
pub const QUESTIONS_PER_PAGE: u32 = 10;

/// Default page size for answers under a question.
pub const ANSWERS_PER_PAGE: u32 = 3;

/// Upper bound on caller-requested page sizes.
pub const MAX_PER_PAGE: u32 = 100;

/// Raw pagination input, as it arrives from a presentation layer.
///
/// `page` is kept as a string so that non-numeric input ("abc", "")
/// degrades to page 1 instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PageParams {
    /// The first page with default sizing.
    pub fn first() -> Self {
        Self::default()
    }

    /// A specific page number.
    pub fn page(n: u32) -> Self {
        Self {
            page: Some(n.to_string()),
            per_page: None,
        }
    }

    /// Raw, possibly non-numeric page input.
    pub fn raw(page: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
            per_page: None,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Resolves the raw input against a collection size.
    ///
    /// - non-numeric or zero page input clamps to page 1
    /// - a page beyond the last clamps to the last page
    /// - `per_page` falls back to `default_per_page` and is clamped to
    ///   `1..=MAX_PER_PAGE`
    pub fn resolve(&self, total_items: u64, default_per_page: u32) -> PageWindow {
        let per_page = self
            .per_page
            .unwrap_or(default_per_page)
            .clamp(1, MAX_PER_PAGE);

        let num_pages = (total_items.div_ceil(u64::from(per_page))).max(1) as u32;

        let requested = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);

        let page = requested.min(num_pages);

        PageWindow {
            page,
            per_page,
            num_pages,
            total_items,
        }
    }
}

/// A resolved, in-range page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub per_page: u32,
    pub num_pages: u32,
    pub total_items: u64,
}

impl PageWindow {
    /// SQL offset for this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    /// SQL limit for this page.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// One page of results plus position metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub num_pages: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: &PageWindow) -> Self {
        Self {
            items,
            page: window.page,
            per_page: window.per_page,
            num_pages: window.num_pages,
            total_items: window.total_items,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.num_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_page() {
        let window = PageParams::first().resolve(95, 10);
        assert_eq!(window.page, 1);
        assert_eq!(window.per_page, 10);
        assert_eq!(window.num_pages, 10);
        assert_eq!(window.offset(), 0);
        assert_eq!(window.limit(), 10);
    }

    #[test]
    fn test_specific_page_offsets() {
        let window = PageParams::page(3).resolve(95, 10);
        assert_eq!(window.page, 3);
        assert_eq!(window.offset(), 20);
    }

    #[test]
    fn test_page_zero_clamps_to_first() {
        let window = PageParams::page(0).resolve(25, 10);
        assert_eq!(window.page, 1);
    }

    #[test]
    fn test_non_numeric_page_clamps_to_first() {
        let window = PageParams::raw("abc").resolve(25, 10);
        assert_eq!(window.page, 1);

        let window = PageParams::raw("").resolve(25, 10);
        assert_eq!(window.page, 1);

        let window = PageParams::raw("-3").resolve(25, 10);
        assert_eq!(window.page, 1);
    }

    #[test]
    fn test_page_beyond_last_clamps_to_last() {
        // 25 items at 10 per page -> 3 pages
        let window = PageParams::page(9999).resolve(25, 10);
        assert_eq!(window.page, 3);
        assert_eq!(window.offset(), 20);
    }

    #[test]
    fn test_empty_collection_still_has_one_page() {
        let window = PageParams::page(5).resolve(0, 10);
        assert_eq!(window.page, 1);
        assert_eq!(window.num_pages, 1);
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn test_exact_multiple_has_no_phantom_page() {
        let window = PageParams::page(4).resolve(30, 10);
        assert_eq!(window.num_pages, 3);
        assert_eq!(window.page, 3);
    }

    #[test]
    fn test_per_page_is_clamped() {
        let window = PageParams::first().with_per_page(0).resolve(10, 10);
        assert_eq!(window.per_page, 1);

        let window = PageParams::first().with_per_page(10_000).resolve(10, 10);
        assert_eq!(window.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_page_navigation_flags() {
        let window = PageParams::page(2).resolve(25, 10);
        let page = Page::new(vec![1, 2, 3], &window);
        assert!(page.has_previous());
        assert!(page.has_next());

        let window = PageParams::page(3).resolve(25, 10);
        let page = Page::new(vec![1], &window);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_whitespace_padded_page_parses() {
        let window = PageParams::raw(" 2 ").resolve(25, 10);
        assert_eq!(window.page, 2);
    }
}
