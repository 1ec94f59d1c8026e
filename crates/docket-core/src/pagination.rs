//! Pagination rules shared by the store, the cache keys and the API.

use serde::{Deserialize, Serialize};

/// A normalized, 1-based request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed, never zero).
    pub page: u32,
    /// The number of items per page, within `[1, MAX_SIZE]`.
    pub page_size: u32,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: u32 = 10;
    /// The maximum allowed page size.
    pub const MAX_SIZE: u32 = 100;

    /// Creates a page request from raw caller input.
    ///
    /// A missing or non-positive page becomes 1. A missing, zero or negative
    /// page size becomes [`Self::DEFAULT_SIZE`]; anything above
    /// [`Self::MAX_SIZE`] is clamped down to it.
    #[must_use]
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => u32::try_from(p).unwrap_or(u32::MAX),
            _ => 1,
        };
        let page_size = match page_size {
            Some(s) if s > i64::from(Self::MAX_SIZE) => Self::MAX_SIZE,
            Some(s) if s >= 1 => u32::try_from(s).unwrap_or(Self::DEFAULT_SIZE),
            _ => Self::DEFAULT_SIZE,
        };
        Self { page, page_size }
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }
}

/// Number of pages needed to hold `total` items, rounding up.
///
/// Zero items yield zero pages.
#[must_use]
pub const fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let req = PageRequest::new(None, None);
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, PageRequest::DEFAULT_SIZE);
    }

    #[test]
    fn test_page_request_clamps_page() {
        assert_eq!(PageRequest::new(Some(0), None).page, 1);
        assert_eq!(PageRequest::new(Some(-4), None).page, 1);
        assert_eq!(PageRequest::new(Some(3), None).page, 3);
    }

    #[test]
    fn test_page_request_clamps_size() {
        assert_eq!(PageRequest::new(None, Some(150)).page_size, 100);
        assert_eq!(PageRequest::new(None, Some(0)).page_size, 10);
        assert_eq!(PageRequest::new(None, Some(-5)).page_size, 10);
        assert_eq!(PageRequest::new(None, Some(1)).page_size, 1);
        assert_eq!(PageRequest::new(None, Some(100)).page_size, 100);
    }

    #[test]
    fn test_page_request_offset_calculation() {
        assert_eq!(PageRequest::new(Some(1), Some(20)).offset(), 0);
        assert_eq!(PageRequest::new(Some(2), Some(20)).offset(), 20);
        assert_eq!(PageRequest::new(Some(5), Some(15)).offset(), 60);
        assert_eq!(PageRequest::new(Some(2), Some(10)).limit(), 10);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(15, 10), 2);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 5), 3);
        assert_eq!(total_pages(0, 10), 0);
    }
}
