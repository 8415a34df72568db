//! Page bounds and page envelopes shared by catalog and lead listings.

use serde::Serialize;

/// Default page size for catalog listings.
pub const DEFAULT_PRODUCTS_PER_PAGE: usize = 12;
/// Default page size for lead listings.
pub const DEFAULT_LEADS_PER_PAGE: usize = 20;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Raises `page` and `limit` to at least 1.
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Number of records preceding this page.
    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `OFFSET` and `LIMIT` for a SQL query, or `None` when the page starts
    /// beyond any addressable row and is therefore empty. A limit past
    /// `i64::MAX` saturates.
    pub fn sql_bounds(&self) -> Option<(i64, i64)> {
        let offset = i64::try_from(self.skip()).ok()?;
        let limit = i64::try_from(self.limit).unwrap_or(i64::MAX);
        Some((offset, limit))
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit)
    }
}

/// One page of a sorted result set together with its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: usize, request: PageRequest) -> Self {
        Self {
            items,
            total,
            total_pages: request.total_pages(total),
            current_page: request.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_is_offset_of_previous_pages() {
        assert_eq!(PageRequest::new(1, 12).skip(), 0);
        assert_eq!(PageRequest::new(3, 12).skip(), 24);
    }

    #[test]
    fn zero_values_are_raised_and_large_limits_kept() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, limit: 1 });
        assert_eq!(PageRequest::new(2, 1000).limit, 1000);
        assert_eq!(PageRequest::new(1, 150).total_pages(150), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest::new(1, 12);
        assert_eq!(request.total_pages(0), 0);
        assert_eq!(request.total_pages(12), 1);
        assert_eq!(request.total_pages(13), 2);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        assert_eq!(PageRequest::new(usize::MAX, 100).skip(), usize::MAX);
    }

    #[test]
    fn sql_bounds_reject_unaddressable_pages() {
        assert_eq!(PageRequest::new(3, 5).sql_bounds(), Some((10, 5)));
        assert_eq!(PageRequest::new(usize::MAX, 1).sql_bounds(), None);
        // Offset one past i64::MAX.
        let far = PageRequest::new(9_223_372_036_854_775_809, 1);
        assert_eq!(far.sql_bounds(), None);
        assert_eq!(
            PageRequest::new(1, usize::MAX).sql_bounds(),
            Some((0, i64::MAX))
        );
    }
}
