//! Page/limit arithmetic for the paginated reports.
//!
//! Two reports paginate: top-products (capped at 50 rows per page) and
//! customer-value (capped at 100). Both share the same arithmetic, collected
//! here in [`Page`].

/// Rows per page when `limit` is absent.
pub const DEFAULT_LIMIT: i64 = 10;
/// Page number when `page` is absent.
pub const DEFAULT_PAGE: i64 = 1;
/// Per-page cap for the top-products report.
pub const TOP_PRODUCTS_MAX_LIMIT: i64 = 50;
/// Per-page cap for the customer-value report.
pub const CUSTOMER_VALUE_MAX_LIMIT: i64 = 100;

/// A validated page request.
///
/// Only the parameter validator constructs these, so `page >= 1` and
/// `1 <= limit <= cap` always hold and the offset arithmetic cannot go
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Rows to skip before this page: `(page - 1) * limit`, saturating at
    /// the top of the `i64` range instead of overflowing.
    #[inline]
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Total pages needed for `total` rows: `ceil(total / limit)`.
    #[inline]
    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_arithmetic() {
        assert_eq!(Page { page: 1, limit: 10 }.offset(), 0);
        assert_eq!(Page { page: 2, limit: 5 }.offset(), 5);
        assert_eq!(Page { page: 7, limit: 25 }.offset(), 150);
    }

    // The validator caps limit but not page, so the skip count must tolerate
    // any page number a client can express
    #[test]
    fn test_offset_saturates_at_extreme_pages() {
        assert_eq!(Page { page: i64::MAX, limit: 1 }.offset(), i64::MAX - 1);
        assert_eq!(Page { page: i64::MAX, limit: 10 }.offset(), i64::MAX);
        assert_eq!(Page { page: i64::MAX, limit: 100 }.offset(), i64::MAX);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page { page: 1, limit: 3 };
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(3), 1);
        assert_eq!(page.total_pages(7), 3);
        assert_eq!(page.total_pages(9), 3);
        assert_eq!(page.total_pages(10), 4);
    }
}
