//! Page-bound math for list endpoints.
//!
//! Pages are indexed from 1. The effective page number and page size are
//! computed here once and then passed to the store, so the numbers reported
//! to the client always match the slice that was actually fetched.

use serde::{Deserialize, Serialize};

/// Page size used when the client omits `page_size` or sends a value `<= 0`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on `page_size`; larger requests are clamped down to this.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Effective pagination bounds for one list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Compute effective page bounds from raw client input and a fresh count.
    ///
    /// - `requested_page <= 0` (or `None`) selects page 1.
    /// - `requested_size <= 0` (or `None`) selects [`DEFAULT_PAGE_SIZE`].
    /// - `requested_size` above [`MAX_PAGE_SIZE`] is clamped to it.
    /// - `total_pages` is `ceil(total_count / page_size)` but never below 1.
    ///
    /// A page past the last one is kept as requested; the store simply
    /// returns an empty slice for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use greyimage_core::pagination::Pagination;
    /// let p = Pagination::generate(Some(2), Some(5), 12);
    /// assert_eq!((p.current_page, p.page_size, p.total_pages), (2, 5, 3));
    /// ```
    pub fn generate(
        requested_page: Option<i64>,
        requested_size: Option<i64>,
        total_count: i64,
    ) -> Self {
        let current_page = match requested_page {
            Some(page) if page > 0 => page,
            _ => 1,
        };

        let page_size = match requested_size {
            Some(size) if size > 0 => size.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        let total_count = total_count.max(0);
        let full_pages = total_count / page_size;
        let total_pages = if total_count % page_size == 0 {
            full_pages.max(1)
        } else {
            full_pages + 1
        };

        Self {
            current_page,
            page_size,
            total_count,
            total_pages,
        }
    }

    /// Number of rows to skip before the current page.
    pub fn offset(&self) -> i64 {
        (self.current_page - 1).saturating_mul(self.page_size)
    }
}

/// `{ "pagination": {...}, "data": T }` envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T: Serialize> {
    pub pagination: Pagination,
    pub data: T,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_page_defaults_to_first() {
        assert_eq!(Pagination::generate(None, Some(5), 12).current_page, 1);
    }

    #[test]
    fn non_positive_page_defaults_to_first() {
        for page in [0, -1, -100, i64::MIN] {
            assert_eq!(
                Pagination::generate(Some(page), Some(5), 12).current_page,
                1
            );
        }
    }

    #[test]
    fn non_positive_size_uses_default() {
        for size in [None, Some(0), Some(-3), Some(i64::MIN)] {
            assert_eq!(
                Pagination::generate(Some(1), size, 50).page_size,
                DEFAULT_PAGE_SIZE
            );
        }
    }

    #[test]
    fn oversized_page_size_is_clamped() {
        let p = Pagination::generate(Some(1), Some(10_000), 50);
        assert_eq!(p.page_size, MAX_PAGE_SIZE);
        assert_eq!(p.total_pages, 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination::generate(Some(2), Some(5), 12);
        assert_eq!(p.current_page, 2);
        assert_eq!(p.page_size, 5);
        assert_eq!(p.total_count, 12);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(Pagination::generate(None, Some(5), 10).total_pages, 2);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let p = Pagination::generate(None, None, 0);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.total_count, 0);
    }

    #[test]
    fn total_pages_is_at_least_one_for_any_count() {
        for count in [0, 1, 9, 10, 11, 99, 100, 101, 1_000_003, i64::MAX] {
            for size in [None, Some(1), Some(7), Some(100)] {
                assert!(Pagination::generate(None, size, count).total_pages >= 1);
            }
        }
    }

    #[test]
    fn negative_count_is_treated_as_empty() {
        let p = Pagination::generate(None, None, -4);
        assert_eq!(p.total_count, 0);
        assert_eq!(p.total_pages, 1);
    }

    #[test]
    fn page_past_the_end_is_kept() {
        let p = Pagination::generate(Some(9), Some(5), 12);
        assert_eq!(p.current_page, 9);
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn offset_uses_effective_values() {
        assert_eq!(Pagination::generate(Some(0), Some(0), 30).offset(), 0);
        assert_eq!(Pagination::generate(Some(3), None, 30).offset(), 20);
    }

    #[test]
    fn paginated_result_serializes_envelope() {
        let result = PaginatedResult {
            pagination: Pagination::generate(None, None, 1),
            data: vec!["a"],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["pagination"]["current_page"], 1);
        assert_eq!(json["pagination"]["page_size"], DEFAULT_PAGE_SIZE);
        assert_eq!(json["pagination"]["total_count"], 1);
        assert_eq!(json["pagination"]["total_pages"], 1);
        assert_eq!(json["data"][0], "a");
    }
}
