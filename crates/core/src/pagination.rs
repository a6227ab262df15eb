//! Page/limit normalization and the pagination envelope.
//!
//! Out-of-range inputs are coerced to safe values, never rejected.

use serde::Serialize;

/// Page used when none (or an invalid one) is given.
pub const DEFAULT_PAGE: i64 = 1;

/// Rows per page when no (or an invalid) limit is given.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Upper bound on rows per page.
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse `asc`/`desc` case-insensitively; anything else is ascending.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A normalized page request: `page >= 1`, `1 <= limit <= MAX_PAGE_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .min(MAX_PAGE_LIMIT);
        Self { page, limit }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// `ceil(total / limit)`, zero when there is nothing to page through.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Pagination block returned next to every paged `data` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages: total_pages(total, request.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_missing() {
        let req = PageRequest::new(None, None);
        assert_eq!(req, PageRequest { page: 1, limit: 10 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn invalid_values_are_coerced() {
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest { page: 1, limit: 10 });
        assert_eq!(PageRequest::new(Some(-3), Some(-1)), PageRequest { page: 1, limit: 10 });
        assert_eq!(PageRequest::new(Some(2), Some(5000)).limit, MAX_PAGE_LIMIT);
    }

    #[test]
    fn offset_follows_page_and_limit() {
        assert_eq!(PageRequest::new(Some(3), Some(10)).offset(), 20);
        assert_eq!(PageRequest::new(Some(1), Some(25)).offset(), 0);
    }

    #[test]
    fn offset_saturates_instead_of_overflowing() {
        let req = PageRequest::new(Some(i64::MAX), Some(MAX_PAGE_LIMIT));
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(8, 3), 3);
    }

    #[test]
    fn sort_order_is_lenient() {
        assert_eq!(SortOrder::parse_lenient(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse_lenient(Some("DESC")), SortOrder::Desc);
        assert_eq!(SortOrder::parse_lenient(Some("sideways")), SortOrder::Asc);
        assert_eq!(SortOrder::parse_lenient(None), SortOrder::Asc);
        assert_eq!(SortOrder::Desc.as_sql(), "DESC");
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let pagination = Pagination::new(PageRequest::new(Some(2), Some(3)), 8);
        let json = serde_json::to_value(pagination).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "limit": 3, "total": 8, "totalPages": 3})
        );
    }
}
