//! Pagination request normalization and page math.
//!
//! List endpoints accept loosely-typed `page`, `limit`, `sort_by` and `order`
//! query parameters. [`PageRequest::normalize`] turns them into a request the
//! repository can use directly: out-of-range values fall back to defaults
//! rather than being rejected.

use serde::Serialize;

/// Page number used when the caller omits `page` or sends a value below 1.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller omits `limit` or sends one outside
/// `1..=MAX_LIMIT`.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 50;

/// Sort field echoed back when the caller does not name one.
pub const DEFAULT_SORT_BY: &str = "created_at";

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a caller-supplied direction. Anything other than a
    /// case-insensitive `asc` or `desc` yields [`SortOrder::Desc`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// A normalized pagination request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    /// Rows per page, always within `1..=MAX_LIMIT`.
    pub limit: i64,
    /// Rows skipped before the page starts: `(page - 1) * limit`.
    pub offset: i64,
    /// Requested sort field. Accepted and echoed, but list queries currently
    /// always order by creation time.
    pub sort_by: String,
    /// Requested direction. Echoed like `sort_by`.
    pub order: SortOrder,
}

impl PageRequest {
    /// Build a request from raw query values, applying defaults.
    pub fn normalize(
        page: Option<i64>,
        limit: Option<i64>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p,
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if (1..=MAX_LIMIT).contains(&l) => l,
            _ => DEFAULT_LIMIT,
        };
        let sort_by = match sort_by.map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => DEFAULT_SORT_BY.to_string(),
        };

        Self {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
            sort_by,
            order: SortOrder::parse(order),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::normalize(None, None, None, None)
    }
}

/// Number of pages needed to hold `total` rows at `limit` rows per page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 || total <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}
