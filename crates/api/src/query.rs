//! Shared query parameter types for API handlers.

use assets_core::pagination::PageRequest;
use serde::Deserialize;

/// Pagination parameters (`?page=&limit=&order=&sort_by=`).
///
/// Values are normalized by [`PageRequest::normalize`]; only non-numeric
/// `page`/`limit` values are rejected outright.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub order: Option<String>,
    pub sort_by: Option<String>,
}

impl PaginationParams {
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::normalize(
            self.page,
            self.limit,
            self.sort_by.as_deref(),
            self.order.as_deref(),
        )
    }
}
