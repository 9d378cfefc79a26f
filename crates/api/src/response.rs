//! Shared response envelope types for API handlers.
//!
//! Every response is wrapped in the same envelope:
//! `{ "data"?, "message"?, "error"?, "error_description"? }`. List responses
//! use [`PageResponse`], which carries the pagination fields alongside `data`.

use assets_core::pagination::{PageRequest, SortOrder};
use serde::Serialize;

/// Message attached to every successful response.
pub const SUCCESS: &str = "success";

/// Standard response envelope. Absent fields are omitted from the JSON.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// `{ "data": ..., "message": "success" }`
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            message: Some(SUCCESS),
            error: None,
            error_description: None,
        }
    }
}

impl Envelope<()> {
    /// `{ "message": "success" }` with no data.
    pub fn empty_success() -> Self {
        Self {
            data: None,
            message: Some(SUCCESS),
            error: None,
            error_description: None,
        }
    }

    /// `{ "error": code, "error_description": description }`
    pub fn failure(code: &'static str, description: impl Into<String>) -> Self {
        Self {
            data: None,
            message: None,
            error: Some(code),
            error_description: Some(description.into()),
        }
    }
}

/// Envelope for paginated lists.
///
/// On success every pagination field is present and `message` is omitted.
/// On failure only `page`, `limit` (both zero) and the error fields remain.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<T>>,
    pub page: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl<T: Serialize> PageResponse<T> {
    pub fn page(items: Vec<T>, request: PageRequest, total: i64, total_page: i64) -> Self {
        Self {
            data: Some(items),
            page: request.page,
            limit: request.limit,
            order: Some(request.order),
            sort_by: Some(request.sort_by),
            offset: Some(request.offset),
            total: Some(total),
            total_page: Some(total_page),
            error: None,
            error_description: None,
        }
    }

    pub fn failure(code: &'static str, description: impl Into<String>) -> Self {
        Self {
            data: None,
            page: 0,
            limit: 0,
            order: None,
            sort_by: None,
            offset: None,
            total: None,
            total_page: None,
            error: Some(code),
            error_description: Some(description.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_error_fields() {
        let body = serde_json::to_value(Envelope::success(json!({"id": "a"}))).unwrap();
        assert_eq!(body, json!({"data": {"id": "a"}, "message": "success"}));
    }

    #[test]
    fn empty_success_has_only_message() {
        let body = serde_json::to_value(Envelope::empty_success()).unwrap();
        assert_eq!(body, json!({"message": "success"}));
    }

    #[test]
    fn failure_has_only_error_fields() {
        let body = serde_json::to_value(Envelope::failure("not_found", "Asset not found")).unwrap();
        assert_eq!(
            body,
            json!({"error": "not_found", "error_description": "Asset not found"})
        );
    }

    #[test]
    fn page_carries_every_pagination_field_without_message() {
        let request = PageRequest::normalize(Some(2), Some(5), None, Some("ASC"));
        let body = serde_json::to_value(PageResponse::page(vec![json!({"id": "a"})], request, 6, 2))
            .unwrap();
        assert_eq!(
            body,
            json!({
                "data": [{"id": "a"}],
                "page": 2,
                "limit": 5,
                "order": "asc",
                "sort_by": "created_at",
                "offset": 5,
                "total": 6,
                "total_page": 2,
            })
        );
    }

    #[test]
    fn page_failure_is_otherwise_empty() {
        let body = serde_json::to_value(PageResponse::<serde_json::Value>::failure(
            "internal_server_error",
            "Something went wrong",
        ))
        .unwrap();
        assert_eq!(
            body,
            json!({
                "page": 0,
                "limit": 0,
                "error": "internal_server_error",
                "error_description": "Something went wrong",
            })
        );
    }
}
