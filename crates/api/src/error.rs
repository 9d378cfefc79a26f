use assets_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::response::Envelope;

/// Machine-readable error codes carried in the `error` field.
pub const CODE_BAD_REQUEST: &str = "bad_request";
pub const CODE_NOT_FOUND: &str = "not_found";
pub const CODE_INTERNAL: &str = "internal_server_error";

/// Client-facing description for every 500.
pub const INTERNAL_DESCRIPTION: &str = "Something went wrong";

/// Description for undecodable bodies, queries and path ids.
pub const INVALID_REQUEST: &str = "invalid request";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the standard error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error classified by the service.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A request that could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message. Never shown to clients.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Status code, `error` code and client-facing description.
    ///
    /// Internal details are logged here and replaced with
    /// [`INTERNAL_DESCRIPTION`].
    pub fn parts(self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    CODE_NOT_FOUND,
                    format!("{entity} not found"),
                ),
                // Duplicates share the bad-request code.
                CoreError::Validation(msg) | CoreError::Conflict(msg) => {
                    (StatusCode::BAD_REQUEST, CODE_BAD_REQUEST, msg)
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, CODE_BAD_REQUEST, msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, description) = self.parts();
        (status, axum::Json(Envelope::failure(code, description))).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        CODE_INTERNAL,
        INTERNAL_DESCRIPTION.to_string(),
    )
}
