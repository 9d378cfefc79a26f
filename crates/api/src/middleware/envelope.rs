use std::any::Any;

use axum::extract::Request;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{
    AppError, CODE_BAD_REQUEST, CODE_INTERNAL, CODE_NOT_FOUND, INTERNAL_DESCRIPTION,
    INVALID_REQUEST,
};
use crate::response::Envelope;

/// Rewrite error responses that carry no body into the error envelope.
///
/// Handler errors already go through [`AppError`]; this catches what axum
/// and `tower-http` produce on their own (405, 408 and friends). Headers
/// such as `allow` and `x-request-id` are kept.
pub async fn wrap_bare_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();
    if !is_error || response.headers().contains_key(CONTENT_TYPE) {
        return response;
    }

    let (code, description) = match status {
        StatusCode::NOT_FOUND => (CODE_NOT_FOUND, "route not found"),
        StatusCode::METHOD_NOT_ALLOWED => (CODE_BAD_REQUEST, "method not allowed"),
        StatusCode::REQUEST_TIMEOUT => (CODE_INTERNAL, "request timed out"),
        s if s.is_client_error() => (CODE_BAD_REQUEST, INVALID_REQUEST),
        _ => (CODE_INTERNAL, INTERNAL_DESCRIPTION),
    };
    tracing::debug!(%status, code, "Wrapping bare error response");

    let (parts, _) = response.into_parts();
    let mut wrapped = (status, Json(Envelope::failure(code, description))).into_response();
    for (name, value) in parts.headers.iter() {
        if name != CONTENT_LENGTH {
            wrapped.headers_mut().append(name.clone(), value.clone());
        }
    }
    wrapped
}

/// Response for a panicking handler, used with `CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::InternalError(format!("handler panicked: {detail}")).into_response()
}
