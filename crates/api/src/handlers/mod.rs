pub mod assets;

use assets_core::error::CoreError;
use axum::http::Uri;

use crate::error::AppError;

/// Fallback for requests that match no route.
pub async fn route_not_found(uri: Uri) -> AppError {
    tracing::debug!(%uri, "No route matched");
    AppError::Core(CoreError::NotFound {
        entity: "Route",
        id: uri.path().to_string(),
    })
}
