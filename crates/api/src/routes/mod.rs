pub mod assets;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assets                                          list, create
/// /assets/                                         400 (empty id)
/// /assets/{id}                                     get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/assets", assets::router())
        .route(
            "/assets/",
            get(handlers::assets::missing_id)
                .put(handlers::assets::missing_id)
                .delete(handlers::assets::missing_id),
        )
}
