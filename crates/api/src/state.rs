use std::sync::Arc;

use crate::services::AssetService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks only; asset access goes
    /// through the service).
    pub pool: assets_db::DbPool,
    /// Asset use cases.
    pub assets: Arc<dyn AssetService>,
}
