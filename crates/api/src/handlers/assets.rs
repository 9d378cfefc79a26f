//! Handlers for the `/assets` resource.
//!
//! Handlers only decode requests, call the asset service and encode the
//! result; all business rules live in [`crate::services::asset_service`].

use assets_db::models::asset::AssetInput;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult, INVALID_REQUEST};
use crate::query::PaginationParams;
use crate::response::{Envelope, PageResponse};
use crate::services::AssetView;
use crate::state::AppState;

/// POST /api/v1/assets
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<AssetInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Envelope<AssetView>>)> {
    let input = decode_input(payload, "create")?;
    let asset = state.assets.create(input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::success(asset))))
}

/// GET /api/v1/assets
///
/// Service failures are reported in the pagination envelope rather than the
/// plain error envelope.
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Response> {
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected list query");
        AppError::BadRequest(INVALID_REQUEST.to_string())
    })?;

    let response = match state.assets.list(params.into_page_request()).await {
        Ok(page) => Json(PageResponse::page(
            page.items,
            page.request,
            page.total,
            page.total_page,
        ))
        .into_response(),
        Err(err) => {
            let (status, code, description) = AppError::from(err).parts();
            (
                status,
                Json(PageResponse::<AssetView>::failure(code, description)),
            )
                .into_response()
        }
    };
    Ok(response)
}

/// GET /api/v1/assets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<AssetView>>> {
    let id = require_id(&id)?;
    let asset = state.assets.get_by_id(id).await?;
    Ok(Json(Envelope::success(asset)))
}

/// PUT /api/v1/assets/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AssetInput>, JsonRejection>,
) -> AppResult<Json<Envelope<AssetView>>> {
    let id = require_id(&id)?;
    let input = decode_input(payload, "update")?;
    let asset = state.assets.update(id, input).await?;
    Ok(Json(Envelope::success(asset)))
}

/// DELETE /api/v1/assets/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<()>>> {
    let id = require_id(&id)?;
    state.assets.delete(id).await?;
    Ok(Json(Envelope::empty_success()))
}

/// GET, PUT and DELETE on `/api/v1/assets/` with an empty id.
pub async fn missing_id() -> AppError {
    AppError::BadRequest(INVALID_REQUEST.to_string())
}

// ── Private helpers ──────────────────────────────────────────────────────

/// Unwrap a JSON body and check required-presence of its fields.
fn decode_input(
    payload: Result<Json<AssetInput>, JsonRejection>,
    op: &'static str,
) -> AppResult<AssetInput> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, op, "Rejected asset body");
        AppError::BadRequest(INVALID_REQUEST.to_string())
    })?;
    input.validate().map_err(|errors| {
        tracing::debug!(error = %errors, op, "Asset body failed validation");
        AppError::BadRequest(INVALID_REQUEST.to_string())
    })?;
    Ok(input)
}

fn require_id(id: &str) -> AppResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest(INVALID_REQUEST.to_string()));
    }
    Ok(id)
}
