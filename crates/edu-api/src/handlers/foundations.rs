//! Foundation administration handlers (platform admin key)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use edu_core::domain::Foundation;

use crate::error::ApiError;
use crate::extractors::AdminGuard;
use crate::response::{ApiResponse, Created};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FoundationRequest {
    pub name: String,
}

/// POST /api/v1/admin/foundations
pub async fn create_foundation(
    _guard: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<FoundationRequest>, JsonRejection>,
) -> Result<Created<Foundation>, ApiError> {
    let Json(payload) = payload?;
    let foundation = state.foundation_service.create(payload.name).await?;
    Ok(ApiResponse::created(foundation))
}

/// GET /api/v1/admin/foundations
pub async fn list_foundations(
    _guard: AdminGuard,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Foundation>>>, ApiError> {
    let foundations = state.foundation_service.list_all().await?;
    Ok(Json(ApiResponse::success(foundations)))
}

/// GET /api/v1/admin/foundations/{id}
pub async fn get_foundation(
    _guard: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Foundation>>, ApiError> {
    let foundation = state.foundation_service.get(&id).await?;
    Ok(Json(ApiResponse::success(foundation)))
}

/// PUT /api/v1/admin/foundations/{id}
pub async fn rename_foundation(
    _guard: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<FoundationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Foundation>>, ApiError> {
    let Json(payload) = payload?;
    let foundation = state.foundation_service.rename(&id, payload.name).await?;
    Ok(Json(ApiResponse::success(foundation)))
}

/// DELETE /api/v1/admin/foundations/{id}
///
/// Drops every tenant of the foundation in the same transaction.
pub async fn delete_foundation(
    _guard: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.foundation_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
