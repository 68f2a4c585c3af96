// ============================================================================
// EDU API - Tenant Administration Handlers
// File: crates/edu-api/src/handlers/tenants.rs
// ============================================================================
//! Provisioning, directory lookups and deprovisioning. Not tenant-scoped;
//! every handler requires the platform admin key.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use edu_core::domain::{ProvisionTenant, Tenant};

use crate::error::ApiError;
use crate::extractors::AdminGuard;
use crate::response::{ApiResponse, Created};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TenantListQuery {
    pub foundation_id: Option<Uuid>,
}

/// POST /api/v1/admin/tenants
pub async fn provision_tenant(
    _guard: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<ProvisionTenant>, JsonRejection>,
) -> Result<Created<Tenant>, ApiError> {
    let Json(payload) = payload?;
    let tenant = state.tenant_service.provision(payload).await?;
    Ok(ApiResponse::created(tenant))
}

/// GET /api/v1/admin/tenants[?foundation_id=]
pub async fn list_tenants(
    _guard: AdminGuard,
    State(state): State<AppState>,
    Query(query): Query<TenantListQuery>,
) -> Result<Json<ApiResponse<Vec<Tenant>>>, ApiError> {
    let tenants = match query.foundation_id {
        Some(foundation_id) => state.tenant_service.list_by_foundation(&foundation_id).await?,
        None => state.tenant_service.list_all().await?,
    };
    Ok(Json(ApiResponse::success(tenants)))
}

/// GET /api/v1/admin/tenants/{id}
pub async fn get_tenant(
    _guard: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant = state.tenant_service.get(&id).await?;
    Ok(Json(ApiResponse::success(tenant)))
}

/// DELETE /api/v1/admin/tenants/{id}
pub async fn delete_tenant(
    _guard: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.tenant_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
