// ============================================================================
// EDU API - Auth Handlers
// File: crates/edu-api/src/handlers/auth.rs
// ============================================================================
//! Tenant-scoped login

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use edu_core::services::{LoginResult, UserInfo};

use crate::error::ApiError;
use crate::extractors::TenantHeader;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Login request payload
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authentication response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserDto,
}

/// User DTO for responses
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
}

impl From<UserInfo> for UserDto {
    fn from(user: UserInfo) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name,
            email: user.email,
            role: user.role.as_str().to_string(),
        }
    }
}

impl From<LoginResult> for AuthResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: "Bearer".to_string(),
            expires_in: result.expires_in,
            user: result.user.into(),
        }
    }
}

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    TenantHeader(ctx): TenantHeader,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let Json(payload) = payload?;
    let result = state
        .auth_service
        .login(&ctx, &payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(result.into())))
}
