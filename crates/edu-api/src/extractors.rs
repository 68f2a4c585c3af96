// ============================================================================
// EDU API - Tenant Extractors
// File: crates/edu-api/src/extractors.rs
// ============================================================================
//! Request extractors that resolve the tenant before a handler runs.
//!
//! A handler that takes one of these never executes for a request whose
//! tenant cannot be resolved; the rejection is returned first.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use sha2::{Digest, Sha256};
use tracing::warn;

use edu_core::domain::ExecutionContext;
use edu_core::error::DomainError;
use edu_shared::constants::ADMIN_KEY_HEADER;

use crate::error::ApiError;
use crate::state::AppState;

/// Pre-authentication context from the tenant header (login only).
pub struct TenantHeader(pub ExecutionContext);

impl FromRequestParts<AppState> for TenantHeader {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(state.tenant_header.as_ref())
            .and_then(|v| v.to_str().ok());

        let ctx = state.resolver.resolve_header(value).await?;
        Ok(TenantHeader(ctx))
    }
}

/// Context from a verified bearer token; carries the principal.
pub struct Authenticated(pub ExecutionContext);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let ctx = state.resolver.resolve_authorization(value).await?;
        Ok(Authenticated(ctx))
    }
}

/// Platform administration guard for directory endpoints.
pub struct AdminGuard;

impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| DomainError::Unauthorized(format!("Missing {} header", ADMIN_KEY_HEADER)))?;

        if !admin_key_matches(key, &state.admin_api_key) {
            warn!("Invalid {} presented", ADMIN_KEY_HEADER);
            return Err(DomainError::Unauthorized(format!("Invalid {}", ADMIN_KEY_HEADER)).into());
        }
        Ok(AdminGuard)
    }
}

/// Constant-time in the key length and in the position of the first
/// mismatching byte: fixed-size digests, compared without early exit.
fn admin_key_matches(presented: &str, expected: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    presented
        .iter()
        .zip(expected.iter())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_key_matches_only_exact_key() {
        let expected = "platform-admin-key-0123456789";
        assert!(admin_key_matches(expected, expected));
        assert!(!admin_key_matches("platform-admin-key-012345678", expected));
        assert!(!admin_key_matches("platform-admin-key-01234567890", expected));
        assert!(!admin_key_matches("Platform-admin-key-0123456789", expected));
        assert!(!admin_key_matches("", expected));
    }
}
