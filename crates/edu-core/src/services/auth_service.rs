// ============================================================================
// EDU Core - Authentication Service
// File: crates/edu-core/src/services/auth_service.rs
// ============================================================================
//! Tenant-scoped login issuing access tokens

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use edu_security::jwt::JwtService;
use edu_security::password::PasswordService;
use edu_shared::utils::{mask_email, normalize_email};

use crate::domain::{ExecutionContext, Role, TenantUser};
use crate::error::DomainError;
use crate::repositories::{TenantDirectory, TenantUserRepository};

/// Authentication service for users inside one tenant namespace
pub struct AuthService {
    users: Arc<dyn TenantUserRepository>,
    directory: Arc<dyn TenantDirectory>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn TenantUserRepository>,
        directory: Arc<dyn TenantDirectory>,
        jwt: JwtService,
    ) -> Self {
        Self { users, directory, jwt }
    }

    /// Login with email and password against the namespace in `ctx`
    pub async fn login(
        &self,
        ctx: &ExecutionContext,
        email: &str,
        password: &str,
    ) -> Result<LoginResult, DomainError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::ValidationError("Email and password are required".into()));
        }
        info!(tenant = %ctx.namespace(), email = %mask_email(&email), "Login attempt");

        // 1. Find user in the tenant namespace
        let user = self.users.find_by_email(ctx, &email).await?
            .ok_or_else(|| {
                warn!(tenant = %ctx.namespace(), "Login failed: unknown email");
                DomainError::InvalidCredentials
            })?;

        // 2. Check if user can login
        if !user.is_active {
            warn!(tenant = %ctx.namespace(), user_id = %user.id, "Login failed: user inactive");
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Verify password
        let password_valid = PasswordService::verify(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!(tenant = %ctx.namespace(), user_id = %user.id, "Login failed: wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        // 4. Issue a token bound to this namespace and to its current tenant
        let tenant = self
            .directory
            .find_by_namespace_key(ctx.namespace())
            .await?
            .ok_or_else(|| DomainError::TenantNotFound(ctx.namespace().to_string()))?;
        let access_token = self
            .jwt
            .generate_access_token(&user.id, &tenant.id, ctx.namespace().as_str(), user.role.as_str())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        info!(tenant = %ctx.namespace(), user_id = %user.id, "Login successful");

        Ok(LoginResult {
            user: UserInfo::from(&user),
            access_token,
            expires_in: self.jwt.access_token_expiry(),
        })
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserInfo,
    pub access_token: String,
    pub expires_in: i64,
}

/// User info returned in auth responses
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl From<&TenantUser> for UserInfo {
    fn from(user: &TenantUser) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
