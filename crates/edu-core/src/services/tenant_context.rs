// ============================================================================
// EDU Core - Tenant Context Resolver
// File: crates/edu-core/src/services/tenant_context.rs
// ============================================================================
//! Turns request credentials into an [`ExecutionContext`].
//!
//! Resolution is fail-closed: every path that cannot name a namespace ends in
//! an error, never in a default namespace.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use edu_security::jwt::{JwtError, JwtService};

use crate::domain::{ExecutionContext, NamespaceKey, Principal, Role, Tenant};
use crate::error::DomainError;
use crate::repositories::TenantDirectory;

/// Whether the resolver confirms the namespace key against the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Trust the key as carried by the header or the verified token.
    Trusted,
    /// One directory lookup per request; unknown keys are rejected, and so
    /// are tokens issued to an earlier tenant that held the same key.
    Verified,
}

impl ResolutionMode {
    pub fn from_config(verify_tenant_exists: bool) -> Self {
        if verify_tenant_exists {
            ResolutionMode::Verified
        } else {
            ResolutionMode::Trusted
        }
    }
}

pub struct TenantContextResolver {
    jwt: JwtService,
    directory: Arc<dyn TenantDirectory>,
    mode: ResolutionMode,
}

impl TenantContextResolver {
    pub fn new(jwt: JwtService, directory: Arc<dyn TenantDirectory>, mode: ResolutionMode) -> Self {
        Self { jwt, directory, mode }
    }

    /// Pre-authentication path: the tenant header value.
    pub async fn resolve_header(&self, header: Option<&str>) -> Result<ExecutionContext, DomainError> {
        let raw = header
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                warn!("Rejected request without tenant header");
                DomainError::Unauthorized("tenant header is required".into())
            })?;

        let namespace = NamespaceKey::parse(raw).map_err(|e| {
            warn!("Rejected malformed tenant header: {}", e);
            DomainError::Unauthorized("tenant header is invalid".into())
        })?;

        self.confirm(&namespace).await?;
        debug!(tenant = %namespace, "Resolved tenant from header");
        Ok(ExecutionContext::anonymous(namespace))
    }

    /// Authenticated path: the raw `Authorization` header value.
    pub async fn resolve_authorization(
        &self,
        authorization: Option<&str>,
    ) -> Result<ExecutionContext, DomainError> {
        let value = authorization.ok_or_else(|| {
            warn!("Rejected request without Authorization header");
            DomainError::Unauthorized("bearer token is required".into())
        })?;

        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| DomainError::Unauthorized("expected a bearer token".into()))?;

        self.resolve_token(token).await
    }

    pub async fn resolve_token(&self, token: &str) -> Result<ExecutionContext, DomainError> {
        let claims = self.jwt.validate_token(token).map_err(|e| {
            warn!("Rejected access token: {}", e);
            match e {
                JwtError::TokenExpired => DomainError::Unauthorized("token expired".into()),
                _ => DomainError::Unauthorized("token is invalid".into()),
            }
        })?;

        let namespace = NamespaceKey::parse(&claims.tenant).map_err(|_| {
            warn!("Rejected token with malformed tenant claim");
            DomainError::Unauthorized("token carries no valid tenant".into())
        })?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| DomainError::Unauthorized("token subject is invalid".into()))?;
        let tenant_id = Uuid::parse_str(&claims.tid)
            .map_err(|_| DomainError::Unauthorized("token tenant id is invalid".into()))?;
        let role = Role::from_str(&claims.role)
            .ok_or_else(|| DomainError::Unauthorized("token role is invalid".into()))?;

        if let Some(tenant) = self.confirm(&namespace).await? {
            if tenant.id != tenant_id {
                warn!(tenant = %namespace, "Rejected token issued to a previous holder of the key");
                return Err(DomainError::Unauthorized("token is invalid".into()));
            }
        }
        debug!(tenant = %namespace, user_id = %user_id, "Resolved tenant from token");
        Ok(ExecutionContext::authenticated(namespace, Principal { user_id, role }))
    }

    /// The directory record in Verified mode, `None` in Trusted mode.
    async fn confirm(&self, namespace: &NamespaceKey) -> Result<Option<Tenant>, DomainError> {
        match self.mode {
            ResolutionMode::Trusted => Ok(None),
            ResolutionMode::Verified => match self.directory.find_by_namespace_key(namespace).await? {
                Some(tenant) => Ok(Some(tenant)),
                None => {
                    warn!(tenant = %namespace, "Rejected request for unknown tenant");
                    Err(DomainError::TenantNotFound(namespace.to_string()))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::repositories::MockTenantDirectory;
    use chrono::Utc;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn resolver(directory: MockTenantDirectory, mode: ResolutionMode) -> TenantContextResolver {
        TenantContextResolver::new(JwtService::new(SECRET, 3600), Arc::new(directory), mode)
    }

    fn untouched_directory() -> MockTenantDirectory {
        let mut directory = MockTenantDirectory::new();
        directory.expect_find_by_namespace_key().times(0);
        directory
    }

    fn tenant(key: &str) -> Tenant {
        Tenant {
            id: Uuid::new_v4(),
            name: "SMA Negeri 1".into(),
            namespace_key: NamespaceKey::parse(key).unwrap(),
            admin_email: "admin@sma1.sch.id".into(),
            foundation_id: None,
            schema_version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_header_resolution_is_fail_closed() {
        let resolver = resolver(untouched_directory(), ResolutionMode::Trusted);

        for header in [None, Some(""), Some("   "), Some("Public"), Some("sma1;drop")] {
            let err = resolver.resolve_header(header).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unauthorized, "header {:?}", header);
        }

        let ctx = resolver.resolve_header(Some("sma1")).await.unwrap();
        assert_eq!(ctx.namespace().as_str(), "sma1");
        assert!(ctx.principal().is_none());
    }

    #[tokio::test]
    async fn test_bearer_resolution() {
        let resolver = resolver(untouched_directory(), ResolutionMode::Trusted);
        let user_id = Uuid::new_v4();
        let token = JwtService::new(SECRET, 3600)
            .generate_access_token(&user_id, &Uuid::new_v4(), "sma2", "teacher")
            .unwrap();

        let ctx = resolver
            .resolve_authorization(Some(&format!("Bearer {}", token)))
            .await
            .unwrap();
        assert_eq!(ctx.namespace().as_str(), "sma2");
        assert_eq!(
            ctx.principal(),
            Some(&Principal { user_id, role: Role::Teacher })
        );
    }

    #[tokio::test]
    async fn test_bearer_resolution_is_fail_closed() {
        let resolver = resolver(untouched_directory(), ResolutionMode::Trusted);
        let foreign = JwtService::new("ffffffffffffffffffffffffffffffff", 3600)
            .generate_access_token(&Uuid::new_v4(), &Uuid::new_v4(), "sma1", "admin")
            .unwrap();
        let empty_tenant = JwtService::new(SECRET, 3600)
            .generate_access_token(&Uuid::new_v4(), &Uuid::new_v4(), "", "admin")
            .unwrap();
        let unknown_role = JwtService::new(SECRET, 3600)
            .generate_access_token(&Uuid::new_v4(), &Uuid::new_v4(), "sma1", "root")
            .unwrap();

        let cases = [
            None,
            Some("Basic dXNlcjpwYXNz".to_string()),
            Some("Bearer ".to_string()),
            Some(format!("Bearer {}", foreign)),
            Some(format!("Bearer {}", empty_tenant)),
            Some(format!("Bearer {}", unknown_role)),
        ];
        for case in cases {
            let err = resolver.resolve_authorization(case.as_deref()).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unauthorized, "case {:?}", case);
        }
    }

    #[tokio::test]
    async fn test_verified_mode_checks_directory() {
        let mut directory = MockTenantDirectory::new();
        directory
            .expect_find_by_namespace_key()
            .returning(|key| {
                Ok(if key.as_str() == "sma1" { Some(tenant("sma1")) } else { None })
            });
        let resolver = resolver(directory, ResolutionMode::Verified);

        assert!(resolver.resolve_header(Some("sma1")).await.is_ok());
        let err = resolver.resolve_header(Some("sma9")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_verified_mode_rejects_token_of_previous_key_holder() {
        let current = tenant("sma1");
        let current_id = current.id;
        let mut directory = MockTenantDirectory::new();
        directory
            .expect_find_by_namespace_key()
            .returning(move |_| Ok(Some(current.clone())));
        let resolver = resolver(directory, ResolutionMode::Verified);
        let jwt = JwtService::new(SECRET, 3600);

        let stale = jwt
            .generate_access_token(&Uuid::new_v4(), &Uuid::new_v4(), "sma1", "admin")
            .unwrap();
        let err = resolver.resolve_token(&stale).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let fresh = jwt
            .generate_access_token(&Uuid::new_v4(), &current_id, "sma1", "admin")
            .unwrap();
        assert!(resolver.resolve_token(&fresh).await.is_ok());
    }

    #[test]
    fn test_mode_from_config() {
        assert_eq!(ResolutionMode::from_config(true), ResolutionMode::Verified);
        assert_eq!(ResolutionMode::from_config(false), ResolutionMode::Trusted);
    }
}
