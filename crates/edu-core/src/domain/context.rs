// ============================================================================
// EDU Core - Execution Context
// File: crates/edu-core/src/domain/context.rs
// ============================================================================
//! Per-request tenant context, created by the resolver and passed explicitly
//! to every tenant-scoped call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::NamespaceKey;
use crate::error::DomainError;

/// Role of a user inside one tenant namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Staff,
    Student,
    Parent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Staff => "staff",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "staff" => Some(Role::Staff),
            "student" => Some(Role::Student),
            "parent" => Some(Role::Parent),
            _ => None,
        }
    }
}

/// Authenticated caller, taken from a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    namespace: NamespaceKey,
    principal: Option<Principal>,
}

impl ExecutionContext {
    /// Context for pre-authentication endpoints (tenant header only).
    pub fn anonymous(namespace: NamespaceKey) -> Self {
        Self { namespace, principal: None }
    }

    pub fn authenticated(namespace: NamespaceKey, principal: Principal) -> Self {
        Self { namespace, principal: Some(principal) }
    }

    pub fn namespace(&self) -> &NamespaceKey {
        &self.namespace
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn require_role(&self, allowed: &[Role]) -> Result<&Principal, DomainError> {
        let principal = self
            .principal
            .as_ref()
            .ok_or_else(|| DomainError::Unauthorized("authentication required".into()))?;

        if allowed.contains(&principal.role) {
            Ok(principal)
        } else {
            Err(DomainError::Forbidden(format!(
                "role '{}' may not perform this action",
                principal.role.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn ns() -> NamespaceKey {
        NamespaceKey::parse("sma1").unwrap()
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Teacher, Role::Staff, Role::Student, Role::Parent] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("root"), None);
    }

    #[test]
    fn test_require_role() {
        let ctx = ExecutionContext::authenticated(
            ns(),
            Principal { user_id: Uuid::new_v4(), role: Role::Teacher },
        );
        assert!(ctx.require_role(&[Role::Admin, Role::Teacher]).is_ok());
        assert_eq!(
            ctx.require_role(&[Role::Admin]).unwrap_err().kind(),
            ErrorKind::Forbidden
        );

        let anonymous = ExecutionContext::anonymous(ns());
        assert_eq!(
            anonymous.require_role(&[Role::Admin]).unwrap_err().kind(),
            ErrorKind::Unauthorized
        );
    }
}
