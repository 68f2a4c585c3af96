// ============================================================================
// EDU Core - Tenant Entity
// File: crates/edu-core/src/domain/tenant.rs
// Description: Tenant directory record and provisioning input
// ============================================================================

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use edu_shared::utils::normalize_email;

use crate::domain::NamespaceKey;
use crate::error::DomainError;

/// Directory record of a tenant. Exists iff its namespace exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub namespace_key: NamespaceKey,
    pub admin_email: String,
    pub foundation_id: Option<Uuid>,
    /// Baseline schema version the namespace was seeded with
    pub schema_version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Provisioning request as received from administrative tooling
#[derive(Clone, Deserialize, Validate)]
pub struct ProvisionTenant {
    #[validate(length(min = 2, max = 150, message = "Display name must be between 2 and 150 characters"))]
    pub display_name: String,

    pub namespace_key: String,

    #[validate(email(message = "Admin email is not a valid email address"))]
    pub admin_email: String,

    #[validate(length(min = 8, max = 128, message = "Admin password must be between 8 and 128 characters"))]
    pub admin_password: String,

    #[validate(length(min = 2, max = 150, message = "Admin name must be between 2 and 150 characters"))]
    pub admin_name: String,

    #[serde(default)]
    pub foundation_id: Option<Uuid>,
}

impl fmt::Debug for ProvisionTenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionTenant")
            .field("display_name", &self.display_name)
            .field("namespace_key", &self.namespace_key)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"<redacted>")
            .field("admin_name", &self.admin_name)
            .field("foundation_id", &self.foundation_id)
            .finish()
    }
}

impl ProvisionTenant {
    /// Trims the free-text fields and normalizes the admin email. The
    /// password is kept byte for byte.
    pub fn normalized(mut self) -> Self {
        self.display_name = self.display_name.trim().to_string();
        self.namespace_key = self.namespace_key.trim().to_string();
        self.admin_email = normalize_email(&self.admin_email);
        self.admin_name = self.admin_name.trim().to_string();
        self
    }

    /// Normalizes, then runs every check that needs no database access.
    /// Length limits apply to the values that will be stored.
    pub fn validated(self) -> Result<(Self, NamespaceKey), DomainError> {
        let request = self.normalized();
        request.validate()?;
        let key = NamespaceKey::parse(&request.namespace_key)?;
        Ok((request, key))
    }
}

/// Fully validated provisioning plan handed to the workflow
#[derive(Clone)]
pub struct TenantProvisioning {
    pub tenant_id: Uuid,
    pub display_name: String,
    pub namespace_key: NamespaceKey,
    pub admin_email: String,
    pub admin_name: String,
    pub admin_password_hash: String,
    pub foundation_id: Option<Uuid>,
}

impl fmt::Debug for TenantProvisioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantProvisioning")
            .field("tenant_id", &self.tenant_id)
            .field("namespace_key", &self.namespace_key)
            .field("foundation_id", &self.foundation_id)
            .finish_non_exhaustive()
    }
}
