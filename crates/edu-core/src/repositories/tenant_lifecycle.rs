//! Tenant lifecycle trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{NamespaceKey, Tenant, TenantProvisioning};
use crate::error::DomainError;

/// Atomic namespace lifecycle. Every method runs as one transaction: on
/// error nothing it did is visible afterwards.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait TenantLifecycle: Send + Sync {
    /// Creates the directory row, the namespace, its baseline objects and the
    /// bootstrap administrator.
    async fn provision(&self, plan: &TenantProvisioning) -> Result<Tenant, DomainError>;

    /// Drops one tenant's namespace and directory row. Returns the dropped key.
    async fn deprovision_tenant(&self, id: &Uuid) -> Result<NamespaceKey, DomainError>;

    /// Drops every tenant of the foundation, then the foundation row.
    /// Returns the dropped keys (empty for a foundation without tenants).
    async fn deprovision_foundation(&self, id: &Uuid) -> Result<Vec<NamespaceKey>, DomainError>;
}
