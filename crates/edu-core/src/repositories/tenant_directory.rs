//! Tenant directory trait (port)
//!
//! Read side of the directory. Rows are only written by the provisioning and
//! deprovisioning workflows, inside their own transactions.

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{NamespaceKey, Tenant};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError>;
    async fn find_by_namespace_key(&self, key: &NamespaceKey) -> Result<Option<Tenant>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Tenant>, DomainError>;
    async fn list_by_foundation(&self, foundation_id: &Uuid) -> Result<Vec<Tenant>, DomainError>;
}
