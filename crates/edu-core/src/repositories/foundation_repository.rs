//! Foundation repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Foundation;
use crate::error::DomainError;

/// Foundation CRUD. Deletion is a cascade and lives on [`crate::repositories::TenantLifecycle`].
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait FoundationRepository: Send + Sync {
    async fn create(&self, foundation: &Foundation) -> Result<Foundation, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Foundation>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Foundation>, DomainError>;
    async fn update(&self, foundation: &Foundation) -> Result<Foundation, DomainError>;
}
