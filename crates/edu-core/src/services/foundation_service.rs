//! Foundation CRUD with cascading delete

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::Foundation;
use crate::error::DomainError;
use crate::repositories::{FoundationRepository, TenantLifecycle};

pub struct FoundationService {
    foundations: Arc<dyn FoundationRepository>,
    lifecycle: Arc<dyn TenantLifecycle>,
}

impl FoundationService {
    pub fn new(foundations: Arc<dyn FoundationRepository>, lifecycle: Arc<dyn TenantLifecycle>) -> Self {
        Self { foundations, lifecycle }
    }

    pub async fn create(&self, name: String) -> Result<Foundation, DomainError> {
        let foundation = Foundation::new(name)?;
        let created = self.foundations.create(&foundation).await?;
        info!(id = %created.id, "Foundation created");
        Ok(created)
    }

    pub async fn get(&self, id: &Uuid) -> Result<Foundation, DomainError> {
        self.foundations
            .find_by_id(id)
            .await?
            .ok_or(DomainError::FoundationNotFound(*id))
    }

    pub async fn list_all(&self) -> Result<Vec<Foundation>, DomainError> {
        self.foundations.list_all().await
    }

    pub async fn rename(&self, id: &Uuid, name: String) -> Result<Foundation, DomainError> {
        let mut foundation = self.get(id).await?;
        foundation.rename(name)?;
        self.foundations.update(&foundation).await
    }

    /// Deletes the foundation and every tenant it owns in one transaction.
    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let dropped = self.lifecycle.deprovision_foundation(id).await?;
        info!(id = %id, tenants = dropped.len(), "Foundation deleted with its tenants");
        Ok(())
    }
}
