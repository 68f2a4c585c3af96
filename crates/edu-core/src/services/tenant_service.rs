// ============================================================================
// EDU Core - Tenant Service
// File: crates/edu-core/src/services/tenant_service.rs
// ============================================================================
//! Tenant management: provisioning, directory lookups and deletion.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use edu_security::password::PasswordService;
use edu_shared::utils::mask_email;

use crate::domain::{ProvisionTenant, Tenant, TenantProvisioning};
use crate::error::DomainError;
use crate::repositories::{TenantDirectory, TenantLifecycle};

pub struct TenantService {
    directory: Arc<dyn TenantDirectory>,
    lifecycle: Arc<dyn TenantLifecycle>,
}

impl TenantService {
    pub fn new(directory: Arc<dyn TenantDirectory>, lifecycle: Arc<dyn TenantLifecycle>) -> Self {
        Self { directory, lifecycle }
    }

    /// Validates the request, hashes the admin password and runs the
    /// provisioning workflow. Input errors never reach the workflow.
    pub async fn provision(&self, request: ProvisionTenant) -> Result<Tenant, DomainError> {
        let (request, namespace_key) = request.validated().map_err(|e| {
            warn!("Provisioning request rejected: {}", e);
            e
        })?;

        info!(
            tenant = %namespace_key,
            admin = %mask_email(&request.admin_email),
            "Provisioning tenant"
        );

        let admin_password_hash = PasswordService::hash(&request.admin_password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        let plan = TenantProvisioning {
            tenant_id: Uuid::new_v4(),
            display_name: request.display_name,
            namespace_key,
            admin_email: request.admin_email,
            admin_name: request.admin_name,
            admin_password_hash,
            foundation_id: request.foundation_id,
        };

        let tenant = self.lifecycle.provision(&plan).await?;
        info!(tenant = %tenant.namespace_key, id = %tenant.id, "Tenant provisioned");
        Ok(tenant)
    }

    pub async fn get(&self, id: &Uuid) -> Result<Tenant, DomainError> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::TenantNotFound(id.to_string()))
    }

    pub async fn list_all(&self) -> Result<Vec<Tenant>, DomainError> {
        self.directory.list_all().await
    }

    pub async fn list_by_foundation(&self, foundation_id: &Uuid) -> Result<Vec<Tenant>, DomainError> {
        self.directory.list_by_foundation(foundation_id).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let namespace = self.lifecycle.deprovision_tenant(id).await?;
        info!(tenant = %namespace, id = %id, "Tenant deprovisioned");
        Ok(())
    }
}
