// ============================================================================
// EDU Infrastructure - Tenant Lifecycle
// File: crates/edu-infrastructure/src/lifecycle/mod.rs
// ============================================================================
//! Provisioning and deprovisioning. Each workflow is one transaction on one
//! connection; PostgreSQL's transactional DDL makes the namespace, its objects
//! and the directory row appear or disappear together.

mod deprovisioning;
mod provisioning;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{error, warn};
use uuid::Uuid;

use edu_core::domain::{NamespaceKey, Tenant, TenantProvisioning};
use edu_core::error::DomainError;
use edu_core::repositories::TenantLifecycle;

use crate::baseline::BaselineSchema;
use crate::database::db_error;

pub struct PgTenantLifecycle {
    pool: PgPool,
    baseline: Arc<BaselineSchema>,
}

impl PgTenantLifecycle {
    pub fn new(pool: PgPool, baseline: Arc<BaselineSchema>) -> Self {
        Self { pool, baseline }
    }

    async fn begin(&self, workflow: &str) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| db_error(&format!("starting {}", workflow), e))
    }
}

#[async_trait]
impl TenantLifecycle for PgTenantLifecycle {
    async fn provision(&self, plan: &TenantProvisioning) -> Result<Tenant, DomainError> {
        let mut tx = self.begin("provisioning").await?;
        let result = provisioning::provision(&mut tx, plan, &self.baseline).await;
        finish(tx, result, "provisioning", DomainError::into_provisioning_failure).await
    }

    async fn deprovision_tenant(&self, id: &Uuid) -> Result<NamespaceKey, DomainError> {
        let mut tx = self.begin("tenant deprovisioning").await?;
        let result = deprovisioning::deprovision_tenant(&mut tx, id).await;
        finish(tx, result, "tenant deprovisioning", DomainError::into_deprovisioning_failure).await
    }

    async fn deprovision_foundation(&self, id: &Uuid) -> Result<Vec<NamespaceKey>, DomainError> {
        let mut tx = self.begin("foundation deprovisioning").await?;
        let result = deprovisioning::deprovision_foundation(&mut tx, id).await;
        finish(tx, result, "foundation deprovisioning", DomainError::into_deprovisioning_failure).await
    }
}

/// Commits on success, rolls back on failure.
///
/// A failed COMMIT is reported as `OutcomeUnknown`: the server may or may not
/// have applied it, so callers must look at the directory before retrying.
async fn finish<T>(
    tx: Transaction<'static, Postgres>,
    result: Result<T, DomainError>,
    workflow: &str,
    wrap: fn(DomainError) -> DomainError,
) -> Result<T, DomainError> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(|e| {
                error!(error = %e, "Commit of {} failed", workflow);
                DomainError::OutcomeUnknown(format!("{} commit failed: {}", workflow, e))
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback of {} failed: {}", workflow, rollback_err);
            }
            let err = wrap(err);
            if err.is_client_error() {
                warn!("{} rejected: {}", workflow, err);
            } else {
                error!("{} failed: {}", workflow, err);
            }
            Err(err)
        }
    }
}
