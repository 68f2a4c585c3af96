//! Deprovisioning steps, all on the caller's transaction.

use sqlx::PgConnection;
use tracing::{debug, warn};
use uuid::Uuid;

use edu_core::domain::NamespaceKey;
use edu_core::error::DomainError;

use crate::database::db_error;
use crate::database::executor::namespace_exists;
use crate::database::locks::lock_namespace_exclusive;
use crate::database::postgres::{foundation_repo_impl, tenant_directory_impl};

pub(super) async fn deprovision_tenant(
    conn: &mut PgConnection,
    id: &Uuid,
) -> Result<NamespaceKey, DomainError> {
    let tenant = tenant_directory_impl::lock_for_delete(conn, id)
        .await?
        .ok_or_else(|| DomainError::TenantNotFound(id.to_string()))?;

    drop_namespace(conn, &tenant.namespace_key).await?;
    tenant_directory_impl::delete_in(conn, &tenant.id).await?;

    Ok(tenant.namespace_key)
}

pub(super) async fn deprovision_foundation(
    conn: &mut PgConnection,
    id: &Uuid,
) -> Result<Vec<NamespaceKey>, DomainError> {
    // The affected set is read under lock, inside this transaction
    if !foundation_repo_impl::lock_for_delete(conn, id).await? {
        return Err(DomainError::FoundationNotFound(*id));
    }
    let tenants = tenant_directory_impl::lock_foundation_tenants(conn, id).await?;

    let mut dropped = Vec::with_capacity(tenants.len());
    for tenant in tenants {
        drop_namespace(conn, &tenant.namespace_key).await?;
        tenant_directory_impl::delete_in(conn, &tenant.id).await?;
        dropped.push(tenant.namespace_key);
    }

    foundation_repo_impl::delete_in(conn, id).await?;
    Ok(dropped)
}

/// Waits for in-flight requests of the namespace, then drops it with every
/// object inside.
async fn drop_namespace(conn: &mut PgConnection, key: &NamespaceKey) -> Result<(), DomainError> {
    lock_namespace_exclusive(conn, key).await?;

    if !namespace_exists(conn, key).await? {
        warn!(tenant = %key, "Namespace already missing; removing directory row only");
        return Ok(());
    }

    let ddl = format!("DROP SCHEMA {} CASCADE", key.quoted());
    sqlx::query(&ddl)
        .persistent(false)
        .execute(&mut *conn)
        .await
        .map_err(|e| db_error("dropping namespace", e))?;
    debug!(tenant = %key, "Namespace dropped");
    Ok(())
}
