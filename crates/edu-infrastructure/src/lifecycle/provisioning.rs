//! Provisioning steps, all on the caller's transaction.

use sqlx::PgConnection;
use tracing::{debug, warn};

use edu_core::domain::{Tenant, TenantProvisioning};
use edu_core::error::DomainError;

use crate::baseline::BaselineSchema;
use crate::database::db_error;
use crate::database::executor::{namespace_exists, select_namespace};
use crate::database::locks::lock_namespace_exclusive;
use crate::database::postgres::{foundation_repo_impl, tenant_directory_impl};

pub(super) async fn provision(
    conn: &mut PgConnection,
    plan: &TenantProvisioning,
    baseline: &BaselineSchema,
) -> Result<Tenant, DomainError> {
    let key = &plan.namespace_key;

    // 1. Serialize on the key and reject duplicates. Foundation deletion
    //    locks rows before namespace keys, so these plain reads must come
    //    before the foundation row lock below.
    lock_namespace_exclusive(conn, key).await?;

    if tenant_directory_impl::namespace_key_taken(conn, key).await? {
        return Err(DomainError::NamespaceKeyAlreadyExists(key.to_string()));
    }
    if tenant_directory_impl::admin_email_taken(conn, &plan.admin_email).await? {
        return Err(DomainError::AdminEmailAlreadyExists(plan.admin_email.clone()));
    }
    if namespace_exists(conn, key).await? {
        warn!(tenant = %key, "Namespace exists without a directory row");
        return Err(DomainError::NamespaceKeyAlreadyExists(key.to_string()));
    }

    // Pin the foundation for the rest of the transaction
    if let Some(foundation_id) = plan.foundation_id {
        if !foundation_repo_impl::lock_for_share(conn, &foundation_id).await? {
            return Err(DomainError::FoundationNotFound(foundation_id));
        }
    }

    // 2. Directory row
    let tenant = tenant_directory_impl::create_in(conn, plan, baseline.version()).await?;

    // 3. Namespace
    let ddl = format!("CREATE SCHEMA {}", key.quoted());
    sqlx::query(&ddl)
        .persistent(false)
        .execute(&mut *conn)
        .await
        .map_err(|e| db_error("creating namespace", e))?;
    debug!(tenant = %key, "Namespace created");

    // 4. Baseline objects, created through the namespace's search_path
    select_namespace(conn, key).await?;
    baseline.apply(conn).await?;

    // 5. Bootstrap administrator
    let insert_admin = format!(
        r#"
        INSERT INTO {}.users (id, email, password_hash, full_name, role, is_active)
        VALUES ($1, $2, $3, $4, 'admin', TRUE)
        "#,
        key.quoted()
    );
    sqlx::query(&insert_admin)
        .persistent(false)
        .bind(uuid::Uuid::new_v4())
        .bind(&plan.admin_email)
        .bind(&plan.admin_password_hash)
        .bind(&plan.admin_name)
        .execute(&mut *conn)
        .await
        .map_err(|e| db_error("creating bootstrap administrator", e))?;

    Ok(tenant)
}
