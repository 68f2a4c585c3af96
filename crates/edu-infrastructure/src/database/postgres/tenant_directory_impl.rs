// ============================================================================
// EDU Infrastructure - PostgreSQL Tenant Directory
// File: crates/edu-infrastructure/src/database/postgres/tenant_directory_impl.rs
// ============================================================================
//! `public.tenants`: the one tenant-independent mapping from tenant to
//! namespace key. Reads go through the pool; writes only happen on the
//! connection of a lifecycle workflow.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use edu_core::domain::{NamespaceKey, Tenant, TenantProvisioning};
use edu_core::error::DomainError;
use edu_core::repositories::TenantDirectory;

use crate::database::db_error;

const TENANT_COLUMNS: &str =
    "id, name, namespace_key, admin_email, foundation_id, schema_version, created_at, updated_at";

pub struct PgTenantDirectory {
    pool: PgPool,
}

impl PgTenantDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TenantRow {
    id: Uuid,
    name: String,
    namespace_key: String,
    admin_email: String,
    foundation_id: Option<Uuid>,
    schema_version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TenantRow> for Tenant {
    type Error = DomainError;

    fn try_from(row: TenantRow) -> Result<Self, Self::Error> {
        let namespace_key = NamespaceKey::parse(&row.namespace_key).map_err(|_| {
            DomainError::DatabaseError(format!(
                "directory row {} holds an invalid namespace key",
                row.id
            ))
        })?;

        Ok(Tenant {
            id: row.id,
            name: row.name,
            namespace_key,
            admin_email: row.admin_email,
            foundation_id: row.foundation_id,
            schema_version: row.schema_version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_tenants(rows: Vec<TenantRow>) -> Result<Vec<Tenant>, DomainError> {
    rows.into_iter().map(Tenant::try_from).collect()
}

#[async_trait]
impl TenantDirectory for PgTenantDirectory {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(&format!(
            "SELECT {} FROM public.tenants WHERE id = $1",
            TENANT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding tenant by id", e))?;

        row.map(Tenant::try_from).transpose()
    }

    async fn find_by_namespace_key(&self, key: &NamespaceKey) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(&format!(
            "SELECT {} FROM public.tenants WHERE namespace_key = $1",
            TENANT_COLUMNS
        ))
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding tenant by namespace key", e))?;

        row.map(Tenant::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Tenant>, DomainError> {
        let rows: Vec<TenantRow> = sqlx::query_as(&format!(
            "SELECT {} FROM public.tenants ORDER BY namespace_key",
            TENANT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing tenants", e))?;

        into_tenants(rows)
    }

    async fn list_by_foundation(&self, foundation_id: &Uuid) -> Result<Vec<Tenant>, DomainError> {
        let rows: Vec<TenantRow> = sqlx::query_as(&format!(
            "SELECT {} FROM public.tenants WHERE foundation_id = $1 ORDER BY namespace_key",
            TENANT_COLUMNS
        ))
        .bind(foundation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing tenants by foundation", e))?;

        into_tenants(rows)
    }
}

// ----------------------------------------------------------------------------
// Workflow-side operations. These run on the caller's transaction.
// ----------------------------------------------------------------------------

pub(crate) async fn namespace_key_taken(
    conn: &mut PgConnection,
    key: &NamespaceKey,
) -> Result<bool, DomainError> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM public.tenants WHERE namespace_key = $1)")
        .bind(key.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| db_error("checking namespace key", e))
}

pub(crate) async fn admin_email_taken(conn: &mut PgConnection, email: &str) -> Result<bool, DomainError> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM public.tenants WHERE admin_email = $1)")
        .bind(email)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| db_error("checking admin email", e))
}

/// Inserts the directory row of a tenant being provisioned.
pub(crate) async fn create_in(
    conn: &mut PgConnection,
    plan: &TenantProvisioning,
    schema_version: i32,
) -> Result<Tenant, DomainError> {
    let now = Utc::now();
    let row: TenantRow = sqlx::query_as(&format!(
        r#"
        INSERT INTO public.tenants (
            id, name, namespace_key, admin_email, foundation_id,
            schema_version, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING {}
        "#,
        TENANT_COLUMNS
    ))
    .bind(plan.tenant_id)
    .bind(&plan.display_name)
    .bind(plan.namespace_key.as_str())
    .bind(&plan.admin_email)
    .bind(plan.foundation_id)
    .bind(schema_version)
    .bind(now)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| unique_violation(e, plan))?;

    Tenant::try_from(row)
}

/// A concurrent provisioning may commit the same key or email between the
/// checks and the insert; the unique constraints catch that race.
fn unique_violation(err: sqlx::Error, plan: &TenantProvisioning) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("tenants_admin_email_key") => {
                    DomainError::AdminEmailAlreadyExists(plan.admin_email.clone())
                }
                _ => DomainError::NamespaceKeyAlreadyExists(plan.namespace_key.to_string()),
            };
        }
    }
    db_error("inserting tenant", err)
}

/// Reads and row-locks one tenant for deletion.
pub(crate) async fn lock_for_delete(
    conn: &mut PgConnection,
    id: &Uuid,
) -> Result<Option<Tenant>, DomainError> {
    let row: Option<TenantRow> = sqlx::query_as(&format!(
        "SELECT {} FROM public.tenants WHERE id = $1 FOR UPDATE",
        TENANT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| db_error("locking tenant", e))?;

    row.map(Tenant::try_from).transpose()
}

/// Row-locks every tenant of a foundation, ordered by namespace key so that
/// concurrent workflows acquire namespace locks in the same order.
pub(crate) async fn lock_foundation_tenants(
    conn: &mut PgConnection,
    foundation_id: &Uuid,
) -> Result<Vec<Tenant>, DomainError> {
    let rows: Vec<TenantRow> = sqlx::query_as(&format!(
        "SELECT {} FROM public.tenants WHERE foundation_id = $1 ORDER BY namespace_key FOR UPDATE",
        TENANT_COLUMNS
    ))
    .bind(foundation_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| db_error("locking foundation tenants", e))?;

    into_tenants(rows)
}

pub(crate) async fn delete_in(conn: &mut PgConnection, id: &Uuid) -> Result<(), DomainError> {
    let result = sqlx::query("DELETE FROM public.tenants WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| db_error("deleting tenant", e))?;

    if result.rows_affected() == 0 {
        return Err(DomainError::TenantNotFound(id.to_string()));
    }
    Ok(())
}
