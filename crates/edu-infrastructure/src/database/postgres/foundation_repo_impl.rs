// ============================================================================
// EDU Infrastructure - PostgreSQL Foundation Repository
// File: crates/edu-infrastructure/src/database/postgres/foundation_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use edu_core::domain::Foundation;
use edu_core::error::DomainError;
use edu_core::repositories::FoundationRepository;

use crate::database::db_error;

pub struct PgFoundationRepository {
    pool: PgPool,
}

impl PgFoundationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FoundationRow {
    id: Uuid,
    name: String,
    tenant_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FoundationRow> for Foundation {
    fn from(row: FoundationRow) -> Self {
        Foundation {
            id: row.id,
            name: row.name,
            tenant_count: row.tenant_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl FoundationRepository for PgFoundationRepository {
    async fn create(&self, foundation: &Foundation) -> Result<Foundation, DomainError> {
        let row: FoundationRow = sqlx::query_as(
            r#"
            INSERT INTO public.foundations (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, 0::BIGINT AS tenant_count, created_at, updated_at
            "#,
        )
        .bind(foundation.id)
        .bind(&foundation.name)
        .bind(foundation.created_at)
        .bind(foundation.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating foundation", e))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Foundation>, DomainError> {
        let row: Option<FoundationRow> = sqlx::query_as(
            r#"
            SELECT f.id, f.name, COUNT(t.id) AS tenant_count, f.created_at, f.updated_at
            FROM public.foundations f
            LEFT JOIN public.tenants t ON t.foundation_id = f.id
            WHERE f.id = $1
            GROUP BY f.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding foundation", e))?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Foundation>, DomainError> {
        let rows: Vec<FoundationRow> = sqlx::query_as(
            r#"
            SELECT f.id, f.name, COUNT(t.id) AS tenant_count, f.created_at, f.updated_at
            FROM public.foundations f
            LEFT JOIN public.tenants t ON t.foundation_id = f.id
            GROUP BY f.id
            ORDER BY f.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing foundations", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, foundation: &Foundation) -> Result<Foundation, DomainError> {
        let row: Option<FoundationRow> = sqlx::query_as(
            r#"
            UPDATE public.foundations
            SET name = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, name,
                (SELECT COUNT(*) FROM public.tenants t WHERE t.foundation_id = foundations.id) AS tenant_count,
                created_at, updated_at
            "#,
        )
        .bind(foundation.id)
        .bind(&foundation.name)
        .bind(foundation.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating foundation", e))?;

        row.map(Into::into)
            .ok_or(DomainError::FoundationNotFound(foundation.id))
    }
}

// ----------------------------------------------------------------------------
// Workflow-side operations
// ----------------------------------------------------------------------------

/// `FOR SHARE` keeps the foundation alive until a provisioning commits.
pub(crate) async fn lock_for_share(conn: &mut PgConnection, id: &Uuid) -> Result<bool, DomainError> {
    let found: Option<Uuid> = sqlx::query_scalar("SELECT id FROM public.foundations WHERE id = $1 FOR SHARE")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| db_error("locking foundation", e))?;
    Ok(found.is_some())
}

/// `FOR UPDATE` blocks provisioning into this foundation until the delete ends.
pub(crate) async fn lock_for_delete(conn: &mut PgConnection, id: &Uuid) -> Result<bool, DomainError> {
    let found: Option<Uuid> = sqlx::query_scalar("SELECT id FROM public.foundations WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| db_error("locking foundation", e))?;
    Ok(found.is_some())
}

pub(crate) async fn delete_in(conn: &mut PgConnection, id: &Uuid) -> Result<(), DomainError> {
    sqlx::query("DELETE FROM public.foundations WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| db_error("deleting foundation", e))?;
    Ok(())
}
