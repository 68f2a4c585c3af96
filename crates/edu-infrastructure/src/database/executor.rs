// ============================================================================
// EDU Infrastructure - Namespace Executor
// File: crates/edu-infrastructure/src/database/executor.rs
// ============================================================================
//! The only way tenant-scoped code obtains a database connection.
//!
//! Every unit of work runs inside its own transaction on a pooled connection:
//!
//! 1. take the shared advisory lock of the namespace,
//! 2. set `search_path` transaction-locally, but only if the namespace exists,
//! 3. confirm the server reports that namespace as current.
//!
//! The setting dies with the transaction, so a connection goes back to the
//! pool with no namespace selected whether the work committed, rolled back,
//! or was dropped half way. Cached prepared statements are re-planned by the
//! server whenever `search_path` differs from when they were prepared.

use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::{debug, warn};

use edu_core::domain::{ExecutionContext, NamespaceKey};
use edu_core::error::DomainError;

use super::db_error;
use super::locks::lock_namespace_shared;

#[derive(Clone)]
pub struct NamespaceExecutor {
    pool: PgPool,
    statement_timeout: Option<Duration>,
}

impl NamespaceExecutor {
    pub fn new(pool: PgPool, statement_timeout: Option<Duration>) -> Self {
        Self { pool, statement_timeout }
    }

    /// Opens a transaction bound to the namespace of `ctx`.
    ///
    /// Fails with `TenantNotFound` when the namespace does not exist; no
    /// statement of the caller runs in that case.
    pub async fn begin(&self, ctx: &ExecutionContext) -> Result<NamespaceTransaction, DomainError> {
        let namespace = ctx.namespace();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("acquiring a connection", e))?;

        lock_namespace_shared(&mut tx, namespace).await?;
        select_namespace(&mut tx, namespace).await?;

        if let Some(timeout) = self.statement_timeout {
            sqlx::query("SELECT set_config('statement_timeout', $1, true)")
                .bind(format!("{}ms", timeout.as_millis()))
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("setting statement timeout", e))?;
        }

        debug!(tenant = %namespace, "Namespace transaction started");
        Ok(NamespaceTransaction {
            tx,
            namespace: namespace.clone(),
        })
    }

    /// Runs `work` inside a namespace transaction, committing on `Ok` and
    /// rolling back on `Err`.
    pub async fn run<T, F>(&self, ctx: &ExecutionContext, work: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, DomainError>> + Send,
    {
        let mut scoped = self.begin(ctx).await?;
        match work(scoped.conn()).await {
            Ok(value) => {
                scoped.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = scoped.rollback().await {
                    warn!("Rollback after failed unit of work also failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}

/// A transaction whose `search_path` names exactly one tenant namespace.
/// Dropping it without commit rolls back.
pub struct NamespaceTransaction {
    tx: Transaction<'static, Postgres>,
    namespace: NamespaceKey,
}

impl NamespaceTransaction {
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    pub async fn commit(self) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| db_error("committing namespace transaction", e))?;
        debug!(tenant = %self.namespace, "Namespace transaction committed");
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), DomainError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| db_error("rolling back namespace transaction", e))
    }
}

/// Points `search_path` at `namespace` for the rest of the current transaction.
///
/// The `set_config` only runs when the namespace row exists, so an unknown
/// namespace leaves the setting untouched and surfaces as `TenantNotFound`.
pub(crate) async fn select_namespace(
    conn: &mut PgConnection,
    namespace: &NamespaceKey,
) -> Result<(), DomainError> {
    let applied: Option<String> = sqlx::query_scalar(
        r#"
        SELECT set_config('search_path', $1, true)
        FROM pg_catalog.pg_namespace
        WHERE nspname = $2
        "#,
    )
    .bind(namespace.quoted())
    .bind(namespace.as_str())
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| db_error("selecting namespace", e))?;

    if applied.is_none() {
        warn!(tenant = %namespace, "Namespace does not exist");
        return Err(DomainError::TenantNotFound(namespace.to_string()));
    }

    let current: Option<String> = sqlx::query_scalar("SELECT current_schema()")
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| db_error("verifying namespace", e))?;

    match current {
        Some(current) if current == namespace.as_str() => Ok(()),
        other => Err(DomainError::DatabaseError(format!(
            "namespace switch to '{}' not confirmed (current: {:?})",
            namespace, other
        ))),
    }
}

/// Whether a namespace with this key exists, as seen by this transaction.
pub(crate) async fn namespace_exists(
    conn: &mut PgConnection,
    namespace: &NamespaceKey,
) -> Result<bool, DomainError> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_catalog.pg_namespace WHERE nspname = $1)")
        .bind(namespace.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| db_error("checking namespace existence", e))
}
