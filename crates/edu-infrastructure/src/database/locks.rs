// ============================================================================
// EDU Infrastructure - Namespace Locks
// File: crates/edu-infrastructure/src/database/locks.rs
// ============================================================================
//! Transaction-scoped advisory locks keyed by namespace.
//!
//! Request transactions hold the shared lock for their whole lifetime, the
//! lifecycle workflows take the exclusive one. A namespace therefore cannot be
//! dropped while a request is still working inside it, and a request that
//! starts after a drop sees the namespace gone.

use sha2::{Digest, Sha256};
use sqlx::PgConnection;

use edu_core::domain::NamespaceKey;
use edu_core::error::DomainError;

use super::db_error;

const LOCK_KEY_PREFIX: &str = "edu.namespace:";

pub(crate) fn namespace_lock_key(namespace: &NamespaceKey) -> i64 {
    let digest = Sha256::digest(format!("{}{}", LOCK_KEY_PREFIX, namespace).as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    i64::from_be_bytes(bytes)
}

pub(crate) async fn lock_namespace_shared(
    conn: &mut PgConnection,
    namespace: &NamespaceKey,
) -> Result<(), DomainError> {
    sqlx::query("SELECT pg_advisory_xact_lock_shared($1)")
        .bind(namespace_lock_key(namespace))
        .execute(&mut *conn)
        .await
        .map_err(|e| db_error("taking shared namespace lock", e))?;
    Ok(())
}

pub(crate) async fn lock_namespace_exclusive(
    conn: &mut PgConnection,
    namespace: &NamespaceKey,
) -> Result<(), DomainError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(namespace_lock_key(namespace))
        .execute(&mut *conn)
        .await
        .map_err(|e| db_error("taking exclusive namespace lock", e))?;
    Ok(())
}
