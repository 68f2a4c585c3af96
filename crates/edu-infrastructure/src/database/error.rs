//! sqlx → domain error conversion

use tracing::error;

use edu_core::error::DomainError;

/// Logs the failure with its context and maps it to an infrastructure error.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    error!(error = %err, "Database error while {}", context);
    match err {
        sqlx::Error::PoolTimedOut => {
            DomainError::DatabaseError("timed out waiting for a database connection".into())
        }
        other => DomainError::DatabaseError(other.to_string()),
    }
}
