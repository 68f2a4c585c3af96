//! Database connection pool

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use edu_shared::config::DatabaseSettings;

/// One pool shared by every tenant; its size does not depend on tenant count.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_seconds))
        // broken connections are replaced here, not by re-running workflows
        .test_before_acquire(true)
        .connect(&settings.url)
        .await?;

    // Test connection
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

pub fn statement_timeout(settings: &DatabaseSettings) -> Option<Duration> {
    (settings.statement_timeout_ms > 0).then(|| Duration::from_millis(settings.statement_timeout_ms))
}
