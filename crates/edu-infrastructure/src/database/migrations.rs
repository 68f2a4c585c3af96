//! Directory schema migrations (tenant-independent tables in `public`)

use sqlx::migrate::MigrateError;
use sqlx::PgPool;
use tracing::info;

pub async fn run_directory_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Directory migrations applied");
    Ok(())
}
