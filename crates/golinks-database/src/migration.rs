//! Schema migration runner.

use sqlx::PgPool;
use tracing::info;

use golinks_core::error::{AppError, ErrorKind};
use golinks_core::result::AppResult;

/// Apply pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Running link store migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Link store schema is up to date");
    Ok(())
}
