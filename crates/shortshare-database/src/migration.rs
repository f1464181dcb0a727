//! Schema migrations for the `shares` and `share_files` tables.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use shortshare_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Share schema migration failed", e)
    })?;
    info!(migrations = MIGRATOR.iter().count(), "Share schema up to date");
    Ok(())
}
