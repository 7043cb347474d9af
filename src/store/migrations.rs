//! Embedded schema migrations for the `foos` table.
//!
//! Migrations are compiled in from `migrations/` and are reversible.

use sqlx::migrate::Migrator;
use sqlx::PgPool;

use super::errors::{StoreError, StoreResult};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply all pending migrations.
pub async fn run(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running up migrations");

    MIGRATOR
        .run(pool)
        .await
        .map_err(|source| StoreError::Migrate {
            direction: "up",
            source,
        })?;

    tracing::info!("Up migrations complete");
    Ok(())
}

/// Revert every applied migration.
pub async fn revert(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running down migrations");

    MIGRATOR
        .undo(pool, 0)
        .await
        .map_err(|source| StoreError::Migrate {
            direction: "down",
            source,
        })?;

    tracing::info!("Down migrations complete");
    Ok(())
}
