//! SQLite pool construction and migration runner for libris.
//!
//! The pool returned here is the single shared storage handle; it is passed
//! explicitly through `InitCtx` rather than stored in a global. A failure to
//! connect or to apply the schema is fatal to startup, which is the only
//! fatal error path in the service.

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use libris_kernel::settings::DatabaseSettings;
use libris_kernel::Migration;

/// Open the SQLite store, creating the database file if it does not exist.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(&settings.path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open SQLite store at '{}'", settings.path))?;

    tracing::info!(path = %settings.path, "connection opened to database");

    Ok(pool)
}

/// Apply module-contributed migrations in the order given.
///
/// Migrations are expected to be idempotent (`IF NOT EXISTS` guards); there
/// is no version bookkeeping table.
pub async fn apply_migrations(
    pool: &SqlitePool,
    migrations: &[(String, Migration)],
) -> anyhow::Result<()> {
    for (module, migration) in migrations {
        sqlx::query(migration.up)
            .execute(pool)
            .await
            .with_context(|| {
                format!(
                    "failed to apply migration '{}' from module '{}'",
                    migration.id, module
                )
            })?;

        tracing::info!(module = %module, migration = migration.id, "migration applied");
    }

    Ok(())
}
