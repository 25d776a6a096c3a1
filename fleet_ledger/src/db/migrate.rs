//! Embedded schema migrations.

use anyhow::anyhow;
use diesel::{Connection, SqliteConnection, connection::SimpleConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use super::connection::sqlite_path;

/// Embedded Diesel migrations bundled with this crate.
///
/// Applied by [`run_sqlite`] to bring the fleet schema up to date.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Runs pending migrations on the SQLite database at `url`.
///
/// Switches the file to WAL journaling first, then applies every embedded
/// migration not yet recorded in `__diesel_schema_migrations`.
pub fn run_sqlite(url: &str) -> anyhow::Result<()> {
    let mut conn = SqliteConnection::establish(sqlite_path(url))?;
    conn.batch_execute("PRAGMA journal_mode=WAL;")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!(e))?;
    for version in &applied {
        tracing::info!(%version, "applied migration");
    }
    Ok(())
}

/// Runs pending migrations for `database_url`.
///
/// Accepts bare file paths, `sqlite:` and `sqlite://` URLs. PostgreSQL URLs are
/// rejected: the fleet schema relies on SQLite-specific features.
pub fn run_all(database_url: &str) -> anyhow::Result<()> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        anyhow::bail!("Unsupported DATABASE_URL (PostgreSQL is not supported): {database_url}");
    }
    run_sqlite(database_url)
}
