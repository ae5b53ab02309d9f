//! Embedded schema migrations.
//!
//! Migrations run over a blocking wrapper around the async connection, so call
//! these from a plain thread or from `tokio::task::spawn_blocking`.

use diesel::Connection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub type MigrationError = Box<dyn std::error::Error + Send + Sync>;

type MigrationConnection = AsyncConnectionWrapper<AsyncPgConnection>;

/// Apply every pending migration, returning the versions applied.
pub fn run_pending(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = MigrationConnection::establish(database_url)?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    Ok(applied.iter().map(ToString::to_string).collect())
}

/// Roll back every applied migration, dropping both tables.
pub fn revert_all(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = MigrationConnection::establish(database_url)?;
    let reverted = conn.revert_all_migrations(MIGRATIONS)?;
    Ok(reverted.iter().map(ToString::to_string).collect())
}
