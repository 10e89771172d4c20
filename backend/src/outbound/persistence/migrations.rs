//! Embedded schema migrations.
//!
//! Migrations run over a short-lived synchronous `PgConnection` on a blocking
//! thread, before the async pool serves any request.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// No connection to the target database.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    /// A migration failed to run.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking migration task did not finish.
    #[error("migration task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn apply_pending(database_url: &str) -> Result<usize, MigrationError> {
    let mut connection = PgConnection::establish(database_url)?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

/// Apply every pending embedded migration to `database_url`.
///
/// # Errors
///
/// Returns [`MigrationError`] if the database is unreachable or a migration
/// fails.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_pending(&database_url)).await??;
    info!(applied, "database migrations applied");
    Ok(())
}
