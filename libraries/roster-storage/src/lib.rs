//! Roster Storage
//!
//! `SQLite` persistence layer for Roster.
//!
//! This crate provides the durable `users` table behind the
//! [`roster_core::UserStore`] contract. Uniqueness of `name` and `email` is
//! enforced by the schema itself, so concurrent writers are serialized by the
//! engine and readers never observe a state violating the invariants.
//!
//! # Example
//!
//! ```rust,no_run
//! use roster_core::{NewUser, UserStore};
//! use roster_storage::{create_pool, run_migrations, SqliteUserStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create database connection
//! let pool = create_pool("sqlite://roster.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteUserStore::new(pool);
//! let user = store.create(NewUser::new("alice", "a@x.com")?).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

// Vertical slices
pub mod users;

pub use error::StorageError;
pub use store::SqliteUserStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://roster.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    // Parse the URL into options so we can configure SQLite behavior
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true) // Create database file if it doesn't exist
        .journal_mode(SqliteJournalMode::Wal) // Use WAL mode for better concurrency
        .busy_timeout(std::time::Duration::from_secs(30)); // Wait up to 30s for locks

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    Ok(pool)
}
