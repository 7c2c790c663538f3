/// Storage-specific errors
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),
}

impl From<StorageError> for roster_core::RosterError {
    fn from(err: StorageError) -> Self {
        roster_core::RosterError::database(err.to_string())
    }
}
