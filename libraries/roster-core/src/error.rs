/// Core error types for Roster
use crate::types::UserId;
use thiserror::Error;

/// Result type alias using `RosterError`
pub type Result<T> = std::result::Result<T, RosterError>;

/// Core error type for Roster
#[derive(Error, Debug)]
pub enum RosterError {
    /// A required field is missing or fails its constraints
    #[error("{message}")]
    Validation {
        /// Field the message refers to
        field: String,
        /// Human-readable description naming the field
        message: String,
    },

    /// A uniqueness constraint would be violated
    #[error("User with this {field} already exists: {value}")]
    Conflict {
        /// Column that collided (`name` or `email`)
        field: String,
        /// The value that already exists
        value: String,
    },

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl RosterError {
    /// Create a validation error naming the offending field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a conflict error naming the colliding field and value
    pub fn conflict(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for RosterError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
