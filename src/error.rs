//! Error types for dbkit operations.
//!
//! Batch execution absorbs statement and rollback failures into a
//! [`BatchOutcome`](crate::database::BatchOutcome); every other variant is
//! returned to the caller.

use thiserror::Error;

/// Core error type for database operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Connection is already open")]
    AlreadyOpen,

    #[error("Connection is not open")]
    NotOpen,

    #[error("Failed to begin transaction: {0}")]
    Begin(String),

    #[error("Statement {index} failed: {message}")]
    Statement { index: usize, message: String },

    #[error("Deadline exceeded before statement {index}")]
    DeadlineExceeded { index: usize },

    #[error("Failed to roll back transaction: {0}")]
    Rollback(String),

    #[error("Failed to commit transaction: {0}")]
    Commit(String),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl DbError {
    /// Build a statement error for the statement at `index`.
    pub fn statement(index: usize, message: impl Into<String>) -> Self {
        Self::Statement {
            index,
            message: message.into(),
        }
    }

    /// Whether this error is a statement-level failure that a batch recovers
    /// from by rolling back.
    pub fn is_statement_failure(&self) -> bool {
        matches!(
            self,
            Self::Statement { .. } | Self::DeadlineExceeded { .. } | Self::Sqlite(_)
        )
    }
}

/// Result type alias for dbkit operations.
pub type Result<T> = std::result::Result<T, DbError>;
