//! Error types for database operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur while talking to a SONiC database.
#[derive(Debug, Error)]
pub enum DbError {
    /// Could not open or keep a connection to the database server.
    #[error("Database connection error: {0}")]
    Connection(String),

    /// A command against the database failed.
    #[error("Database operation failed: {operation}: {message}")]
    Command {
        /// The operation that failed (e.g., "KEYS", "HGETALL", "HSET").
        operation: String,
        /// Error message.
        message: String,
    },

    /// Stored data did not have the expected shape.
    #[error("Invalid data format: {0}")]
    InvalidData(String),

    /// A mock table fixture could not be read.
    #[error("Failed to read mock table {}: {source}", path.display())]
    FixtureIo {
        /// The fixture file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A mock table fixture is not valid JSON.
    #[error("Failed to parse mock table {}: {source}", path.display())]
    FixtureParse {
        /// The fixture file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl DbError {
    /// Creates a command error.
    pub fn command(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::Command {
            operation: operation.into(),
            message: message.to_string(),
        }
    }
}
