//! Error types for muxcable commands.

use std::io;

use sonic_db::DbError;
use thiserror::Error;

/// Result type alias for muxcable operations.
pub type MuxCableResult<T> = Result<T, MuxCableError>;

/// Errors that can occur while running a muxcable command.
#[derive(Debug, Error)]
pub enum MuxCableError {
    /// The requested port has no mux cable entry.
    #[error("Port '{port}' is not a valid port present on mux_cable ({table})")]
    PortNotFound {
        /// The port name given on the command line.
        port: String,
        /// The table that was searched.
        table: String,
    },

    /// Database access failed.
    #[error(transparent)]
    Database(#[from] DbError),

    /// Settings file could not be loaded or failed validation.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// Writing command output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MuxCableError {
    /// Creates a port not found error.
    pub fn port_not_found(port: impl Into<String>, table: impl Into<String>) -> Self {
        Self::PortNotFound {
            port: port.into(),
            table: table.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_not_found_display() {
        let err = MuxCableError::port_not_found("Ethernet33", "MUX_CABLE");
        assert_eq!(
            err.to_string(),
            "Port 'Ethernet33' is not a valid port present on mux_cable (MUX_CABLE)"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_database_error_is_transparent() {
        let err: MuxCableError = DbError::command("KEYS", "Connection refused").into();
        assert_eq!(
            err.to_string(),
            "Database operation failed: KEYS: Connection refused"
        );
        assert_eq!(err.exit_code(), 1);
    }
}
