//! Error types for the Sybase MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error handling.
//! Each variant renders a message an AI assistant can act on; the tool layer
//! prefixes it with `Error: ` when returning it as a tool result.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// Input rejected by the static safety rules. Never reaches the client.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The external client could not be launched or exited unsuccessfully.
    #[error("Execution failed: {message}")]
    Execution { message: String },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Timeout: {operation} exceeded {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DbError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an execution error.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True if the error was raised before the external client was spawned.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::decode(format!("Failed to serialize records: {}", err))
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
