//! Custom error types for tasker.
//!
//! Every fallible operation in the crate returns [`TaskerError`], so callers
//! can tell a bad input apart from a missing task or a failed disk write.

use std::path::PathBuf;
use thiserror::Error;

use crate::task::TaskId;

/// Main error type for tasker operations
#[derive(Error, Debug)]
pub enum TaskerError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Caller supplied an argument that fails validation
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// Operation targeted a task id that is not in the store
    #[error("Task with ID {id} not found")]
    NotFound { id: TaskId },

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Persisting the task file failed
    #[error("Failed to save tasks to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the task file could not be decoded
    #[error("Malformed task file at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskerError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(id: TaskId) -> Self {
        Self::NotFound { id }
    }

    /// Create a persistence error for the given file
    pub fn persist(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }

    /// Create a decoding error for a 1-based line number
    pub fn corrupt(line: usize, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            line,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error was caused by what the user asked for rather than
    /// by the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::NotFound { .. })
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            Self::NotFound { .. } => 3,
            Self::Persist { .. } | Self::Corrupt { .. } | Self::Io(_) => 4,
            Self::Config { .. } => 5,
            _ => 1,
        }
    }
}

/// Type alias for tasker results
pub type Result<T> = std::result::Result<T, TaskerError>;
