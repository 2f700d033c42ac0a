//! Error types for process execution.

use thiserror::Error;

/// Result type alias for execution operations.
pub type Result<T> = std::result::Result<T, ExecError>;

/// Errors raised before or while running the external tool.
///
/// A non-zero exit is *not* an error at this layer: it is reported through
/// [`crate::ProcessResult::exit_code`] and classified by the caller.
#[derive(Debug, Error)]
pub enum ExecError {
    /// An argument was rejected before the process was spawned.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// The rejected argument (with control characters escaped).
        argument: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The program path was empty or unsafe.
    #[error("invalid program path '{path}': {reason}")]
    InvalidProgram {
        /// The rejected path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The process could not be started.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while waiting on the child or writing to a sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExecError {
    /// Creates an `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(argument: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.escape_debug().to_string(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidProgram` error.
    #[must_use]
    pub fn invalid_program(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProgram {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error was raised before anything was spawned.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::InvalidProgram { .. })
    }
}
