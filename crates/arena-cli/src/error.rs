//! CLI error types.

use arena_sdk::ArenaError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// The arena tool reported a failure.
    #[error(transparent)]
    Arena(#[from] ArenaError),
    /// A named job does not exist.
    #[error("{kind} job not found: {name}")]
    NotFound {
        /// `training` or `serving`.
        kind: &'static str,
        /// Requested job name.
        name: String,
    },
    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Validation problems exit with 2 like clap usage errors, timeouts with
    /// 124 like the tool itself, everything else with 1.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Arena(err) if err.is_validation_error() => 2,
            Self::Arena(err) if err.is_timeout() => 124,
            _ => 1,
        }
    }
}
