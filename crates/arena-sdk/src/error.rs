//! Error types for arena operations.
//!
//! Every failure carries an [`ErrorKind`] naming what went wrong and the raw
//! text that explains it (usually the tool's combined stdout and stderr).
//! `Display` shows a one-line summary; [`ArenaError::message`] returns the full
//! text.

use arena_exec::ExecError;
use std::fmt;
use thiserror::Error;

/// Result type alias for arena operations.
pub type Result<T> = std::result::Result<T, ArenaError>;

/// Closed taxonomy of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Submitting a training job failed.
    SubmitTrainingJob,
    /// Fetching a training job failed.
    GetTrainingJob,
    /// Listing training jobs failed.
    ListTrainingJobs,
    /// Deleting a training job failed.
    DeleteTrainingJob,
    /// Fetching training job logs failed.
    LogsTrainingJob,
    /// Pruning training jobs failed.
    PruneTrainingJobs,
    /// Scaling in a training job failed.
    ScaleInTrainingJob,
    /// Scaling out a training job failed.
    ScaleOutTrainingJob,
    /// Submitting a serving job failed.
    SubmitServingJob,
    /// Fetching a serving job failed.
    GetServingJob,
    /// Listing serving jobs failed.
    ListServingJobs,
    /// Deleting a serving job failed.
    DeleteServingJob,
    /// Fetching serving job logs failed.
    LogsServingJob,
    /// Splitting serving traffic across versions failed.
    TrafficRouterSplit,
    /// A training job with the same name already exists.
    TrainingJobExists,
    /// A serving job with the same name already exists.
    ServingJobExists,
    /// Querying node information failed.
    TopNode,
    /// Arguments were rejected before anything was run.
    ValidateArgs,
    /// The tool was killed after exceeding its timeout.
    Timeout,
    /// The tool succeeded but its output could not be decoded.
    MalformedResponse,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Stable snake-case identifier.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::SubmitTrainingJob => "training_job_submit",
            Self::GetTrainingJob => "training_job_get",
            Self::ListTrainingJobs => "training_job_list",
            Self::DeleteTrainingJob => "training_job_delete",
            Self::LogsTrainingJob => "training_job_logs",
            Self::PruneTrainingJobs => "prune_training_jobs",
            Self::ScaleInTrainingJob => "scalein_training_jobs",
            Self::ScaleOutTrainingJob => "scaleout_training_jobs",
            Self::SubmitServingJob => "serving_job_submit",
            Self::GetServingJob => "serving_job_get",
            Self::ListServingJobs => "serving_job_list",
            Self::DeleteServingJob => "serving_job_delete",
            Self::LogsServingJob => "serving_job_logs",
            Self::TrafficRouterSplit => "traffic_router_split",
            Self::TrainingJobExists => "training_job_exist",
            Self::ServingJobExists => "serving_job_exist",
            Self::TopNode => "top_node",
            Self::ValidateArgs => "validate_args",
            Self::Timeout => "timeout",
            Self::MalformedResponse => "malformed_response",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SubmitTrainingJob => "failed to submit training job",
            Self::GetTrainingJob => "failed to get training job",
            Self::ListTrainingJobs => "failed to list training jobs",
            Self::DeleteTrainingJob => "failed to delete training job",
            Self::LogsTrainingJob => "failed to get training job logs",
            Self::PruneTrainingJobs => "failed to prune training jobs",
            Self::ScaleInTrainingJob => "failed to scale in training job",
            Self::ScaleOutTrainingJob => "failed to scale out training job",
            Self::SubmitServingJob => "failed to submit serving job",
            Self::GetServingJob => "failed to get serving job",
            Self::ListServingJobs => "failed to list serving jobs",
            Self::DeleteServingJob => "failed to delete serving job",
            Self::LogsServingJob => "failed to get serving job logs",
            Self::TrafficRouterSplit => "failed to split traffic of serving job",
            Self::TrainingJobExists => "training job already exists",
            Self::ServingJobExists => "serving job already exists",
            Self::TopNode => "failed to get node information",
            Self::ValidateArgs => "invalid arguments",
            Self::Timeout => "command timed out",
            Self::MalformedResponse => "malformed response",
            Self::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Errors raised by arena operations.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// The tool ran (or arguments were checked) and the operation failed.
    #[error("{kind}: {}", first_line(.message))]
    Operation {
        /// What failed.
        kind: ErrorKind,
        /// Full explanation, typically the tool's combined output.
        message: String,
    },

    /// The tool could not be run at all.
    #[error("{kind}: {source}")]
    Exec {
        /// What was being attempted.
        kind: ErrorKind,
        /// Underlying execution error.
        #[source]
        source: ExecError,
    },
}

impl ArenaError {
    /// Creates an `Operation` error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Operation {
            kind,
            message: message.into(),
        }
    }

    /// Creates a `ValidateArgs` error.
    #[must_use]
    pub fn validate_args(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidateArgs, message)
    }

    /// Creates a `MalformedResponse` error.
    #[must_use]
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    /// Wraps an execution error raised while attempting `kind`.
    ///
    /// Argument rejections are reported as [`ErrorKind::ValidateArgs`].
    #[must_use]
    pub fn exec(kind: ErrorKind, source: ExecError) -> Self {
        let kind = if source.is_validation_error() {
            ErrorKind::ValidateArgs
        } else {
            kind
        };
        Self::Exec { kind, source }
    }

    /// The kind of failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Operation { kind, .. } | Self::Exec { kind, .. } => *kind,
        }
    }

    /// The full explanation.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Operation { message, .. } => message.clone(),
            Self::Exec { source, .. } => source.to_string(),
        }
    }

    /// Returns `true` if the tool was killed on timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }

    /// Returns `true` if a job with the same name already exists.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TrainingJobExists | ErrorKind::ServingJobExists
        )
    }

    /// Returns `true` if the error was raised before anything was run.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        self.kind() == ErrorKind::ValidateArgs
    }
}

fn first_line(message: &str) -> &str {
    message
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_single_line_summary() {
        let err = ArenaError::new(
            ErrorKind::SubmitTrainingJob,
            "\nError: the job tf-test is already exist\nUsage:\n  arena submit",
        );
        assert_eq!(
            err.to_string(),
            "failed to submit training job: Error: the job tf-test is already exist"
        );
        assert!(err.message().contains("Usage:"));
    }

    #[test]
    fn test_display_with_empty_message() {
        let err = ArenaError::new(ErrorKind::TopNode, "");
        assert_eq!(err.to_string(), "failed to get node information: ");
    }

    #[test]
    fn test_predicates() {
        assert!(ArenaError::new(ErrorKind::Timeout, "t").is_timeout());
        assert!(ArenaError::new(ErrorKind::TrainingJobExists, "x").is_already_exists());
        assert!(ArenaError::new(ErrorKind::ServingJobExists, "x").is_already_exists());
        assert!(ArenaError::validate_args("bad").is_validation_error());
        assert!(!ArenaError::malformed_response("bad").is_validation_error());
    }

    #[test]
    fn test_exec_validation_error_maps_to_validate_args() {
        let source = ExecError::invalid_argument("a\0b", "contains null byte");
        let err = ArenaError::exec(ErrorKind::SubmitTrainingJob, source);
        assert_eq!(err.kind(), ErrorKind::ValidateArgs);
    }

    #[test]
    fn test_exec_spawn_error_keeps_operation_kind() {
        let source = ExecError::Spawn {
            program: "arena".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let err = ArenaError::exec(ErrorKind::ListTrainingJobs, source);
        assert_eq!(err.kind(), ErrorKind::ListTrainingJobs);
        assert_eq!(
            err.to_string(),
            "failed to list training jobs: failed to spawn 'arena': not found"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            ErrorKind::SubmitTrainingJob,
            ErrorKind::GetTrainingJob,
            ErrorKind::ListTrainingJobs,
            ErrorKind::DeleteTrainingJob,
            ErrorKind::LogsTrainingJob,
            ErrorKind::PruneTrainingJobs,
            ErrorKind::ScaleInTrainingJob,
            ErrorKind::ScaleOutTrainingJob,
            ErrorKind::SubmitServingJob,
            ErrorKind::GetServingJob,
            ErrorKind::ListServingJobs,
            ErrorKind::DeleteServingJob,
            ErrorKind::LogsServingJob,
            ErrorKind::TrafficRouterSplit,
            ErrorKind::TrainingJobExists,
            ErrorKind::ServingJobExists,
            ErrorKind::TopNode,
            ErrorKind::ValidateArgs,
            ErrorKind::Timeout,
            ErrorKind::MalformedResponse,
            ErrorKind::Unknown,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArenaError>();
    }
}
