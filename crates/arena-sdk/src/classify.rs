//! Turning failed tool runs into typed errors.
//!
//! The tool reports most conditions only as text, so classification matches
//! its wording. Every pattern lives in [`ErrorPatterns`] and is pinned by the
//! contract tests below; when the tool changes its wording, bump
//! [`ErrorPatterns::REVISION`] along with the templates.

use crate::error::{ArenaError, ErrorKind};
use arena_exec::ProcessResult;

/// Text templates the tool prints for conditions it has no exit code for.
///
/// `{name}` and `{namespace}` are substituted before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPatterns {
    /// Printed by `submit` / `serve <type>` when the name is taken.
    pub job_exists: &'static str,
    /// Printed by `get` for a missing training job.
    pub training_not_found: &'static str,
    /// Printed by `serve get` for a missing serving job.
    pub serving_not_found: &'static str,
}

impl ErrorPatterns {
    /// Bumped whenever a template changes.
    pub const REVISION: u32 = 1;

    /// Wording of the supported tool releases.
    pub const CURRENT: Self = Self {
        job_exists: "the job {name} is already exist, please delete it first.",
        training_not_found: "Not found training job {name} in namespace {namespace}",
        serving_not_found: "Not found serving job {name}",
    };

    fn render(template: &str, name: &str, namespace: &str) -> String {
        template
            .replace("{name}", name)
            .replace("{namespace}", namespace)
    }

    /// Returns `true` if `output` reports that `name` already exists.
    #[must_use]
    pub fn is_job_exists(&self, output: &str, name: &str) -> bool {
        output.contains(&Self::render(self.job_exists, name, ""))
    }

    /// Returns `true` if `output` reports a missing training job.
    #[must_use]
    pub fn is_training_not_found(&self, output: &str, name: &str, namespace: &str) -> bool {
        output.contains(&Self::render(self.training_not_found, name, namespace))
    }

    /// Returns `true` if `output` reports a missing serving job.
    #[must_use]
    pub fn is_serving_not_found(&self, output: &str, name: &str) -> bool {
        output.contains(&Self::render(self.serving_not_found, name, ""))
    }
}

impl Default for ErrorPatterns {
    fn default() -> Self {
        Self::CURRENT
    }
}

/// Error for a failed run of an operation with no special cases.
///
/// Exit code 124 is reported as [`ErrorKind::Timeout`]; anything else as
/// `kind`, carrying the combined output.
#[must_use]
pub fn classify_failure(kind: ErrorKind, result: &ProcessResult) -> ArenaError {
    if result.timed_out() {
        return ArenaError::new(ErrorKind::Timeout, result.combined_output());
    }
    ArenaError::new(kind, result.combined_output())
}

/// Error for a failed submit of `name`.
///
/// The "already exists" wording yields `exists_kind`; other failures fall
/// back to [`classify_failure`] with `kind`.
#[must_use]
pub fn classify_submit(
    name: &str,
    exists_kind: ErrorKind,
    kind: ErrorKind,
    result: &ProcessResult,
) -> ArenaError {
    let output = result.combined_output();
    if !result.timed_out() && ErrorPatterns::CURRENT.is_job_exists(&output, name) {
        return ArenaError::new(exists_kind, output);
    }
    classify_failure(kind, result)
}

/// Returns `true` if a failed `get` only means the training job is absent.
#[must_use]
pub fn is_training_not_found(result: &ProcessResult, name: &str, namespace: &str) -> bool {
    !result.timed_out()
        && ErrorPatterns::CURRENT.is_training_not_found(&result.combined_output(), name, namespace)
}

/// Returns `true` if a failed `serve get` only means the serving job is absent.
#[must_use]
pub fn is_serving_not_found(result: &ProcessResult, name: &str) -> bool {
    !result.timed_out()
        && ErrorPatterns::CURRENT.is_serving_not_found(&result.combined_output(), name)
}
