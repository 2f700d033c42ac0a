//! Structured process results.

use std::process::{ExitStatus, Output};
use std::time::Duration;

/// Exit code reported when the executor kills a command for exceeding its timeout.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Exit code reported when the child was terminated by a signal.
const SIGNALED_EXIT_CODE: i32 = -1;

/// The outcome of one buffered invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessResult {
    /// Process exit code; [`TIMEOUT_EXIT_CODE`] on timeout.
    pub exit_code: i32,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl ProcessResult {
    /// Create a result from its parts.
    #[must_use]
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// A successful result with the given stdout.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout, "")
    }

    /// A failed result with the given exit code and stderr.
    #[must_use]
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::new(exit_code, "", stderr)
    }

    /// The synthetic result of a command killed after `limit`.
    #[must_use]
    pub fn timed_out_after(limit: Duration, command_line: &str) -> Self {
        Self::failed(
            TIMEOUT_EXIT_CODE,
            format!(
                "timeout for executing command(timeout={}s): [{command_line}]",
                limit.as_secs_f64()
            ),
        )
    }

    pub(crate) fn from_output(output: &Output) -> Self {
        Self {
            exit_code: exit_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Check if the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if the executor killed the process on timeout.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.exit_code == TIMEOUT_EXIT_CODE
    }

    /// Stdout followed by stderr, as the tool printed them.
    #[must_use]
    pub fn combined_output(&self) -> String {
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        combined.push_str(&self.stdout);
        if !self.stdout.is_empty() && !self.stdout.ends_with('\n') && !self.stderr.is_empty() {
            combined.push('\n');
        }
        combined.push_str(&self.stderr);
        combined
    }
}

pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(SIGNALED_EXIT_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_timeout_predicates() {
        assert!(ProcessResult::ok("{}").success());
        assert!(!ProcessResult::failed(1, "boom").success());

        let timed_out = ProcessResult::timed_out_after(Duration::from_secs(1), "arena list");
        assert!(timed_out.timed_out());
        assert!(!timed_out.success());
        assert!(timed_out.stdout.is_empty());
        assert_eq!(
            timed_out.stderr,
            "timeout for executing command(timeout=1s): [arena list]"
        );
    }

    #[test]
    fn test_combined_output_separates_streams() {
        let result = ProcessResult::new(1, "partial", "error: boom");
        assert_eq!(result.combined_output(), "partial\nerror: boom");

        let result = ProcessResult::new(1, "line\n", "error");
        assert_eq!(result.combined_output(), "line\nerror");

        let result = ProcessResult::new(1, "", "error");
        assert_eq!(result.combined_output(), "error");
    }
}
