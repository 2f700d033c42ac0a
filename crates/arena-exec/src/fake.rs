//! In-memory executor for tests.
//!
//! [`FakeExecutor`] never spawns anything. It records every command it is
//! handed and answers with queued [`ProcessResult`]s (or an empty success once
//! the queue is drained).

use crate::command::ArenaCommand;
use crate::executor::{ExecFuture, Executor, OutputSink};
use crate::output::ProcessResult;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// A command as seen by [`FakeExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    /// Program name.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Timeout the command carried.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Default)]
struct FakeState {
    responses: VecDeque<ProcessResult>,
    recorded: Vec<RecordedCommand>,
}

/// Records commands and replays canned results. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    state: Arc<Mutex<FakeState>>,
}

impl FakeExecutor {
    /// Create an executor with no queued results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for the next call.
    #[must_use]
    pub fn with_response(self, result: ProcessResult) -> Self {
        self.push_response(result);
        self
    }

    /// Queue a result for the next call.
    pub fn push_response(&self, result: ProcessResult) {
        self.state.lock().responses.push_back(result);
    }

    /// All commands executed so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<RecordedCommand> {
        self.state.lock().recorded.clone()
    }

    /// Arguments of the most recent command.
    #[must_use]
    pub fn last_args(&self) -> Option<Vec<String>> {
        self.state.lock().recorded.last().map(|c| c.args.clone())
    }

    /// Number of commands executed so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().recorded.len()
    }

    fn next_response(&self, command: &ArenaCommand) -> ProcessResult {
        let mut state = self.state.lock();
        state.recorded.push(RecordedCommand {
            program: command.program().to_string(),
            args: command.arguments().to_vec(),
            timeout: command.timeout_limit(),
        });
        state.responses.pop_front().unwrap_or_default()
    }
}

impl Executor for FakeExecutor {
    fn execute(&self, mut command: ArenaCommand) -> ExecFuture<'_, ProcessResult> {
        Box::pin(async move {
            if let Some(err) = command.take_error() {
                return Err(err);
            }
            Ok(self.next_response(&command))
        })
    }

    fn execute_streamed<'a>(
        &'a self,
        mut command: ArenaCommand,
        sink: OutputSink<'a>,
    ) -> ExecFuture<'a, i32> {
        Box::pin(async move {
            if let Some(err) = command.take_error() {
                return Err(err);
            }
            let result = self.next_response(&command);
            sink.write_all(result.stdout.as_bytes()).await?;
            sink.write_all(result.stderr.as_bytes()).await?;
            sink.flush().await?;
            Ok(result.exit_code)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_queued_results_then_defaults() {
        let fake = FakeExecutor::new()
            .with_response(ProcessResult::ok("first"))
            .with_response(ProcessResult::failed(1, "second"));

        let first = fake.execute(ArenaCommand::new("arena").arg("a")).await.unwrap();
        let second = fake.execute(ArenaCommand::new("arena").arg("b")).await.unwrap();
        let third = fake.execute(ArenaCommand::new("arena").arg("c")).await.unwrap();

        assert_eq!(first.stdout, "first");
        assert_eq!(second.exit_code, 1);
        assert!(third.success());
        assert_eq!(fake.call_count(), 3);
        assert_eq!(fake.last_args(), Some(vec!["c".to_string()]));
    }

    #[tokio::test]
    async fn test_clones_share_recordings() {
        let fake = FakeExecutor::new();
        let handle = fake.clone();

        fake.execute(
            ArenaCommand::new("arena")
                .args(["list", "-o", "json"])
                .timeout(Duration::from_secs(3)),
        )
        .await
        .unwrap();

        let recorded = handle.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].program, "arena");
        assert_eq!(recorded[0].args, ["list", "-o", "json"]);
        assert_eq!(recorded[0].timeout, Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn test_streamed_writes_canned_output() {
        let fake = FakeExecutor::new().with_response(ProcessResult::new(0, "log line\n", ""));
        let mut sink = Vec::new();

        let code = fake
            .execute_streamed(ArenaCommand::new("arena").arg("logs"), &mut sink)
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(sink, b"log line\n");
    }

    #[tokio::test]
    async fn test_validation_errors_are_not_recorded() {
        let fake = FakeExecutor::new();
        let err = fake
            .execute(ArenaCommand::new("arena").arg("x\0y"))
            .await
            .unwrap_err();

        assert!(err.is_validation_error());
        assert_eq!(fake.call_count(), 0);
    }
}
