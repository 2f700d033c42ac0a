//! Spawning the external tool.
//!
//! Two modes share one contract:
//!
//! - **Buffered** ([`Executor::execute`]): stdout and stderr are captured in
//!   memory and returned in a [`ProcessResult`].
//! - **Streamed** ([`Executor::execute_streamed`]): stdout and stderr lines are
//!   forwarded to a caller-supplied sink as they are produced; only the exit
//!   code is returned.
//!
//! A command with a timeout that runs past it is killed and reported with
//! exit code [`TIMEOUT_EXIT_CODE`](crate::TIMEOUT_EXIT_CODE). A non-zero exit
//! is never an [`ExecError`]; only validation, spawn and I/O failures are.

use crate::command::ArenaCommand;
use crate::error::{ExecError, Result};
use crate::output::{self, ProcessResult};
use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Boxed future returned by [`Executor`] methods.
pub type ExecFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Sink receiving streamed output lines.
pub type OutputSink<'a> = &'a mut (dyn AsyncWrite + Unpin + Send);

/// Runs [`ArenaCommand`]s.
///
/// Implemented by [`ProcessExecutor`] for real processes and by
/// `FakeExecutor` (feature `testing`) for tests.
pub trait Executor: Send + Sync {
    /// Run the command to completion and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command failed validation, could not be
    /// spawned, or its output could not be read.
    fn execute(&self, command: ArenaCommand) -> ExecFuture<'_, ProcessResult>;

    /// Run the command, forwarding each output line to `sink`, and return the
    /// exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the command failed validation, could not be
    /// spawned, or a line could not be read or written.
    fn execute_streamed<'a>(
        &'a self,
        command: ArenaCommand,
        sink: OutputSink<'a>,
    ) -> ExecFuture<'a, i32>;
}

/// Executes commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    /// Create a new process executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, command: ArenaCommand) -> ExecFuture<'_, ProcessResult> {
        Box::pin(run_buffered(command))
    }

    fn execute_streamed<'a>(
        &'a self,
        command: ArenaCommand,
        sink: OutputSink<'a>,
    ) -> ExecFuture<'a, i32> {
        Box::pin(run_streamed(command, sink))
    }
}

fn spawn(command: &ArenaCommand) -> Result<Child> {
    Command::new(command.program())
        .args(command.arguments())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecError::Spawn {
            program: command.program().to_string(),
            source,
        })
}

async fn run_buffered(mut command: ArenaCommand) -> Result<ProcessResult> {
    if let Some(err) = command.take_error() {
        return Err(err);
    }

    let command_line = command.command_line();
    debug!(command = %command_line, timeout = ?command.timeout_limit(), "executing command");

    let child = spawn(&command)?;

    let Some(limit) = command.timeout_limit() else {
        let output = child.wait_with_output().await?;
        return Ok(ProcessResult::from_output(&output));
    };

    // Dropping the wait future drops the child, and kill_on_drop kills it.
    match tokio::time::timeout(limit, child.wait_with_output()).await {
        Ok(output) => Ok(ProcessResult::from_output(&output?)),
        Err(_) => {
            warn!(command = %command_line, ?limit, "command timed out, killed");
            Ok(ProcessResult::timed_out_after(limit, &command_line))
        }
    }
}

async fn run_streamed(mut command: ArenaCommand, sink: OutputSink<'_>) -> Result<i32> {
    if let Some(err) = command.take_error() {
        return Err(err);
    }

    let command_line = command.command_line();
    debug!(command = %command_line, timeout = ?command.timeout_limit(), "streaming command");

    let mut child = spawn(&command)?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("child stdout was not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("child stderr was not captured"))?;

    let pump = async {
        forward_lines(stdout, stderr, &mut *sink).await?;
        Ok::<_, ExecError>(child.wait().await?)
    };

    let outcome = match command.timeout_limit() {
        Some(limit) => tokio::time::timeout(limit, pump).await,
        None => Ok(pump.await),
    };

    match outcome {
        Ok(status) => Ok(output::exit_code(status?)),
        Err(_) => {
            let limit = command.timeout_limit().unwrap_or_default();
            warn!(command = %command_line, ?limit, "command timed out, killed");
            child.kill().await?;
            let timed_out = ProcessResult::timed_out_after(limit, &command_line);
            write_line(sink, &timed_out.stderr).await?;
            sink.flush().await?;
            Ok(timed_out.exit_code)
        }
    }
}

/// Forward stdout and stderr lines to `sink` in the order they arrive.
///
/// Lines are copied as raw bytes; output that is not UTF-8 passes through
/// unchanged. A final line without a newline is forwarded as read.
async fn forward_lines<R1, R2>(
    stdout: R1,
    stderr: R2,
    sink: &mut (dyn AsyncWrite + Unpin + Send),
) -> Result<()>
where
    R1: tokio::io::AsyncRead + Unpin,
    R2: tokio::io::AsyncRead + Unpin,
{
    let mut out_reader = BufReader::new(stdout);
    let mut err_reader = BufReader::new(stderr);
    let mut out_buf = Vec::new();
    let mut err_buf = Vec::new();
    let mut out_open = true;
    let mut err_open = true;

    while out_open || err_open {
        tokio::select! {
            read = out_reader.read_until(b'\n', &mut out_buf), if out_open => {
                if read? == 0 {
                    out_open = false;
                } else {
                    sink.write_all(&out_buf).await?;
                    out_buf.clear();
                }
            }
            read = err_reader.read_until(b'\n', &mut err_buf), if err_open => {
                if read? == 0 {
                    err_open = false;
                } else {
                    sink.write_all(&err_buf).await?;
                    err_buf.clear();
                }
            }
        }
    }

    sink.flush().await?;
    Ok(())
}

async fn write_line(sink: &mut (dyn AsyncWrite + Unpin + Send), line: &str) -> Result<()> {
    sink.write_all(line.as_bytes()).await?;
    sink.write_all(b"\n").await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn sh(script: &str) -> ArenaCommand {
        ArenaCommand::new("sh").args(["-c", script])
    }

    #[tokio::test]
    async fn test_execute_captures_stdout_and_stderr() {
        let result = ProcessExecutor::new()
            .execute(sh("echo out; echo err >&2"))
            .await
            .unwrap();

        assert!(result.success());
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_a_result_not_an_error() {
        let result = ProcessExecutor::new()
            .execute(sh("echo failing >&2; exit 3"))
            .await
            .unwrap();

        assert_eq!(result.exit_code, 3);
        assert!(result.stderr.contains("failing"));
    }

    #[tokio::test]
    async fn test_timeout_kills_and_reports_124() {
        let started = Instant::now();
        let result = ProcessExecutor::new()
            .execute(ArenaCommand::new("sleep").arg("30").timeout(Duration::from_secs(1)))
            .await
            .unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_secs(10), "took {elapsed:?}");
        assert_eq!(result.exit_code, crate::TIMEOUT_EXIT_CODE);
        assert!(result.stdout.is_empty());
        assert!(result.stderr.contains("timeout=1s"));
        assert!(result.stderr.contains("sleep 30"));
    }

    #[tokio::test]
    async fn test_fast_command_within_timeout_is_unaffected() {
        let result = ProcessExecutor::new()
            .execute(sh("echo quick").timeout(Duration::from_secs(10)))
            .await
            .unwrap();

        assert!(result.success());
        assert_eq!(result.stdout, "quick\n");
    }

    #[tokio::test]
    async fn test_spawn_failure_is_an_error() {
        let err = ProcessExecutor::new()
            .execute(ArenaCommand::new("/nonexistent/arena-binary"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExecError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_validation_error_prevents_spawn() {
        let err = ProcessExecutor::new()
            .execute(ArenaCommand::new("echo").arg("bad\0arg"))
            .await
            .unwrap_err();

        assert!(err.is_validation_error());
    }

    #[tokio::test]
    async fn test_streamed_forwards_both_streams() {
        let mut sink: Vec<u8> = Vec::new();
        let code = ProcessExecutor::new()
            .execute_streamed(sh("echo one; echo two >&2; exit 2"), &mut sink)
            .await
            .unwrap();

        assert_eq!(code, 2);
        let text = String::from_utf8(sink).unwrap();
        let mut lines: Vec<&str> = text.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, ["one", "two"]);
    }

    #[tokio::test]
    async fn test_streamed_passes_invalid_utf8_through() {
        let mut sink: Vec<u8> = Vec::new();
        let code = ProcessExecutor::new()
            .execute_streamed(sh("printf 'ok\\n\\377bad\\nafter\\n'"), &mut sink)
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(sink, b"ok\n\xffbad\nafter\n");
    }

    #[tokio::test]
    async fn test_streamed_keeps_unterminated_last_line() {
        let mut sink: Vec<u8> = Vec::new();
        let code = ProcessExecutor::new()
            .execute_streamed(sh("printf 'done'"), &mut sink)
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(sink, b"done");
    }

    #[tokio::test]
    async fn test_streamed_timeout_reports_124() {
        let mut sink: Vec<u8> = Vec::new();
        let code = ProcessExecutor::new()
            .execute_streamed(
                sh("echo started; exec sleep 30").timeout(Duration::from_secs(1)),
                &mut sink,
            )
            .await
            .unwrap();

        assert_eq!(code, crate::TIMEOUT_EXIT_CODE);
        let text = String::from_utf8(sink).unwrap();
        assert!(text.starts_with("started\n"));
        assert!(text.contains("timeout for executing command"));
    }
}
