use crate::classify::classify_failure;
use crate::config::ClientConfig;
use crate::error::{ArenaError, ErrorKind, Result};
use arena_exec::{ArenaCommand, Executor, OutputSink, ProcessResult, TIMEOUT_EXIT_CODE};
use std::sync::Arc;
use tracing::debug;

/// Configuration plus the executor that runs the tool.
///
/// Cheap to clone; the executor is shared.
pub(crate) struct Connection<E> {
    config: ClientConfig,
    executor: Arc<E>,
}

impl<E> Clone for Connection<E> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<E: Executor> Connection<E> {
    pub(crate) fn new(config: ClientConfig, executor: Arc<E>) -> Self {
        Self { config, executor }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// A copy scoped to another namespace.
    pub(crate) fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        Self {
            config: self.config.clone().with_namespace(namespace),
            executor: Arc::clone(&self.executor),
        }
    }

    /// `arena <words...>` followed by the connection flags.
    pub(crate) fn command(&self, words: &[&str]) -> ArenaCommand {
        ArenaCommand::new(&self.config.binary)
            .args(words.iter().copied())
            .args(self.config.connection_args())
            .maybe_timeout(self.config.timeout())
    }

    /// Runs `command`; a non-zero exit is returned, not raised.
    pub(crate) async fn run(&self, kind: ErrorKind, command: ArenaCommand) -> Result<ProcessResult> {
        debug!(operation = kind.code(), command = %command, "running arena");
        let result = self
            .executor
            .execute(command)
            .await
            .map_err(|err| ArenaError::exec(kind, err))?;
        debug!(
            operation = kind.code(),
            exit_code = result.exit_code,
            "arena finished"
        );
        Ok(result)
    }

    /// Runs `command` and returns its stdout, raising `kind` on failure.
    pub(crate) async fn run_ok(&self, kind: ErrorKind, command: ArenaCommand) -> Result<String> {
        let result = self.run(kind, command).await?;
        if !result.success() {
            return Err(classify_failure(kind, &result));
        }
        Ok(result.stdout)
    }

    /// Runs `command`, forwarding its output lines to `sink`.
    pub(crate) async fn stream(
        &self,
        kind: ErrorKind,
        command: ArenaCommand,
        sink: OutputSink<'_>,
    ) -> Result<()> {
        debug!(operation = kind.code(), command = %command, "streaming arena");
        let exit_code = self
            .executor
            .execute_streamed(command, sink)
            .await
            .map_err(|err| ArenaError::exec(kind, err))?;
        match exit_code {
            0 => Ok(()),
            TIMEOUT_EXIT_CODE => Err(ArenaError::new(
                ErrorKind::Timeout,
                "log stream exceeded the configured timeout",
            )),
            code => Err(ArenaError::new(kind, format!("arena exited with code {code}"))),
        }
    }
}

/// Rejects an empty job name before anything is spawned.
pub(crate) fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ArenaError::validate_args("job name must not be empty"));
    }
    Ok(())
}

/// The trailing command token, if any.
pub(crate) fn trailing(command: &str) -> Option<String> {
    Some(command.trim())
        .filter(|command| !command.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_exec::FakeExecutor;
    use std::time::Duration;

    fn connection(config: ClientConfig) -> (Connection<FakeExecutor>, FakeExecutor) {
        let fake = FakeExecutor::new();
        (Connection::new(config, Arc::new(fake.clone())), fake)
    }

    #[test]
    fn test_command_places_connection_flags_after_words() {
        let (conn, _) = connection(
            ClientConfig::default()
                .with_kubeconfig("/kube/config")
                .with_timeout(Duration::from_secs(5)),
        );
        let command = conn.command(&["serve", "get"]).arg("mnist");

        assert_eq!(command.program(), "arena");
        assert_eq!(
            command.arguments(),
            [
                "serve",
                "get",
                "--config=/kube/config",
                "--namespace=default",
                "--arena-namespace=arena-system",
                "--loglevel=info",
                "mnist",
            ]
        );
        assert_eq!(command.timeout_limit(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_with_namespace_leaves_original_untouched() {
        let (conn, _) = connection(ClientConfig::default());
        let scoped = conn.with_namespace("team-a");
        assert_eq!(scoped.namespace(), "team-a");
        assert_eq!(conn.namespace(), "default");
    }

    #[tokio::test]
    async fn test_run_ok_classifies_failure() {
        let (conn, fake) = connection(ClientConfig::default());
        fake.push_response(ProcessResult::failed(1, "Error: forbidden"));

        let err = conn
            .run_ok(ErrorKind::ListTrainingJobs, conn.command(&["list"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ListTrainingJobs);
        assert_eq!(err.message(), "Error: forbidden");
    }

    #[tokio::test]
    async fn test_invalid_argument_is_validation_error() {
        let (conn, fake) = connection(ClientConfig::default());
        let err = conn
            .run(ErrorKind::GetTrainingJob, conn.command(&["get"]).arg("bad\nname"))
            .await
            .unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_stream_maps_exit_codes() {
        let (conn, fake) = connection(ClientConfig::default());
        fake.push_response(ProcessResult::new(124, "partial\n", ""));
        let mut sink = Vec::new();

        let err = conn
            .stream(ErrorKind::LogsTrainingJob, conn.command(&["logs"]), &mut sink)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(sink, b"partial\n");
    }
}
