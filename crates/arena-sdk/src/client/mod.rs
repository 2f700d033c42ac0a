//! The facade: one [`ArenaClient`] per configuration, handing out
//! per-resource sub-clients.
//!
//! Every sub-client call spawns exactly one tool process and awaits it.
//! Sub-clients are cheap `Clone` values sharing the client's executor.

mod connection;
mod logs;
mod nodes;
mod serving;
mod training;

pub use logs::LogsRequest;
pub use nodes::NodeClient;
pub use serving::ServingClient;
pub use training::TrainingClient;

use crate::config::ClientConfig;
use crate::error::Result;
use arena_exec::{Executor, ProcessExecutor};
use connection::Connection;
use std::sync::Arc;
use tracing::debug;

/// Entry point for talking to the `arena` tool.
///
/// ```rust,no_run
/// use arena_sdk::{ArenaClient, ClientConfig, TrainingJobType};
///
/// # async fn example() -> arena_sdk::Result<()> {
/// let client = ArenaClient::new(ClientConfig::default().with_namespace("team-a"))?;
/// for job in client.training().list(&TrainingJobType::All, false).await? {
///     println!("{} {}", job.name, job.status);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ArenaClient<E = ProcessExecutor> {
    connection: Connection<E>,
}

impl<E> Clone for ArenaClient<E> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
        }
    }
}

impl ArenaClient<ProcessExecutor> {
    /// Client running the real tool.
    ///
    /// # Errors
    ///
    /// Returns `ValidateArgs` if `config` is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_executor(config, ProcessExecutor::new())
    }

    /// Client configured from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ValidateArgs` if the environment holds invalid settings.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<E: Executor> ArenaClient<E> {
    /// Client running commands through `executor`.
    ///
    /// # Errors
    ///
    /// Returns `ValidateArgs` if `config` is invalid.
    pub fn with_executor(config: ClientConfig, executor: E) -> Result<Self> {
        config.validate()?;
        debug!(
            binary = %config.binary,
            namespace = %config.namespace,
            timeout_secs = ?config.timeout_secs,
            "arena client configured"
        );
        Ok(Self {
            connection: Connection::new(config, Arc::new(executor)),
        })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.connection.config()
    }

    /// A copy of this client scoped to `namespace`.
    #[must_use]
    pub fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        Self {
            connection: self.connection.with_namespace(namespace),
        }
    }

    /// Training job operations.
    #[must_use]
    pub fn training(&self) -> TrainingClient<E> {
        TrainingClient::new(self.connection.clone())
    }

    /// Serving job operations.
    #[must_use]
    pub fn serving(&self) -> ServingClient<E> {
        ServingClient::new(self.connection.clone())
    }

    /// Node queries.
    #[must_use]
    pub fn nodes(&self) -> NodeClient<E> {
        NodeClient::new(self.connection.clone())
    }
}
