//! Serving job command implementation.

use arena_sdk::{ArenaClient, Executor, ServingJobType};
use tokio::io::AsyncWrite;

use super::emit;
use crate::cli::ServingCommands;
use crate::error::CliError;
use crate::output::{Message, OutputFormat};

/// Serving command executor.
pub struct ServingCommand<'a, E> {
    client: &'a ArenaClient<E>,
}

impl<'a, E: Executor> ServingCommand<'a, E> {
    /// Create a new serving command.
    #[must_use]
    pub const fn new(client: &'a ArenaClient<E>) -> Self {
        Self { client }
    }

    /// Execute a serving subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the job is missing, the tool fails, or writing
    /// fails.
    pub async fn execute<W>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &ServingCommands,
    ) -> Result<(), CliError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let serving = self.client.serving();
        match command {
            ServingCommands::List {
                job_type,
                all_namespaces,
            } => {
                let jobs = serving.list(&kind(job_type.as_ref()), *all_namespaces).await?;
                emit(out, format, jobs.as_slice()).await?;
            }
            ServingCommands::Get {
                name,
                job_type,
                version,
            } => {
                let job = serving
                    .get(name, &kind(job_type.as_ref()), version)
                    .await?
                    .ok_or_else(|| CliError::NotFound {
                        kind: "serving",
                        name: name.clone(),
                    })?;
                emit(out, format, &job).await?;
            }
            ServingCommands::Delete {
                name,
                job_type,
                version,
            } => {
                serving.delete(name, &kind(job_type.as_ref()), version).await?;
                emit(out, format, &Message::new(format!("serving job {name} deleted"))).await?;
            }
            ServingCommands::TrafficSplit { name, weights } => {
                serving
                    .traffic_router_split(name, weights.iter().map(|(v, w)| (v.as_str(), *w)))
                    .await?;
                emit(out, format, &Message::new(format!("traffic of {name} updated"))).await?;
            }
            ServingCommands::Logs {
                name,
                job_type,
                version,
                logs,
            } => {
                serving
                    .logs(name, &kind(job_type.as_ref()), version, &logs.to_request(), out)
                    .await?;
            }
        }
        Ok(())
    }
}

fn kind(job_type: Option<&ServingJobType>) -> ServingJobType {
    job_type.cloned().unwrap_or(ServingJobType::All)
}
