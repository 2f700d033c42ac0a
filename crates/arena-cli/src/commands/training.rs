//! Training job command implementation.

use std::time::Duration;

use arena_sdk::{ArenaClient, Executor, TrainingJobType};
use tokio::io::AsyncWrite;

use super::emit;
use crate::cli::TrainingCommands;
use crate::error::CliError;
use crate::output::{Message, OutputFormat};

/// Training command executor.
pub struct TrainingCommand<'a, E> {
    client: &'a ArenaClient<E>,
}

impl<'a, E: Executor> TrainingCommand<'a, E> {
    /// Create a new training command.
    #[must_use]
    pub const fn new(client: &'a ArenaClient<E>) -> Self {
        Self { client }
    }

    /// Execute a training subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the job is missing, the tool fails, or writing
    /// fails.
    pub async fn execute<W>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &TrainingCommands,
    ) -> Result<(), CliError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let training = self.client.training();
        match command {
            TrainingCommands::List {
                job_type,
                all_namespaces,
            } => {
                let jobs = training.list(&kind(job_type.as_ref()), *all_namespaces).await?;
                emit(out, format, jobs.as_slice()).await?;
            }
            TrainingCommands::Get { name, job_type } => {
                let job = training
                    .get(name, &kind(job_type.as_ref()))
                    .await?
                    .ok_or_else(|| CliError::NotFound {
                        kind: "training",
                        name: name.clone(),
                    })?;
                emit(out, format, &job).await?;
            }
            TrainingCommands::Delete { name, job_type } => {
                training.delete(name, &kind(job_type.as_ref())).await?;
                emit(out, format, &Message::new(format!("training job {name} deleted"))).await?;
            }
            TrainingCommands::Prune {
                since,
                all_namespaces,
            } => {
                training
                    .prune(Duration::from_secs(*since), *all_namespaces)
                    .await?;
                emit(out, format, &Message::new("finished training jobs pruned")).await?;
            }
            TrainingCommands::Logs {
                name,
                job_type,
                logs,
            } => {
                training
                    .logs(name, &kind(job_type.as_ref()), &logs.to_request(), out)
                    .await?;
            }
        }
        Ok(())
    }
}

fn kind(job_type: Option<&TrainingJobType>) -> TrainingJobType {
    job_type.cloned().unwrap_or(TrainingJobType::All)
}
