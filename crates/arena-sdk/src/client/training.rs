use super::connection::{require_name, trailing, Connection};
use super::logs::LogsRequest;
use crate::classify::{classify_failure, classify_submit, is_training_not_found};
use crate::decode::{decode_training_job, decode_training_jobs};
use crate::entity::TrainingJobInfo;
use crate::error::{ArenaError, ErrorKind, Result};
use crate::job::TrainingJob;
use crate::types::TrainingJobType;
use arena_exec::{Executor, OutputSink};
use std::time::Duration;
use tracing::{debug, info};

/// Training job operations, scoped to one namespace.
pub struct TrainingClient<E> {
    connection: Connection<E>,
}

impl<E> Clone for TrainingClient<E> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
        }
    }
}

impl<E: Executor> TrainingClient<E> {
    pub(crate) fn new(connection: Connection<E>) -> Self {
        Self { connection }
    }

    /// The namespace operations run in.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.connection.namespace()
    }

    /// A copy of this client scoped to `namespace`.
    #[must_use]
    pub fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        Self::new(self.connection.with_namespace(namespace))
    }

    /// Submit a job (`arena submit <type> ...`).
    ///
    /// # Errors
    ///
    /// Returns `TrainingJobExists` if the name is taken, `Timeout` if the tool
    /// was killed, or `SubmitTrainingJob` for any other failure.
    pub async fn submit(&self, job: &TrainingJob) -> Result<()> {
        let kind = ErrorKind::SubmitTrainingJob;
        require_concrete(job.job_type())?;
        let command = self
            .connection
            .command(&["submit", job.job_type().as_str()])
            .args(job.args().iter().cloned())
            .args(trailing(job.command()));

        let result = self.connection.run(kind, command).await?;
        if !result.success() {
            return Err(classify_submit(
                job.name(),
                ErrorKind::TrainingJobExists,
                kind,
                &result,
            ));
        }
        info!(job = job.name(), job_type = %job.job_type(), "training job submitted");
        Ok(())
    }

    /// List jobs (`arena list -o json`).
    ///
    /// [`TrainingJobType::All`] lists every kind; `all_namespaces` adds `-A`.
    ///
    /// # Errors
    ///
    /// Returns `ListTrainingJobs` on failure or `MalformedResponse` if the
    /// output cannot be decoded.
    pub async fn list(
        &self,
        job_type: &TrainingJobType,
        all_namespaces: bool,
    ) -> Result<Vec<TrainingJobInfo>> {
        let mut command = self.connection.command(&["list"]);
        if job_type.is_concrete() {
            command = command.arg(format!("--type={}", job_type.as_str()));
        }
        if all_namespaces {
            command = command.arg("-A");
        }
        let stdout = self
            .connection
            .run_ok(ErrorKind::ListTrainingJobs, command.args(["-o", "json"]))
            .await?;
        let jobs = decode_training_jobs(&stdout)?;
        debug!(count = jobs.len(), "listed training jobs");
        Ok(jobs)
    }

    /// Fetch one job (`arena get <name> -o json`); `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `GetTrainingJob` on failure or `MalformedResponse` if the
    /// output cannot be decoded.
    pub async fn get(&self, name: &str, job_type: &TrainingJobType) -> Result<Option<TrainingJobInfo>> {
        let kind = ErrorKind::GetTrainingJob;
        require_name(name)?;
        let mut command = self.connection.command(&["get"]).arg(name);
        if job_type.is_concrete() {
            command = command.arg(format!("--type={}", job_type.as_str()));
        }

        let result = self.connection.run(kind, command.args(["-o", "json"])).await?;
        if !result.success() {
            if is_training_not_found(&result, name, self.namespace()) {
                debug!(job = name, namespace = self.namespace(), "training job not found");
                return Ok(None);
            }
            return Err(classify_failure(kind, &result));
        }
        decode_training_job(&result.stdout).map(Some)
    }

    /// Delete a job (`arena delete <name>`).
    ///
    /// # Errors
    ///
    /// Returns `DeleteTrainingJob` on failure.
    pub async fn delete(&self, name: &str, job_type: &TrainingJobType) -> Result<()> {
        require_name(name)?;
        let mut command = self.connection.command(&["delete"]).arg(name);
        if job_type.is_concrete() {
            command = command.arg(format!("--type={}", job_type.as_str()));
        }
        self.connection
            .run_ok(ErrorKind::DeleteTrainingJob, command)
            .await?;
        info!(job = name, "training job deleted");
        Ok(())
    }

    /// Delete finished jobs older than `since` (`arena prune --since=...`).
    ///
    /// # Errors
    ///
    /// Returns `ValidateArgs` for a zero duration or `PruneTrainingJobs` on
    /// failure.
    pub async fn prune(&self, since: Duration, all_namespaces: bool) -> Result<()> {
        if since.is_zero() {
            return Err(ArenaError::validate_args("prune window must be positive"));
        }
        let mut command = self
            .connection
            .command(&["prune"])
            .arg(format!("--since={}s", since.as_secs()));
        if all_namespaces {
            command = command.arg("-A");
        }
        self.connection
            .run_ok(ErrorKind::PruneTrainingJobs, command)
            .await?;
        Ok(())
    }

    /// Remove workers from a running elastic job (`arena scalein etjob ...`).
    ///
    /// # Errors
    ///
    /// Returns `ScaleInTrainingJob` on failure.
    pub async fn scale_in(&self, job: &TrainingJob) -> Result<()> {
        self.scale("scalein", ErrorKind::ScaleInTrainingJob, job).await
    }

    /// Add workers to a running elastic job (`arena scaleout etjob ...`).
    ///
    /// # Errors
    ///
    /// Returns `ScaleOutTrainingJob` on failure.
    pub async fn scale_out(&self, job: &TrainingJob) -> Result<()> {
        self.scale("scaleout", ErrorKind::ScaleOutTrainingJob, job).await
    }

    async fn scale(&self, verb: &str, kind: ErrorKind, job: &TrainingJob) -> Result<()> {
        require_concrete(job.job_type())?;
        let command = self
            .connection
            .command(&[verb, job.job_type().as_str()])
            .args(job.args().iter().cloned());
        self.connection.run_ok(kind, command).await?;
        info!(job = job.name(), verb, "training job rescaled");
        Ok(())
    }

    /// Stream a job's logs into `sink` (`arena logs <name> ...`).
    ///
    /// # Errors
    ///
    /// Returns `LogsTrainingJob` if the tool fails, or `Timeout` if the
    /// configured limit was hit.
    pub async fn logs(
        &self,
        name: &str,
        job_type: &TrainingJobType,
        request: &LogsRequest,
        sink: OutputSink<'_>,
    ) -> Result<()> {
        require_name(name)?;
        let mut command = self.connection.command(&["logs"]).arg(name);
        if job_type.is_concrete() {
            command = command.arg(format!("-T={}", job_type.as_str()));
        }
        let command = command.args(request.to_args()?);
        self.connection
            .stream(ErrorKind::LogsTrainingJob, command, sink)
            .await
    }
}

fn require_concrete(job_type: &TrainingJobType) -> Result<()> {
    if job_type.is_concrete() {
        Ok(())
    } else {
        Err(ArenaError::validate_args(format!(
            "unsupported training job type '{job_type}'"
        )))
    }
}
