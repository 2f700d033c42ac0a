use super::connection::{require_name, trailing, Connection};
use super::logs::LogsRequest;
use crate::classify::{classify_failure, classify_submit, is_serving_not_found};
use crate::decode::{decode_serving_job, decode_serving_jobs};
use crate::entity::ServingJobInfo;
use crate::error::{ArenaError, ErrorKind, Result};
use crate::job::ServingJob;
use crate::types::ServingJobType;
use arena_exec::{ArenaCommand, Executor, OutputSink};
use tracing::{debug, info};

/// Serving job operations, scoped to one namespace.
pub struct ServingClient<E> {
    connection: Connection<E>,
}

impl<E> Clone for ServingClient<E> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
        }
    }
}

impl<E: Executor> ServingClient<E> {
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

    /// Submit a job (`arena serve <type> ...`).
    ///
    /// # Errors
    ///
    /// Returns `ServingJobExists` if the name is taken, `Timeout` if the tool
    /// was killed, or `SubmitServingJob` for any other failure.
    pub async fn submit(&self, job: &ServingJob) -> Result<()> {
        let kind = ErrorKind::SubmitServingJob;
        if !job.job_type().is_concrete() {
            return Err(ArenaError::validate_args(format!(
                "unsupported serving job type '{}'",
                job.job_type()
            )));
        }
        let command = self
            .connection
            .command(&["serve", job.job_type().subcommand()])
            .args(job.args().iter().cloned())
            .args(trailing(job.command()));

        let result = self.connection.run(kind, command).await?;
        if !result.success() {
            return Err(classify_submit(
                job.name(),
                ErrorKind::ServingJobExists,
                kind,
                &result,
            ));
        }
        info!(
            job = job.name(),
            version = job.version(),
            job_type = %job.job_type(),
            "serving job submitted"
        );
        Ok(())
    }

    /// List jobs (`arena serve list -o json`).
    ///
    /// # Errors
    ///
    /// Returns `ListServingJobs` on failure or `MalformedResponse` if the
    /// output cannot be decoded.
    pub async fn list(
        &self,
        job_type: &ServingJobType,
        all_namespaces: bool,
    ) -> Result<Vec<ServingJobInfo>> {
        let mut command = with_type(self.connection.command(&["serve", "list"]), job_type);
        if all_namespaces {
            command = command.arg("-A");
        }
        let stdout = self
            .connection
            .run_ok(ErrorKind::ListServingJobs, command.args(["-o", "json"]))
            .await?;
        let jobs = decode_serving_jobs(&stdout)?;
        debug!(count = jobs.len(), "listed serving jobs");
        Ok(jobs)
    }

    /// Fetch one job (`arena serve get <name> -o json`); `None` if it does
    /// not exist. An empty `version` matches any version.
    ///
    /// # Errors
    ///
    /// Returns `GetServingJob` on failure or `MalformedResponse` if the
    /// output cannot be decoded.
    pub async fn get(
        &self,
        name: &str,
        job_type: &ServingJobType,
        version: &str,
    ) -> Result<Option<ServingJobInfo>> {
        let kind = ErrorKind::GetServingJob;
        require_name(name)?;
        let command = self.connection.command(&["serve", "get"]).arg(name);
        let command = with_version(with_type(command, job_type), version);

        let result = self.connection.run(kind, command.args(["-o", "json"])).await?;
        if !result.success() {
            if is_serving_not_found(&result, name) {
                debug!(job = name, "serving job not found");
                return Ok(None);
            }
            return Err(classify_failure(kind, &result));
        }
        decode_serving_job(&result.stdout).map(Some)
    }

    /// Delete a job (`arena serve delete <name>`).
    ///
    /// # Errors
    ///
    /// Returns `DeleteServingJob` on failure.
    pub async fn delete(&self, name: &str, job_type: &ServingJobType, version: &str) -> Result<()> {
        require_name(name)?;
        let command = self.connection.command(&["serve", "delete"]).arg(name);
        let command = with_version(with_type(command, job_type), version);
        self.connection
            .run_ok(ErrorKind::DeleteServingJob, command)
            .await?;
        info!(job = name, version, "serving job deleted");
        Ok(())
    }

    /// Split traffic of `name` between versions
    /// (`arena serve traffic-router-split`).
    ///
    /// `weights` pairs each version with its relative weight.
    ///
    /// # Errors
    ///
    /// Returns `ValidateArgs` if `weights` is empty or `TrafficRouterSplit`
    /// on failure.
    pub async fn traffic_router_split<I, V>(&self, name: &str, weights: I) -> Result<()>
    where
        I: IntoIterator<Item = (V, u32)>,
        V: AsRef<str>,
    {
        require_name(name)?;
        let weights: Vec<String> = weights
            .into_iter()
            .map(|(version, weight)| format!("-v={}:{weight}", version.as_ref()))
            .collect();
        if weights.is_empty() {
            return Err(ArenaError::validate_args(
                "traffic split needs at least one version weight",
            ));
        }
        let command = self
            .connection
            .command(&["serve", "traffic-router-split"])
            .arg(format!("--name={name}"))
            .args(weights);
        self.connection
            .run_ok(ErrorKind::TrafficRouterSplit, command)
            .await?;
        info!(job = name, "serving traffic split updated");
        Ok(())
    }

    /// Stream a job's logs into `sink` (`arena serve logs <name> ...`).
    ///
    /// # Errors
    ///
    /// Returns `LogsServingJob` if the tool fails, or `Timeout` if the
    /// configured limit was hit.
    pub async fn logs(
        &self,
        name: &str,
        job_type: &ServingJobType,
        version: &str,
        request: &LogsRequest,
        sink: OutputSink<'_>,
    ) -> Result<()> {
        require_name(name)?;
        let mut command = self.connection.command(&["serve", "logs"]).arg(name);
        if job_type.is_concrete() {
            command = command.arg(format!("-T={}", job_type.shorthand()));
        }
        let command = with_version(command, version).args(request.to_args()?);
        self.connection
            .stream(ErrorKind::LogsServingJob, command, sink)
            .await
    }
}

fn with_type(command: ArenaCommand, job_type: &ServingJobType) -> ArenaCommand {
    if job_type.is_concrete() {
        command.arg(format!("--type={}", job_type.shorthand()))
    } else {
        command
    }
}

fn with_version(command: ArenaCommand, version: &str) -> ArenaCommand {
    if version.is_empty() {
        command
    } else {
        command.arg(format!("--version={version}"))
    }
}
