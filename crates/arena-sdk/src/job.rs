//! Immutable job descriptors produced by builders.

use crate::error::Result;
use crate::field::{self, Field};
use crate::types::{ServingJobType, TrainingJobType};

/// A validated training job, ready to submit or scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingJob {
    name: String,
    job_type: TrainingJobType,
    args: Vec<String>,
    command: String,
}

impl TrainingJob {
    /// Job name (empty if the builder never set one).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Job kind.
    #[must_use]
    pub fn job_type(&self) -> &TrainingJobType {
        &self.job_type
    }

    /// Rendered option tokens, in builder order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Free-form trailing command (may be empty).
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// A validated serving job, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServingJob {
    name: String,
    job_type: ServingJobType,
    version: String,
    args: Vec<String>,
    command: String,
}

impl ServingJob {
    /// Job name (empty if the builder never set one).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Job kind.
    #[must_use]
    pub fn job_type(&self) -> &ServingJobType {
        &self.job_type
    }

    /// Model version (empty if unset).
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rendered option tokens, in builder order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Free-form trailing command (may be empty).
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// Accumulator shared by every builder.
///
/// Holds the ordered fields plus the values a descriptor reports on its own
/// (name, version, trailing command).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOptions {
    name: String,
    version: String,
    fields: Vec<Field>,
    command: String,
}

impl JobOptions {
    /// Append a field.
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Record the job name and append `--name`.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.fields.push(Field::string("--name", name.clone()));
        self.name = name;
    }

    /// Record the version and append `--version`.
    pub fn set_version(&mut self, version: impl Into<String>) {
        let version = version.into();
        self.fields.push(Field::string("--version", version.clone()));
        self.version = version;
    }

    /// Set the trailing command, replacing any previous one.
    pub fn set_command(&mut self, command: impl Into<String>) {
        self.command = command.into();
    }

    /// Accumulated fields, in order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Validate every field and build a training descriptor.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateArgs` error for the first invalid field.
    pub fn build_training(&self, job_type: TrainingJobType) -> Result<TrainingJob> {
        Ok(TrainingJob {
            name: self.name.clone(),
            job_type,
            args: field::render_all(&self.fields)?,
            command: self.command.clone(),
        })
    }

    /// Validate every field and build a serving descriptor.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateArgs` error for the first invalid field.
    pub fn build_serving(&self, job_type: ServingJobType) -> Result<ServingJob> {
        Ok(ServingJob {
            name: self.name.clone(),
            job_type,
            version: self.version.clone(),
            args: field::render_all(&self.fields)?,
            command: self.command.clone(),
        })
    }
}
