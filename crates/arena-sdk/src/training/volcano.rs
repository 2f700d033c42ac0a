use crate::error::Result;
use crate::field::Field;
use crate::job::{JobOptions, TrainingJob};
use crate::types::TrainingJobType;

/// Builder for Volcano batch jobs (`arena submit volcanojob`).
///
/// Volcano jobs are described by tasks rather than workers, so this builder
/// has its own option set.
#[derive(Debug, Clone, Default)]
pub struct VolcanoJobBuilder {
    options: JobOptions,
}

impl VolcanoJobBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, field: Field) -> Self {
        self.options.push(field);
        self
    }

    /// Job name (`--name`).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.options.set_name(name);
        self
    }

    /// Minimum pods that must be schedulable together (`--min-available`).
    #[must_use]
    pub fn with_min_available(self, count: u32) -> Self {
        self.push(Field::string("--min-available", count.to_string()))
    }

    /// Scheduling queue (`--queue`).
    #[must_use]
    pub fn with_queue(self, queue: impl Into<String>) -> Self {
        self.push(Field::string("--queue", queue))
    }

    /// Scheduler name (`--scheduler-name`).
    #[must_use]
    pub fn with_scheduler_name(self, name: impl Into<String>) -> Self {
        self.push(Field::string("--scheduler-name", name))
    }

    /// CPU request per task (`--task-cpu`).
    #[must_use]
    pub fn with_task_cpu(self, cpu: impl Into<String>) -> Self {
        self.push(Field::string("--task-cpu", cpu))
    }

    /// Task images, one per task (`--task-images`, repeated).
    #[must_use]
    pub fn with_task_images<I, S>(self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Field::list("--task-images", images))
    }

    /// Memory request per task (`--task-memory`).
    #[must_use]
    pub fn with_task_memory(self, memory: impl Into<String>) -> Self {
        self.push(Field::string("--task-memory", memory))
    }

    /// Task name prefix (`--task-name`).
    #[must_use]
    pub fn with_task_name(self, name: impl Into<String>) -> Self {
        self.push(Field::string("--task-name", name))
    }

    /// Task port (`--task-port`).
    #[must_use]
    pub fn with_task_port(self, port: u16) -> Self {
        self.push(Field::string("--task-port", port.to_string()))
    }

    /// Replicas per task (`--task-replicas`).
    #[must_use]
    pub fn with_task_replicas(self, replicas: u32) -> Self {
        self.push(Field::string("--task-replicas", replicas.to_string()))
    }

    /// Trailing command; appended as the final argument.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.options.set_command(command);
        self
    }

    /// Validate the accumulated fields and produce a descriptor.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateArgs` error naming the first invalid flag.
    pub fn build(&self) -> Result<TrainingJob> {
        self.options.build_training(TrainingJobType::VolcanoJob)
    }
}
