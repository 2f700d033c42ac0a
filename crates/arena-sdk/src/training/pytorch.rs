use crate::field::Field;
use crate::job::JobOptions;
use crate::types::TrainingJobType;

/// Builder for `PyTorch` training jobs (`arena submit pytorchjob`).
#[derive(Debug, Clone, Default)]
pub struct PyTorchJobBuilder {
    options: JobOptions,
}

training_builder!(PyTorchJobBuilder, TrainingJobType::PyTorchJob);

impl PyTorchJobBuilder {
    /// Pod cleanup policy once the job finishes, e.g. `None`, `Running` or
    /// `All` (`--clean-task-policy`).
    #[must_use]
    pub fn with_clean_task_policy(self, policy: impl Into<String>) -> Self {
        self.push(Field::string("--clean-task-policy", policy))
    }

    /// CPU request per worker (`--cpu`).
    #[must_use]
    pub fn with_cpu(self, cpu: impl Into<String>) -> Self {
        self.push(Field::string("--cpu", cpu))
    }

    /// Memory request per worker (`--memory`).
    #[must_use]
    pub fn with_memory(self, memory: impl Into<String>) -> Self {
        self.push(Field::string("--memory", memory))
    }
}
