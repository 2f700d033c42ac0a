use crate::field::Field;
use crate::job::JobOptions;
use crate::types::TrainingJobType;

/// Builder for elastic training jobs (`arena submit etjob`).
///
/// Running elastic jobs are resized with
/// [`ScaleOutEtJobBuilder`](super::ScaleOutEtJobBuilder) and
/// [`ScaleInEtJobBuilder`](super::ScaleInEtJobBuilder).
#[derive(Debug, Clone, Default)]
pub struct EtJobBuilder {
    options: JobOptions,
}

training_builder!(EtJobBuilder, TrainingJobType::EtJob);

impl EtJobBuilder {
    /// Lower bound on the worker count (`--min-workers`).
    #[must_use]
    pub fn with_min_workers(self, workers: u32) -> Self {
        self.push(Field::string("--min-workers", workers.to_string()))
    }

    /// Upper bound on the worker count (`--max-workers`).
    #[must_use]
    pub fn with_max_workers(self, workers: u32) -> Self {
        self.push(Field::string("--max-workers", workers.to_string()))
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
