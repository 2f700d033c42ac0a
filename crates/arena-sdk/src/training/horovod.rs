use crate::field::Field;
use crate::job::JobOptions;
use crate::types::TrainingJobType;

/// Builder for Horovod training jobs (`arena submit horovodjob`).
#[derive(Debug, Clone, Default)]
pub struct HorovodJobBuilder {
    options: JobOptions,
}

training_builder!(HorovodJobBuilder, TrainingJobType::HorovodJob);

impl HorovodJobBuilder {
    /// SSH port used between workers (`--ssh-port`).
    #[must_use]
    pub fn with_ssh_port(self, port: u16) -> Self {
        self.push(Field::string("--ssh-port", port.to_string()))
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
