use crate::field::Field;
use crate::job::JobOptions;
use crate::types::TrainingJobType;

/// Builder for `TensorFlow` training jobs (`arena submit tfjob`).
///
/// Adds parameter-server, chief and evaluator roles on top of the shared
/// worker options.
#[derive(Debug, Clone, Default)]
pub struct TensorflowJobBuilder {
    options: JobOptions,
}

training_builder!(TensorflowJobBuilder, TrainingJobType::TfJob);

impl TensorflowJobBuilder {
    /// Worker node selectors (`--worker-selector=K=V`).
    #[must_use]
    pub fn with_worker_selectors<I, K, V>(self, selectors: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.push(Field::map("--worker-selector", selectors, '='))
    }

    /// Worker port (`--worker-port`).
    #[must_use]
    pub fn with_worker_port(self, port: u16) -> Self {
        self.push(Field::string("--worker-port", port.to_string()))
    }

    /// Worker memory request (`--worker-memory`).
    #[must_use]
    pub fn with_worker_memory(self, memory: impl Into<String>) -> Self {
        self.push(Field::string("--worker-memory", memory))
    }

    /// Worker CPU request (`--worker-cpu`).
    #[must_use]
    pub fn with_worker_cpu(self, cpu: impl Into<String>) -> Self {
        self.push(Field::string("--worker-cpu", cpu))
    }

    /// Worker image (`--worker-image`).
    #[must_use]
    pub fn with_worker_image(self, image: impl Into<String>) -> Self {
        self.push(Field::string("--worker-image", image))
    }

    /// Parameter server count (`--ps`).
    #[must_use]
    pub fn with_ps_count(self, count: u32) -> Self {
        self.push(Field::string("--ps", count.to_string()))
    }

    /// Parameter server node selectors (`--ps-selector=K=V`).
    #[must_use]
    pub fn with_ps_selectors<I, K, V>(self, selectors: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.push(Field::map("--ps-selector", selectors, '='))
    }

    /// Parameter server port (`--ps-port`).
    #[must_use]
    pub fn with_ps_port(self, port: u16) -> Self {
        self.push(Field::string("--ps-port", port.to_string()))
    }

    /// Parameter server memory request (`--ps-memory`).
    #[must_use]
    pub fn with_ps_memory(self, memory: impl Into<String>) -> Self {
        self.push(Field::string("--ps-memory", memory))
    }

    /// Parameter server CPU request (`--ps-cpu`).
    #[must_use]
    pub fn with_ps_cpu(self, cpu: impl Into<String>) -> Self {
        self.push(Field::string("--ps-cpu", cpu))
    }

    /// Parameter server image (`--ps-image`).
    #[must_use]
    pub fn with_ps_image(self, image: impl Into<String>) -> Self {
        self.push(Field::string("--ps-image", image))
    }

    /// Run an evaluator (`--evaluator`).
    #[must_use]
    pub fn enable_evaluator(self) -> Self {
        self.push(Field::bool("--evaluator"))
    }

    /// Evaluator node selectors (`--evaluator-selector=K=V`).
    #[must_use]
    pub fn with_evaluator_selectors<I, K, V>(self, selectors: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.push(Field::map("--evaluator-selector", selectors, '='))
    }

    /// Evaluator memory request (`--evaluator-memory`).
    #[must_use]
    pub fn with_evaluator_memory(self, memory: impl Into<String>) -> Self {
        self.push(Field::string("--evaluator-memory", memory))
    }

    /// Evaluator CPU request (`--evaluator-cpu`).
    #[must_use]
    pub fn with_evaluator_cpu(self, cpu: impl Into<String>) -> Self {
        self.push(Field::string("--evaluator-cpu", cpu))
    }

    /// Run a chief (`--chief`).
    #[must_use]
    pub fn enable_chief(self) -> Self {
        self.push(Field::bool("--chief"))
    }

    /// Chief node selectors (`--chief-selector=K=V`).
    #[must_use]
    pub fn with_chief_selectors<I, K, V>(self, selectors: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.push(Field::map("--chief-selector", selectors, '='))
    }

    /// Chief port (`--chief-port`).
    #[must_use]
    pub fn with_chief_port(self, port: u16) -> Self {
        self.push(Field::string("--chief-port", port.to_string()))
    }

    /// Chief memory request (`--chief-memory`).
    #[must_use]
    pub fn with_chief_memory(self, memory: impl Into<String>) -> Self {
        self.push(Field::string("--chief-memory", memory))
    }

    /// Chief CPU request (`--chief-cpu`).
    #[must_use]
    pub fn with_chief_cpu(self, cpu: impl Into<String>) -> Self {
        self.push(Field::string("--chief-cpu", cpu))
    }

    /// CPU request for every role (`--cpu`).
    #[must_use]
    pub fn with_cpu(self, cpu: impl Into<String>) -> Self {
        self.push(Field::string("--cpu", cpu))
    }

    /// Memory request for every role (`--memory`).
    #[must_use]
    pub fn with_memory(self, memory: impl Into<String>) -> Self {
        self.push(Field::string("--memory", memory))
    }
}
