use crate::field::Field;
use crate::job::JobOptions;
use crate::types::ServingJobType;

/// Builder for `KFServing` jobs (`arena serve kfserving`).
#[derive(Debug, Clone, Default)]
pub struct KfServingJobBuilder {
    options: JobOptions,
}

serving_builder!(KfServingJobBuilder, ServingJobType::KfServing);

impl KfServingJobBuilder {
    /// Serving port (`--port`).
    #[must_use]
    pub fn with_port(self, port: u16) -> Self {
        self.push(Field::string("--port", port.to_string()))
    }

    /// Share of traffic routed to the canary, 0 to 100 (`--canary-percent`).
    #[must_use]
    pub fn with_canary_percent(self, percent: u8) -> Self {
        self.push(Field::string("--canary-percent", percent.to_string()))
    }

    /// Model framework, e.g. `tensorflow` or `pytorch` (`--model-type`).
    #[must_use]
    pub fn with_model_type(self, model_type: impl Into<String>) -> Self {
        self.push(Field::string("--model-type", model_type))
    }
}
