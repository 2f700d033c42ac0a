use crate::field::Field;
use crate::job::JobOptions;
use crate::types::ServingJobType;

/// Builder for `TensorFlow` Serving jobs (`arena serve tensorflow`).
#[derive(Debug, Clone, Default)]
pub struct TensorflowServingJobBuilder {
    options: JobOptions,
}

serving_builder!(TensorflowServingJobBuilder, ServingJobType::Tensorflow);

impl TensorflowServingJobBuilder {
    /// gRPC port (`--port`).
    #[must_use]
    pub fn with_port(self, port: u16) -> Self {
        self.push(Field::string("--port", port.to_string()))
    }

    /// REST port (`--restful-port`).
    #[must_use]
    pub fn with_restful_port(self, port: u16) -> Self {
        self.push(Field::string("--restful-port", port.to_string()))
    }

    /// Which model versions to serve, e.g. `latest` (`--version-policy`).
    #[must_use]
    pub fn with_version_policy(self, policy: impl Into<String>) -> Self {
        self.push(Field::string("--version-policy", policy))
    }

    /// Model name (`--model-name`).
    #[must_use]
    pub fn with_model_name(self, name: impl Into<String>) -> Self {
        self.push(Field::string("--model-name", name))
    }

    /// Model path inside the container (`--model-path`).
    #[must_use]
    pub fn with_model_path(self, path: impl Into<String>) -> Self {
        self.push(Field::string("--model-path", path))
    }

    /// Model config file (`--model-config-file`).
    #[must_use]
    pub fn with_model_config_file(self, file: impl Into<String>) -> Self {
        self.push(Field::string("--model-config-file", file))
    }
}
