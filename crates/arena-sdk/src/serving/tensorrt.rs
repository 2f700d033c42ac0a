use crate::field::Field;
use crate::job::JobOptions;
use crate::types::ServingJobType;

/// Builder for `TensorRT` inference server jobs (`arena serve tensorrt`).
#[derive(Debug, Clone, Default)]
pub struct TensorrtServingJobBuilder {
    options: JobOptions,
}

serving_builder!(TensorrtServingJobBuilder, ServingJobType::Tensorrt);

impl TensorrtServingJobBuilder {
    /// HTTP port (`--http-port`).
    #[must_use]
    pub fn with_http_port(self, port: u16) -> Self {
        self.push(Field::string("--http-port", port.to_string()))
    }

    /// gRPC port (`--grpc-port`).
    #[must_use]
    pub fn with_grpc_port(self, port: u16) -> Self {
        self.push(Field::string("--grpc-port", port.to_string()))
    }

    /// Expose Prometheus metrics (`--allow-metrics`).
    #[must_use]
    pub fn enable_metrics(self) -> Self {
        self.push(Field::bool("--allow-metrics"))
    }

    /// Model store path (`--model-store`).
    #[must_use]
    pub fn with_model_store(self, store: impl Into<String>) -> Self {
        self.push(Field::string("--model-store", store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serving::ServingJobBuilder;

    #[test]
    fn test_trt_serving_job() {
        let job = TensorrtServingJobBuilder::new()
            .with_name("resnet")
            .with_grpc_port(8001)
            .with_http_port(8000)
            .enable_metrics()
            .with_model_store("/data/models")
            .build()
            .unwrap();

        assert_eq!(
            job.args(),
            [
                "--name=resnet",
                "--grpc-port=8001",
                "--http-port=8000",
                "--allow-metrics",
                "--model-store=/data/models",
            ]
        );
    }
}
