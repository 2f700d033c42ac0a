use crate::error::Result;
use crate::field::Field;
use crate::job::{JobOptions, TrainingJob};
use crate::types::TrainingJobType;

/// Builder for Spark jobs (`arena submit sparkjob`).
#[derive(Debug, Clone, Default)]
pub struct SparkJobBuilder {
    options: JobOptions,
}

impl SparkJobBuilder {
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

    /// Driver and executor image (`--image`).
    #[must_use]
    pub fn with_image(self, image: impl Into<String>) -> Self {
        self.push(Field::string("--image", image))
    }

    /// Executor replicas (`--replicas`).
    #[must_use]
    pub fn with_replicas(self, replicas: u32) -> Self {
        self.push(Field::string("--replicas", replicas.to_string()))
    }

    /// Application main class (`--main-class`).
    #[must_use]
    pub fn with_main_class(self, main_class: impl Into<String>) -> Self {
        self.push(Field::string("--main-class", main_class))
    }

    /// Application jar (`--jar`).
    #[must_use]
    pub fn with_jar(self, jar: impl Into<String>) -> Self {
        self.push(Field::string("--jar", jar))
    }

    /// Driver CPU request (`--driver-cpu-request`).
    #[must_use]
    pub fn with_driver_cpu(self, cpu: impl Into<String>) -> Self {
        self.push(Field::string("--driver-cpu-request", cpu))
    }

    /// Driver memory request (`--driver-memory-request`).
    #[must_use]
    pub fn with_driver_memory(self, memory: impl Into<String>) -> Self {
        self.push(Field::string("--driver-memory-request", memory))
    }

    /// Executor CPU request (`--executor-cpu-request`).
    #[must_use]
    pub fn with_executor_cpu(self, cpu: impl Into<String>) -> Self {
        self.push(Field::string("--executor-cpu-request", cpu))
    }

    /// Executor memory request (`--executor-memory-request`).
    #[must_use]
    pub fn with_executor_memory(self, memory: impl Into<String>) -> Self {
        self.push(Field::string("--executor-memory-request", memory))
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
        self.options.build_training(TrainingJobType::SparkJob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spark_pi() {
        let job = SparkJobBuilder::new()
            .with_name("spark-pi")
            .with_image("registry.example.com/spark:v2.4.0")
            .with_replicas(1)
            .with_main_class("org.apache.spark.examples.SparkPi")
            .with_jar("local:///opt/spark/examples/jars/spark-examples_2.11-2.4.0.jar")
            .with_driver_memory("500m")
            .with_executor_cpu("1")
            .build()
            .unwrap();

        assert_eq!(job.name(), "spark-pi");
        assert_eq!(
            job.args(),
            [
                "--name=spark-pi",
                "--image=registry.example.com/spark:v2.4.0",
                "--replicas=1",
                "--main-class=org.apache.spark.examples.SparkPi",
                "--jar=local:///opt/spark/examples/jars/spark-examples_2.11-2.4.0.jar",
                "--driver-memory-request=500m",
                "--executor-cpu-request=1",
            ]
        );
    }
}
