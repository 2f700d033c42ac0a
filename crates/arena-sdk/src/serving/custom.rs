use crate::field::Field;
use crate::job::JobOptions;
use crate::types::ServingJobType;

/// Builder for custom serving jobs (`arena serve custom`).
#[derive(Debug, Clone, Default)]
pub struct CustomServingJobBuilder {
    options: JobOptions,
}

serving_builder!(CustomServingJobBuilder, ServingJobType::Custom);

impl CustomServingJobBuilder {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serving::ServingJobBuilder;

    #[test]
    fn test_custom_serving_command_is_trailing() {
        let job = CustomServingJobBuilder::new()
            .with_name("fast-style-transfer")
            .with_image("registry.example.com/fast-style-transfer:serving")
            .with_restful_port(5000)
            .with_command("python app.py")
            .build()
            .unwrap();

        assert_eq!(job.command(), "python app.py");
        assert_eq!(
            job.args().last().map(String::as_str),
            Some("--restful-port=5000")
        );
    }

    #[test]
    fn test_same_sequence_same_tokens() {
        let make = || {
            CustomServingJobBuilder::new()
                .with_name("a")
                .with_envs([("X", "1")])
                .with_tolerations(["gpu"])
        };
        assert_eq!(make().build().unwrap(), make().build().unwrap());
    }
}
