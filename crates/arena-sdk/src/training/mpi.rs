use crate::field::Field;
use crate::job::JobOptions;
use crate::types::TrainingJobType;

/// Builder for MPI training jobs (`arena submit mpijob`).
#[derive(Debug, Clone, Default)]
pub struct MpiJobBuilder {
    options: JobOptions,
}

training_builder!(MpiJobBuilder, TrainingJobType::MpiJob);

impl MpiJobBuilder {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::TrainingJobBuilder;

    #[test]
    fn test_mpi_job_with_resources() {
        let job = MpiJobBuilder::new()
            .with_name("mpi-dist")
            .with_workers(2)
            .with_gpus(1)
            .with_cpu("4")
            .with_memory("8Gi")
            .with_image("registry.example.com/horovod:0.13")
            .with_command("mpirun python /benchmarks/tf_cnn_benchmarks.py")
            .build()
            .unwrap();

        assert_eq!(job.job_type().as_str(), "mpijob");
        assert_eq!(
            job.args(),
            [
                "--name=mpi-dist",
                "--workers=2",
                "--gpus=1",
                "--cpu=4",
                "--memory=8Gi",
                "--image=registry.example.com/horovod:0.13",
            ]
        );
    }
}
