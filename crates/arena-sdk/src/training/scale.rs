//! Resizing running elastic training jobs.
//!
//! Both directions take the same options; the facade decides whether the
//! descriptor goes to `arena scaleout` or `arena scalein`.

use crate::error::Result;
use crate::field::Field;
use crate::job::{JobOptions, TrainingJob};
use crate::types::TrainingJobType;
use std::time::Duration;

macro_rules! scale_builder {
    ($(#[$meta:meta])* $builder:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $builder {
            options: JobOptions,
        }

        impl $builder {
            /// Create an empty builder.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            fn push(mut self, field: Field) -> Self {
                self.options.push(field);
                self
            }

            /// Name of the elastic job to resize (`--name`).
            #[must_use]
            pub fn with_name(mut self, name: impl Into<String>) -> Self {
                self.options.set_name(name);
                self
            }

            /// Timeout of the scaler callback script (`--timeout`).
            #[must_use]
            pub fn with_timeout(self, timeout: Duration) -> Self {
                self.push(Field::string("--timeout", format!("{}s", timeout.as_secs())))
            }

            /// Retries of the scaler callback script (`--retry`).
            #[must_use]
            pub fn with_retry(self, retry: u32) -> Self {
                self.push(Field::string("--retry", retry.to_string()))
            }

            /// Environment of the scaler script (`--env=K=V`).
            #[must_use]
            pub fn with_envs<I, K, V>(self, envs: I) -> Self
            where
                I: IntoIterator<Item = (K, V)>,
                K: Into<String>,
                V: Into<String>,
            {
                self.push(Field::map("--env", envs, '='))
            }

            /// Scaler script to run (`--script`).
            #[must_use]
            pub fn with_script(self, script: impl Into<String>) -> Self {
                self.push(Field::string("--script", script))
            }

            /// Number of workers to add or remove (`--count`).
            #[must_use]
            pub fn with_count(self, count: u32) -> Self {
                self.push(Field::string("--count", count.to_string()))
            }

            /// Validate the accumulated fields and produce a descriptor.
            ///
            /// # Errors
            ///
            /// Returns a `ValidateArgs` error naming the first invalid flag.
            pub fn build(&self) -> Result<TrainingJob> {
                self.options.build_training(TrainingJobType::EtJob)
            }
        }
    };
}

scale_builder!(
    /// Adds workers to a running elastic job (`arena scaleout etjob`).
    ScaleOutEtJobBuilder
);

scale_builder!(
    /// Removes workers from a running elastic job (`arena scalein etjob`).
    ScaleInEtJobBuilder
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_out_options() {
        let job = ScaleOutEtJobBuilder::new()
            .with_name("elastic")
            .with_count(2)
            .with_timeout(Duration::from_secs(300))
            .with_retry(3)
            .with_script("/etc/edl/scaler.sh")
            .build()
            .unwrap();

        assert_eq!(job.job_type(), &TrainingJobType::EtJob);
        assert_eq!(
            job.args(),
            [
                "--name=elastic",
                "--count=2",
                "--timeout=300s",
                "--retry=3",
                "--script=/etc/edl/scaler.sh",
            ]
        );
    }

    #[test]
    fn test_scale_in_envs() {
        let job = ScaleInEtJobBuilder::new()
            .with_name("elastic")
            .with_envs([("MODE", "graceful")])
            .build()
            .unwrap();

        assert_eq!(job.args(), ["--name=elastic", "--env=MODE=graceful"]);
    }
}
