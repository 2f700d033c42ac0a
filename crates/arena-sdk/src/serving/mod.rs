//! Serving job builders.
//!
//! Options shared by every serving kind come from [`ServingJobBuilder`];
//! each builder adds its kind-specific options as inherent methods.
//!
//! ```
//! use arena_sdk::serving::{ServingJobBuilder, TensorflowServingJobBuilder};
//!
//! let job = TensorflowServingJobBuilder::new()
//!     .with_name("mnist")
//!     .with_version("v1")
//!     .with_model_name("mnist")
//!     .with_model_path("/tfmodel/mnist")
//!     .build()?;
//!
//! assert_eq!(job.version(), "v1");
//! # Ok::<(), arena_sdk::ArenaError>(())
//! ```

macro_rules! serving_builder {
    ($builder:ident, $job_type:expr) => {
        impl $builder {
            /// Create an empty builder.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            fn push(mut self, field: $crate::field::Field) -> Self {
                self.options.push(field);
                self
            }
        }

        impl $crate::serving::ServingJobBuilder for $builder {
            fn job_type(&self) -> $crate::types::ServingJobType {
                $job_type
            }

            fn options(&self) -> &$crate::job::JobOptions {
                &self.options
            }

            fn options_mut(&mut self) -> &mut $crate::job::JobOptions {
                &mut self.options
            }
        }
    };
}

mod custom;
mod kfserving;
mod tensorflow;
mod tensorrt;

pub use custom::CustomServingJobBuilder;
pub use kfserving::KfServingJobBuilder;
pub use tensorflow::TensorflowServingJobBuilder;
pub use tensorrt::TensorrtServingJobBuilder;

use crate::error::Result;
use crate::field::Field;
use crate::job::{JobOptions, ServingJob};
use crate::types::ServingJobType;

/// Options common to every serving kind.
pub trait ServingJobBuilder: Sized {
    /// The kind this builder produces.
    fn job_type(&self) -> ServingJobType;

    /// The accumulated options.
    fn options(&self) -> &JobOptions;

    /// Mutable access to the accumulated options.
    fn options_mut(&mut self) -> &mut JobOptions;

    /// Validate the accumulated fields and produce a descriptor.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateArgs` error naming the first invalid flag.
    fn build(&self) -> Result<ServingJob> {
        self.options().build_serving(self.job_type())
    }

    /// Job name (`--name`).
    #[must_use]
    fn with_name(mut self, name: impl Into<String>) -> Self {
        self.options_mut().set_name(name);
        self
    }

    /// Serving image (`--image`).
    #[must_use]
    fn with_image(mut self, image: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--image", image));
        self
    }

    /// Model version (`--version`).
    #[must_use]
    fn with_version(mut self, version: impl Into<String>) -> Self {
        self.options_mut().set_version(version);
        self
    }

    /// CPU request (`--cpu`).
    #[must_use]
    fn with_cpu(mut self, cpu: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--cpu", cpu));
        self
    }

    /// Memory request (`--memory`).
    #[must_use]
    fn with_memory(mut self, memory: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--memory", memory));
        self
    }

    /// Replica count (`--replicas`).
    #[must_use]
    fn with_replicas(mut self, count: u32) -> Self {
        self.options_mut().push(Field::string("--replicas", count.to_string()));
        self
    }

    /// Image pull policy, e.g. `IfNotPresent` (`--image-pull-policy`).
    #[must_use]
    fn with_image_pull_policy(mut self, policy: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--image-pull-policy", policy));
        self
    }

    /// GPUs per replica (`--gpus`).
    #[must_use]
    fn with_gpus(mut self, count: u32) -> Self {
        self.options_mut().push(Field::string("--gpus", count.to_string()));
        self
    }

    /// Shared GPU memory per replica, in GiB (`--gpumemory`).
    #[must_use]
    fn with_gpu_memory(mut self, gib: u32) -> Self {
        self.options_mut().push(Field::string("--gpumemory", gib.to_string()));
        self
    }

    /// Environment variables (`--env=K=V`).
    #[must_use]
    fn with_envs<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options_mut().push(Field::map("--env", envs, '='));
        self
    }

    /// Node selectors (`--selector=K=V`).
    #[must_use]
    fn with_node_selectors<I, K, V>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options_mut().push(Field::map("--selector", selectors, '='));
        self
    }

    /// Tolerations (`--toleration`, repeated).
    #[must_use]
    fn with_tolerations<I, S>(mut self, tolerations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options_mut().push(Field::list("--toleration", tolerations));
        self
    }

    /// Pod annotations (`--annotation=K=V`).
    #[must_use]
    fn with_annotations<I, K, V>(mut self, annotations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options_mut().push(Field::map("--annotation", annotations, '='));
        self
    }

    /// Persistent volume claims to mount (`--data=PVC:PATH`).
    #[must_use]
    fn with_datas<I, K, V>(mut self, datas: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options_mut().push(Field::map("--data", datas, ':'));
        self
    }

    /// Host directories to mount (`--data-dir=HOST:PATH`).
    #[must_use]
    fn with_data_dirs<I, K, V>(mut self, data_dirs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options_mut().push(Field::map("--data-dir", data_dirs, ':'));
        self
    }

    /// Trailing command run by the server; appended as the final argument.
    #[must_use]
    fn with_command(mut self, command: impl Into<String>) -> Self {
        self.options_mut().set_command(command);
        self
    }
}
