//! Training job builders.
//!
//! Options shared by the `tfjob`, `mpijob`, `pytorchjob`, `horovodjob` and
//! `etjob` kinds come from [`TrainingJobBuilder`]; each builder adds its own
//! kind-specific options as inherent methods. Volcano and Spark jobs take a
//! different option set and do not implement the shared trait. Scale-out and
//! scale-in of elastic jobs have their own builders in [`scale`].
//!
//! ```
//! use arena_sdk::training::{TensorflowJobBuilder, TrainingJobBuilder};
//!
//! let job = TensorflowJobBuilder::new()
//!     .with_name("tf-test")
//!     .with_workers(1)
//!     .with_gpus(1)
//!     .with_command("python main.py")
//!     .build()?;
//!
//! assert_eq!(job.args(), ["--name=tf-test", "--workers=1", "--gpus=1"]);
//! assert_eq!(job.command(), "python main.py");
//! # Ok::<(), arena_sdk::ArenaError>(())
//! ```

/// Implements [`TrainingJobBuilder`] plumbing for a builder with an
/// `options: JobOptions` field.
macro_rules! training_builder {
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

        impl $crate::training::TrainingJobBuilder for $builder {
            fn job_type(&self) -> $crate::types::TrainingJobType {
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

mod et;
mod horovod;
mod mpi;
mod pytorch;
pub mod scale;
mod spark;
mod tensorflow;
mod volcano;

pub use et::EtJobBuilder;
pub use horovod::HorovodJobBuilder;
pub use mpi::MpiJobBuilder;
pub use pytorch::PyTorchJobBuilder;
pub use scale::{ScaleInEtJobBuilder, ScaleOutEtJobBuilder};
pub use spark::SparkJobBuilder;
pub use tensorflow::TensorflowJobBuilder;
pub use volcano::VolcanoJobBuilder;

use crate::error::Result;
use crate::field::Field;
use crate::job::{JobOptions, TrainingJob};
use crate::types::TrainingJobType;

/// Options common to the standard training job kinds.
///
/// Every `with_*` call appends exactly one field, except
/// [`with_command`](Self::with_command) which sets the trailing command.
pub trait TrainingJobBuilder: Sized {
    /// The kind this builder produces.
    fn job_type(&self) -> TrainingJobType;

    /// The accumulated options.
    fn options(&self) -> &JobOptions;

    /// Mutable access to the accumulated options.
    fn options_mut(&mut self) -> &mut JobOptions;

    /// Validate the accumulated fields and produce a descriptor.
    ///
    /// Borrowing; calling it twice yields identical descriptors.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateArgs` error naming the first invalid flag.
    fn build(&self) -> Result<TrainingJob> {
        self.options().build_training(self.job_type())
    }

    /// Job name (`--name`).
    #[must_use]
    fn with_name(mut self, name: impl Into<String>) -> Self {
        self.options_mut().set_name(name);
        self
    }

    /// Container image (`--image`).
    #[must_use]
    fn with_image(mut self, image: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--image", image));
        self
    }

    /// Worker count (`--workers`).
    #[must_use]
    fn with_workers(mut self, count: u32) -> Self {
        self.options_mut().push(Field::string("--workers", count.to_string()));
        self
    }

    /// Image pull secrets (`--image-pull-secret`, repeated).
    #[must_use]
    fn with_image_pull_secrets<I, S>(mut self, secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options_mut().push(Field::list("--image-pull-secret", secrets));
        self
    }

    /// GPUs per worker (`--gpus`).
    #[must_use]
    fn with_gpus(mut self, count: u32) -> Self {
        self.options_mut().push(Field::string("--gpus", count.to_string()));
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

    /// Config files to mount (`--config-file=SRC:DST`).
    #[must_use]
    fn with_config_files<I, K, V>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options_mut().push(Field::map("--config-file", files, ':'));
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

    /// Training log directory (`--logdir`).
    #[must_use]
    fn with_log_dir(mut self, dir: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--logdir", dir));
        self
    }

    /// Priority class (`--priority`).
    #[must_use]
    fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--priority", priority));
        self
    }

    /// Enable RDMA (`--rdma`).
    #[must_use]
    fn enable_rdma(mut self) -> Self {
        self.options_mut().push(Field::bool("--rdma"));
        self
    }

    /// Image used to sync code (`--sync-image`).
    #[must_use]
    fn with_sync_image(mut self, image: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--sync-image", image));
        self
    }

    /// Code sync mode, e.g. `git` or `rsync` (`--sync-mode`).
    #[must_use]
    fn with_sync_mode(mut self, mode: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--sync-mode", mode));
        self
    }

    /// Code sync source (`--sync-source`).
    #[must_use]
    fn with_sync_source(mut self, source: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--sync-source", source));
        self
    }

    /// Start a `TensorBoard` alongside the job (`--tensorboard`).
    #[must_use]
    fn enable_tensorboard(mut self) -> Self {
        self.options_mut().push(Field::bool("--tensorboard"));
        self
    }

    /// `TensorBoard` image (`--tensorboard-image`).
    #[must_use]
    fn with_tensorboard_image(mut self, image: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--tensorboard-image", image));
        self
    }

    /// Working directory inside the container (`--working-dir`).
    #[must_use]
    fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.options_mut().push(Field::string("--working-dir", dir));
        self
    }

    /// Retry count (`--retry`).
    #[must_use]
    fn with_retry_count(mut self, count: u32) -> Self {
        self.options_mut().push(Field::string("--retry", count.to_string()));
        self
    }

    /// Gang scheduling (`--gang`).
    #[must_use]
    fn enable_coscheduling(mut self) -> Self {
        self.options_mut().push(Field::bool("--gang"));
        self
    }

    /// Trailing command run by the job; appended as the final argument.
    #[must_use]
    fn with_command(mut self, command: impl Into<String>) -> Self {
        self.options_mut().set_command(command);
        self
    }
}
