//! Typed client for the `arena` machine-learning job CLI.
//!
//! Jobs are described with fluent builders, rendered into a validated
//! argument vector, run through an [`Executor`], and the tool's output is
//! decoded into typed entities or classified into an [`ArenaError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use arena_sdk::training::{TensorflowJobBuilder, TrainingJobBuilder};
//! use arena_sdk::{ArenaClient, TrainingJobType};
//!
//! # async fn example() -> arena_sdk::Result<()> {
//! let client = ArenaClient::from_env()?;
//!
//! let job = TensorflowJobBuilder::new()
//!     .with_name("tf-test")
//!     .with_workers(1)
//!     .with_gpus(1)
//!     .with_image("tensorflow/tensorflow:2.4.0-gpu")
//!     .with_command("python main.py")
//!     .build()?;
//!
//! match client.training().submit(&job).await {
//!     Err(err) if err.is_already_exists() => println!("{} is already running", job.name()),
//!     other => other?,
//! }
//!
//! if let Some(info) = client.training().get("tf-test", &TrainingJobType::TfJob).await? {
//!     println!("{info}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
pub mod client;
pub mod config;
pub mod decode;
pub mod entity;
pub mod error;
pub mod field;
pub mod job;
pub mod serving;
pub mod training;
pub mod types;

pub use arena_exec::{Executor, ProcessExecutor, ProcessResult};
pub use classify::ErrorPatterns;
pub use client::{ArenaClient, LogsRequest, NodeClient, ServingClient, TrainingClient};
pub use config::ClientConfig;
pub use error::{ArenaError, ErrorKind, Result};
pub use field::Field;
pub use job::{JobOptions, ServingJob, TrainingJob};
pub use types::{NodeType, ServingJobType, TrainingJobStatus, TrainingJobType};
