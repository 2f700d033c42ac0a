//! Validated process execution for the `arena` command-line tool.
//!
//! This crate owns the process boundary: building an argument vector that is
//! safe to hand to the OS, spawning the tool, and returning what it printed.
//! It knows nothing about jobs or nodes; interpretation of the output lives in
//! `arena-sdk`.
//!
//! # Example
//!
//! ```rust,no_run
//! use arena_exec::{ArenaCommand, Executor, ProcessExecutor};
//! use std::time::Duration;
//!
//! # async fn example() -> arena_exec::Result<()> {
//! let command = ArenaCommand::new("arena")
//!     .args(["list", "-o", "json"])
//!     .timeout(Duration::from_secs(30));
//!
//! let result = ProcessExecutor::new().execute(command).await?;
//! if result.success() {
//!     println!("{}", result.stdout);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod executor;
#[cfg(any(test, feature = "testing"))]
pub mod fake;
pub mod output;

pub use command::ArenaCommand;
pub use error::{ExecError, Result};
pub use executor::{ExecFuture, Executor, OutputSink, ProcessExecutor};
#[cfg(any(test, feature = "testing"))]
pub use fake::{FakeExecutor, RecordedCommand};
pub use output::{ProcessResult, TIMEOUT_EXIT_CODE};
