//! # arena-cli
//!
//! `arenactl`, a shell front end for the arena SDK.
//!
//! Provides commands for:
//! - Node GPU usage
//! - Training job listing, inspection, deletion, pruning and logs
//! - Serving job listing, inspection, deletion, traffic splits and logs
//!
//! Every command goes through [`arena_sdk::ArenaClient`], so flags are
//! validated and failures classified exactly as they are for library users.
//!
//! ```text
//! ┌──────────┐   ArenaClient   ┌───────────┐   argv/stdout   ┌───────┐
//! │ arenactl │────────────────►│ arena-sdk │◄───────────────►│ arena │
//! └──────────┘                 └───────────┘                 └───────┘
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format, NodeCommands, ServingCommands, TrainingCommands};
pub use error::CliError;
pub use output::OutputFormat;
