//! CLI command implementations.
//!
//! Each submodule drives one sub-client of the SDK:
//! - [`node`] - Node queries
//! - [`training`] - Training jobs
//! - [`serving`] - Serving jobs
//!
//! Commands write to any [`AsyncWrite`] so log streams reach the terminal as
//! they arrive and tests can capture everything in a buffer.

pub mod node;
pub mod serving;
pub mod training;

pub use node::NodeCommand;
pub use serving::ServingCommand;
pub use training::TrainingCommand;

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::CliError;
use crate::output::{OutputFormat, TableDisplay};

/// Render `value` and write it to `out`.
async fn emit<W, T>(out: &mut W, format: &OutputFormat, value: &T) -> Result<(), CliError>
where
    W: AsyncWrite + Unpin + Send,
    T: Serialize + TableDisplay + ?Sized,
{
    let mut buf = Vec::new();
    format.write(&mut buf, value)?;
    out.write_all(&buf).await?;
    out.flush().await?;
    Ok(())
}
