//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats. JSON output is
//! the entity as decoded, so it can be piped back into tooling that reads
//! arena's own `-o json`.

use std::io::Write;

use arena_sdk::entity::{NodeSet, ServingJobInfo, TrainingJobInfo};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a value in the selected format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay + ?Sized,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => value.write_table(writer)?,
        }
        Ok(())
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

impl TableDisplay for NodeSet {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No nodes found")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<24}  {:<15}  {:<8}  {:<12}  {:<8}  {:>9}",
            "NAME", "IP", "ROLE", "TYPE", "STATUS", "GPUS"
        )?;
        for node in self.clone().into_nodes() {
            let info = node.info();
            let gpus = node.gpus().map_or_else(
                || "-".to_string(),
                |gpus| format!("{}/{}", gpus.allocated_gpus, gpus.total_gpus),
            );
            writeln!(
                writer,
                "{:<24}  {:<15}  {:<8}  {:<12}  {:<8}  {:>9}",
                truncate(&info.name, 24),
                info.ip,
                info.role,
                info.node_type,
                info.status,
                gpus
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} node(s)", self.len())?;
        Ok(())
    }
}

impl TableDisplay for [TrainingJobInfo] {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No training jobs found")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<32}  {:<10}  {:<11}  {:<10}  {:>8}  {:<16}",
            "NAME", "STATUS", "TRAINER", "DURATION", "GPUS", "NODE"
        )?;
        for job in self {
            let node = job.chief().map_or("N/A", |chief| chief.node_ip.as_str());
            writeln!(
                writer,
                "{:<32}  {:<10}  {:<11}  {:<10}  {:>8}  {:<16}",
                truncate(&job.name, 32),
                job.status,
                job.trainer,
                job.duration,
                job.request_gpus,
                node
            )?;
        }
        Ok(())
    }
}

impl TableDisplay for TrainingJobInfo {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Name:        {}", self.name)?;
        writeln!(writer, "Status:      {}", self.status)?;
        writeln!(writer, "Namespace:   {}", self.namespace)?;
        writeln!(writer, "Priority:    {}", or_na(&self.priority))?;
        writeln!(writer, "Trainer:     {}", self.trainer)?;
        writeln!(writer, "Duration:    {}", self.duration)?;
        writeln!(writer, "GPUs:        {}/{}", self.allocated_gpus, self.request_gpus)?;
        if !self.tensorboard.is_empty() {
            writeln!(writer, "Tensorboard: {}", self.tensorboard)?;
        }
        writeln!(writer)?;

        if self.instances.is_empty() {
            writeln!(writer, "Instances: None")?;
            return Ok(());
        }
        writeln!(
            writer,
            "{:<40}  {:<10}  {:<8}  {:<5}  {:<16}",
            "INSTANCE", "STATUS", "AGE", "CHIEF", "NODE"
        )?;
        for instance in &self.instances {
            writeln!(
                writer,
                "{:<40}  {:<10}  {:<8}  {:<5}  {:<16}",
                truncate(&instance.name, 40),
                instance.status,
                instance.age,
                instance.chief,
                or_na(&instance.node)
            )?;
        }
        Ok(())
    }
}

impl TableDisplay for [ServingJobInfo] {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No serving jobs found")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<24}  {:<11}  {:<10}  {:>7}  {:>9}  {:<15}",
            "NAME", "TYPE", "VERSION", "DESIRED", "AVAILABLE", "ADDRESS"
        )?;
        for job in self {
            writeln!(
                writer,
                "{:<24}  {:<11}  {:<10}  {:>7}  {:>9}  {:<15}",
                truncate(&job.name, 24),
                job.serving_type,
                job.version,
                job.desired_instances,
                job.available_instances,
                or_na(&job.ip)
            )?;
        }
        Ok(())
    }
}

impl TableDisplay for ServingJobInfo {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Name:      {}", self.name)?;
        writeln!(writer, "Namespace: {}", self.namespace)?;
        writeln!(writer, "Type:      {}", self.serving_type)?;
        writeln!(writer, "Version:   {}", self.version)?;
        writeln!(writer, "Desired:   {}", self.desired_instances)?;
        writeln!(writer, "Available: {}", self.available_instances)?;
        writeln!(writer, "Age:       {}", self.age)?;
        writeln!(writer, "Address:   {}", or_na(&self.ip))?;
        if !self.endpoints.is_empty() {
            let ports: Vec<String> = self
                .endpoints
                .iter()
                .map(|endpoint| format!("{}:{}", endpoint.name, endpoint.port))
                .collect();
            writeln!(writer, "Port:      {}", ports.join(","))?;
        }
        writeln!(writer)?;

        if self.instances.is_empty() {
            writeln!(writer, "Instances: None")?;
            return Ok(());
        }
        writeln!(
            writer,
            "{:<40}  {:<10}  {:<8}  {:>5}  {:>8}  {:<16}",
            "INSTANCE", "STATUS", "AGE", "READY", "RESTARTS", "NODE"
        )?;
        for instance in &self.instances {
            let ready = format!("{}/{}", instance.ready_containers, instance.total_containers);
            writeln!(
                writer,
                "{:<40}  {:<10}  {:<8}  {:>5}  {:>8}  {:<16}",
                truncate(&instance.name, 40),
                instance.status,
                instance.age,
                ready,
                instance.restart_count,
                or_na(&instance.node_name)
            )?;
        }
        Ok(())
    }
}

/// Simple message output.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Message text.
    pub message: String,
}

impl Message {
    /// Create a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl TableDisplay for Message {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.message)?;
        Ok(())
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

/// Truncate a string to a maximum number of characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
