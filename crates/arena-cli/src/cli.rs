//! Command-line argument parsing with clap.

use std::time::Duration;

use arena_sdk::config::{
    ENV_BINARY, ENV_KUBECONFIG, ENV_LOG_COLOR, ENV_LOG_LEVEL, ENV_NAMESPACE, ENV_TIMEOUT_SECS,
};
use arena_sdk::{ClientConfig, LogsRequest, NodeType, ServingJobType, TrainingJobType};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// arenactl - inspect and manage arena jobs from the shell.
#[derive(Parser, Debug, Clone)]
#[command(name = "arenactl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path of the arena binary.
    #[arg(long, env = ENV_BINARY, default_value = arena_sdk::config::DEFAULT_BINARY)]
    pub binary: String,

    /// Kubeconfig handed to arena.
    #[arg(long, env = ENV_KUBECONFIG)]
    pub kubeconfig: Option<String>,

    /// Namespace to operate in.
    #[arg(short, long, env = ENV_NAMESPACE, default_value = arena_sdk::config::DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Namespace arena itself is installed in.
    #[arg(long, default_value = arena_sdk::config::DEFAULT_ARENA_NAMESPACE)]
    pub arena_namespace: String,

    /// Log level for both arena and arenactl.
    #[arg(long, env = ENV_LOG_LEVEL, default_value = arena_sdk::config::DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Colorize log output.
    #[arg(long, env = ENV_LOG_COLOR)]
    pub log_color: bool,

    /// Kill arena after this many seconds.
    #[arg(long, env = ENV_TIMEOUT_SECS, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Client configuration described by the global flags.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default()
            .with_binary(&self.binary)
            .with_namespace(&self.namespace)
            .with_arena_namespace(&self.arena_namespace)
            .with_log_level(self.log_level.to_ascii_lowercase())
            .with_log_color(self.log_color);
        if let Some(path) = &self.kubeconfig {
            config = config.with_kubeconfig(path);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Query cluster nodes.
    Node {
        /// Node subcommand to execute.
        #[command(subcommand)]
        command: NodeCommands,
    },

    /// Training job commands.
    Training {
        /// Training subcommand to execute.
        #[command(subcommand)]
        command: TrainingCommands,
    },

    /// Serving job commands.
    Serving {
        /// Serving subcommand to execute.
        #[command(subcommand)]
        command: ServingCommands,
    },
}

/// Node subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum NodeCommands {
    /// List nodes with their GPU usage.
    List {
        /// Only nodes of this type (normal, share, exclusive, topology).
        #[arg(short = 't', long = "type", value_parser = parse_node_type)]
        node_type: Option<NodeType>,

        /// Only these nodes.
        names: Vec<String>,
    },
}

/// Training job subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum TrainingCommands {
    /// List training jobs.
    List {
        /// Only jobs of this kind.
        #[arg(short = 't', long = "type", value_parser = parse_training_type)]
        job_type: Option<TrainingJobType>,

        /// List jobs in every namespace.
        #[arg(short = 'A', long)]
        all_namespaces: bool,
    },

    /// Show one training job.
    Get {
        /// Job name.
        name: String,

        /// Job kind, when the name is ambiguous.
        #[arg(short = 't', long = "type", value_parser = parse_training_type)]
        job_type: Option<TrainingJobType>,
    },

    /// Delete a training job.
    Delete {
        /// Job name.
        name: String,

        /// Job kind, when the name is ambiguous.
        #[arg(short = 't', long = "type", value_parser = parse_training_type)]
        job_type: Option<TrainingJobType>,
    },

    /// Delete finished jobs older than a window.
    Prune {
        /// Age threshold in seconds.
        #[arg(long, value_name = "SECS")]
        since: u64,

        /// Prune in every namespace.
        #[arg(short = 'A', long)]
        all_namespaces: bool,
    },

    /// Print a job's logs.
    Logs {
        /// Job name.
        name: String,

        /// Job kind, when the name is ambiguous.
        #[arg(short = 't', long = "type", value_parser = parse_training_type)]
        job_type: Option<TrainingJobType>,

        /// Log selection flags.
        #[command(flatten)]
        logs: LogsArgs,
    },
}

/// Serving job subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ServingCommands {
    /// List serving jobs.
    List {
        /// Only jobs of this kind (tf, trt, kf, custom).
        #[arg(short = 't', long = "type", value_parser = parse_serving_type)]
        job_type: Option<ServingJobType>,

        /// List jobs in every namespace.
        #[arg(short = 'A', long)]
        all_namespaces: bool,
    },

    /// Show one serving job.
    Get {
        /// Job name.
        name: String,

        /// Job kind.
        #[arg(short = 't', long = "type", value_parser = parse_serving_type)]
        job_type: Option<ServingJobType>,

        /// Job version.
        #[arg(short = 'v', long, default_value = "")]
        version: String,
    },

    /// Delete a serving job.
    Delete {
        /// Job name.
        name: String,

        /// Job kind.
        #[arg(short = 't', long = "type", value_parser = parse_serving_type)]
        job_type: Option<ServingJobType>,

        /// Job version.
        #[arg(short = 'v', long, default_value = "")]
        version: String,
    },

    /// Split traffic between versions of a job.
    TrafficSplit {
        /// Job name.
        name: String,

        /// Version weights.
        #[arg(short = 'w', long = "weight", value_name = "VERSION=WEIGHT", value_parser = parse_weight, required = true)]
        weights: Vec<(String, u32)>,
    },

    /// Print a job's logs.
    Logs {
        /// Job name.
        name: String,

        /// Job kind.
        #[arg(short = 't', long = "type", value_parser = parse_serving_type)]
        job_type: Option<ServingJobType>,

        /// Job version.
        #[arg(short = 'v', long, default_value = "")]
        version: String,

        /// Log selection flags.
        #[command(flatten)]
        logs: LogsArgs,
    },
}

/// Flags shared by the `logs` subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct LogsArgs {
    /// Keep streaming new lines.
    #[arg(long)]
    pub follow: bool,

    /// Only lines newer than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub since: Option<u64>,

    /// Number of trailing lines.
    #[arg(long)]
    pub tail: Option<u64>,

    /// Prefix lines with timestamps.
    #[arg(long)]
    pub timestamps: bool,

    /// Pod to read from.
    #[arg(short, long)]
    pub instance: Option<String>,

    /// Container to read from.
    #[arg(short, long)]
    pub container: Option<String>,
}

impl LogsArgs {
    /// The SDK request these flags describe.
    #[must_use]
    pub fn to_request(&self) -> LogsRequest {
        let mut request = LogsRequest::new();
        if self.follow {
            request = request.follow();
        }
        if let Some(secs) = self.since {
            request = request.since(Duration::from_secs(secs));
        }
        if let Some(lines) = self.tail {
            request = request.tail(lines);
        }
        if self.timestamps {
            request = request.timestamps();
        }
        if let Some(instance) = &self.instance {
            request = request.instance(instance);
        }
        if let Some(container) = &self.container {
            request = request.container(container);
        }
        request
    }
}

fn parse_training_type(value: &str) -> Result<TrainingJobType, String> {
    match TrainingJobType::from(value) {
        TrainingJobType::Unknown(raw) => Err(format!(
            "unknown training job type '{raw}', expected one of: {}",
            TrainingJobType::KNOWN.map(|kind| kind.as_str().to_string()).join(", ")
        )),
        kind => Ok(kind),
    }
}

fn parse_serving_type(value: &str) -> Result<ServingJobType, String> {
    match ServingJobType::from(value) {
        ServingJobType::Unknown(raw) => Err(format!("unknown serving job type '{raw}'")),
        kind => Ok(kind),
    }
}

fn parse_node_type(value: &str) -> Result<NodeType, String> {
    match NodeType::from(value) {
        NodeType::Unknown(raw) => Err(format!("unknown node type '{raw}'")),
        kind => Ok(kind),
    }
}

fn parse_weight(value: &str) -> Result<(String, u32), String> {
    let (version, weight) = value
        .split_once('=')
        .ok_or_else(|| format!("expected VERSION=WEIGHT, got '{value}'"))?;
    if version.is_empty() {
        return Err(format!("missing version in '{value}'"));
    }
    let weight = weight
        .parse()
        .map_err(|e| format!("invalid weight in '{value}': {e}"))?;
    Ok((version.to_string(), weight))
}
