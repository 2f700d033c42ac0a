//! Connection settings shared by every sub-client.

use crate::error::{ArenaError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default tool binary, resolved through `PATH`.
pub const DEFAULT_BINARY: &str = "arena";

/// Default namespace for jobs.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Default namespace of the arena system components.
pub const DEFAULT_ARENA_NAMESPACE: &str = "arena-system";

/// Default tool log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels the tool accepts.
pub const LOG_LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

/// Environment variable holding the kubeconfig path.
pub const ENV_KUBECONFIG: &str = "KUBECONFIG";
/// Environment variable holding the job namespace.
pub const ENV_NAMESPACE: &str = "ARENA_NAMESPACE";
/// Environment variable holding the tool log level.
pub const ENV_LOG_LEVEL: &str = "ARENA_LOG_LEVEL";
/// Environment variable enabling colored logs (`1`/`true`).
pub const ENV_LOG_COLOR: &str = "ARENA_LOG_COLOR";
/// Environment variable holding the tool binary path.
pub const ENV_BINARY: &str = "ARENA_BINARY";
/// Environment variable holding the default timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "ARENA_TIMEOUT_SECS";

/// How to reach the tool and the cluster.
///
/// Built once per [`ArenaClient`](crate::ArenaClient); nothing below the
/// client reads the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Tool binary.
    pub binary: String,
    /// Kubeconfig path; empty means the tool's default.
    pub kubeconfig: String,
    /// Namespace for jobs.
    pub namespace: String,
    /// Namespace of the arena system components.
    pub arena_namespace: String,
    /// Tool log level.
    pub log_level: String,
    /// Colored log output.
    pub log_color: bool,
    /// Limit for every invocation; `None` waits forever.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            kubeconfig: String::new(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            arena_namespace: DEFAULT_ARENA_NAMESPACE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_color: false,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Set the tool binary.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the kubeconfig path.
    #[must_use]
    pub fn with_kubeconfig(mut self, path: impl Into<String>) -> Self {
        self.kubeconfig = path.into();
        self
    }

    /// Set the job namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the arena system namespace.
    #[must_use]
    pub fn with_arena_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.arena_namespace = namespace.into();
        self
    }

    /// Set the tool log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable or disable colored logs.
    #[must_use]
    pub const fn with_log_color(mut self, enabled: bool) -> Self {
        self.log_color = enabled;
        self
    }

    /// Bound every invocation by `timeout`; zero disables the limit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs()).filter(|secs| *secs > 0);
        self
    }

    /// The invocation limit, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Defaults overridden by the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateArgs` error if `ARENA_TIMEOUT_SECS` is not a number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Unset and empty variables keep the default.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateArgs` error if the timeout is not a number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(binary) = get(ENV_BINARY) {
            config.binary = binary;
        }
        if let Some(kubeconfig) = get(ENV_KUBECONFIG) {
            config.kubeconfig = kubeconfig;
        }
        if let Some(namespace) = get(ENV_NAMESPACE) {
            config.namespace = namespace;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = level.to_lowercase();
        }
        if let Some(color) = get(ENV_LOG_COLOR) {
            config.log_color = matches!(color.trim(), "1" | "true" | "TRUE" | "True");
        }
        if let Some(timeout) = get(ENV_TIMEOUT_SECS) {
            let secs = timeout.trim().parse::<u64>().map_err(|err| {
                ArenaError::validate_args(format!("invalid {ENV_TIMEOUT_SECS} '{timeout}': {err}"))
            })?;
            config.timeout_secs = Some(secs).filter(|secs| *secs > 0);
        }
        Ok(config)
    }

    /// Check the settings before they reach the tool.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateArgs` error for an empty binary or an unsupported
    /// log level.
    pub fn validate(&self) -> Result<()> {
        if self.binary.trim().is_empty() {
            return Err(ArenaError::validate_args("arena binary must not be empty"));
        }
        if !self.log_level.is_empty() && !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ArenaError::validate_args(format!(
                "unsupported log level '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join("|")
            )));
        }
        Ok(())
    }

    /// Connection flags appended after the subcommand words.
    ///
    /// Empty values are omitted.
    #[must_use]
    pub fn connection_args(&self) -> Vec<String> {
        [
            ("--config", &self.kubeconfig),
            ("--namespace", &self.namespace),
            ("--arena-namespace", &self.arena_namespace),
            ("--loglevel", &self.log_level),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(flag, value)| format!("{flag}={value}"))
        .collect()
    }
}
