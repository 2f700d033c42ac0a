use crate::error::Result;
use crate::field::{self, Field};
use std::time::Duration;

/// Options for `arena logs` / `arena serve logs`.
///
/// ```
/// use arena_sdk::LogsRequest;
///
/// let request = LogsRequest::new().follow().tail(100).instance("tf-test-worker-0");
/// assert_eq!(
///     request.to_args()?,
///     ["--follow", "--tail=100", "-i=tf-test-worker-0"]
/// );
/// # Ok::<(), arena_sdk::ArenaError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogsRequest {
    fields: Vec<Field>,
}

impl LogsRequest {
    /// Request with no options: the whole log of the default instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Keep streaming until the job ends (`--follow`).
    #[must_use]
    pub fn follow(self) -> Self {
        self.push(Field::bool("--follow"))
    }

    /// Only lines newer than `since` (`--since`).
    #[must_use]
    pub fn since(self, since: Duration) -> Self {
        self.push(Field::string("--since", format!("{}s", since.as_secs())))
    }

    /// Only lines after an RFC 3339 timestamp (`--since-time`).
    #[must_use]
    pub fn since_time(self, timestamp: impl Into<String>) -> Self {
        self.push(Field::string("--since-time", timestamp))
    }

    /// Only the last `lines` lines (`--tail`).
    #[must_use]
    pub fn tail(self, lines: u64) -> Self {
        self.push(Field::string("--tail", lines.to_string()))
    }

    /// Prefix every line with its timestamp (`--timestamps`).
    #[must_use]
    pub fn timestamps(self) -> Self {
        self.push(Field::bool("--timestamps"))
    }

    /// Which pod to read (`-i`).
    #[must_use]
    pub fn instance(self, instance: impl Into<String>) -> Self {
        self.push(Field::string("-i", instance))
    }

    /// Which container of the pod to read (`-c`).
    #[must_use]
    pub fn container(self, container: impl Into<String>) -> Self {
        self.push(Field::string("-c", container))
    }

    /// Rendered option tokens.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateArgs` error naming the first empty option.
    pub fn to_args(&self) -> Result<Vec<String>> {
        field::render_all(&self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_renders_nothing() {
        assert!(LogsRequest::new().to_args().unwrap().is_empty());
    }

    #[test]
    fn test_all_options() {
        let args = LogsRequest::new()
            .since(Duration::from_secs(600))
            .since_time("2024-01-01T00:00:00Z")
            .timestamps()
            .container("tensorflow")
            .to_args()
            .unwrap();
        assert_eq!(
            args,
            [
                "--since=600s",
                "--since-time=2024-01-01T00:00:00Z",
                "--timestamps",
                "-c=tensorflow",
            ]
        );
    }

    #[test]
    fn test_empty_instance_is_rejected() {
        let err = LogsRequest::new().instance("").to_args().unwrap_err();
        assert!(err.message().contains("-i"));
    }
}
