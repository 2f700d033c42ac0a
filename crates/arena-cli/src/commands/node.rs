//! Node query command implementation.

use arena_sdk::{ArenaClient, Executor, NodeType};
use tokio::io::AsyncWrite;
use tracing::debug;

use super::emit;
use crate::cli::NodeCommands;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Node command executor.
pub struct NodeCommand<'a, E> {
    client: &'a ArenaClient<E>,
}

impl<'a, E: Executor> NodeCommand<'a, E> {
    /// Create a new node command.
    #[must_use]
    pub const fn new(client: &'a ArenaClient<E>) -> Self {
        Self { client }
    }

    /// Execute a node subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or writing fails.
    pub async fn execute<W>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &NodeCommands,
    ) -> Result<(), CliError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        match command {
            NodeCommands::List { node_type, names } => {
                let node_type = node_type.clone().unwrap_or(NodeType::All);
                debug!(node_type = %node_type, names = names.len(), "listing nodes");
                let nodes = self.client.nodes().query(&node_type, names).await?;
                emit(out, format, &nodes).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use arena_exec::{FakeExecutor, ProcessResult};
    use arena_sdk::ClientConfig;

    const NODES: &str = r#"{
        "normalNodes": [{
            "name": "cpu-1", "ip": "10.0.0.1", "status": "Ready",
            "role": "worker", "type": "Normal"
        }],
        "gpuExclusiveNodes": [{
            "name": "gpu-1", "ip": "10.0.0.2", "status": "Ready",
            "role": "worker", "type": "GPUExclusive",
            "totalGPUs": 8, "allocatedGPUs": 2, "unhealthyGPUs": 0,
            "gpuMetrics": [], "instances": []
        }]
    }"#;

    fn client(fake: FakeExecutor) -> ArenaClient<FakeExecutor> {
        ArenaClient::with_executor(ClientConfig::default(), fake).unwrap()
    }

    #[tokio::test]
    async fn list_prints_node_table() {
        let client = client(FakeExecutor::new().with_response(ProcessResult::ok(NODES)));
        let mut out = Vec::new();
        let command = NodeCommands::List {
            node_type: None,
            names: vec![],
        };
        NodeCommand::new(&client)
            .execute(&mut out, &OutputFormat::new(Format::Table), &command)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("cpu-1"));
        assert!(text.contains("2/8"));
        assert!(text.contains("Total: 2 node(s)"));
    }

    #[tokio::test]
    async fn list_passes_type_filter() {
        let fake = FakeExecutor::new().with_response(ProcessResult::ok(NODES));
        let client = client(fake.clone());
        let command = NodeCommands::List {
            node_type: Some(NodeType::GpuExclusive),
            names: vec!["gpu-1".into()],
        };
        let mut out = Vec::new();
        NodeCommand::new(&client)
            .execute(&mut out, &OutputFormat::new(Format::Json), &command)
            .await
            .unwrap();

        let args = fake.last_args().unwrap();
        assert!(args.contains(&"-m=e".to_string()));
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["gpuExclusiveNodes"][0]["name"], "gpu-1");
        assert_eq!(value["normalNodes"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn tool_failure_surfaces() {
        let client = client(FakeExecutor::new().with_response(ProcessResult::failed(1, "boom")));
        let command = NodeCommands::List {
            node_type: None,
            names: vec![],
        };
        let err = NodeCommand::new(&client)
            .execute(&mut Vec::new(), &OutputFormat::default(), &command)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Arena(_)));
    }
}
