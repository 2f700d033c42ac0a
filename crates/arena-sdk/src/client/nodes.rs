use super::connection::Connection;
use crate::decode::decode_nodes;
use crate::entity::{GpuExclusiveNode, GpuShareNode, GpuTopologyNode, NodeSet, NormalNode};
use crate::error::{ErrorKind, Result};
use crate::types::NodeType;
use arena_exec::Executor;
use tracing::debug;

/// Cluster node queries (`arena top node -d -o json`).
///
/// Name filters are applied to the decoded set; an empty filter keeps every
/// node.
pub struct NodeClient<E> {
    connection: Connection<E>,
}

impl<E> Clone for NodeClient<E> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
        }
    }
}

impl<E: Executor> NodeClient<E> {
    pub(crate) fn new(connection: Connection<E>) -> Self {
        Self { connection }
    }

    /// A copy of this client scoped to `namespace`.
    #[must_use]
    pub fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        Self::new(self.connection.with_namespace(namespace))
    }

    /// Every node, optionally restricted to `names`.
    ///
    /// # Errors
    ///
    /// Returns `TopNode` on failure or `MalformedResponse` if the output
    /// cannot be decoded.
    pub async fn all(&self, names: &[String]) -> Result<NodeSet> {
        self.query(&NodeType::All, names).await
    }

    /// Nodes of one type, optionally restricted to `names`.
    ///
    /// [`NodeType::All`] queries every type.
    ///
    /// # Errors
    ///
    /// Returns `TopNode` on failure or `MalformedResponse` if the output
    /// cannot be decoded.
    pub async fn query(&self, node_type: &NodeType, names: &[String]) -> Result<NodeSet> {
        let mut command = self.connection.command(&["top", "node"]).args(["-d", "-o", "json"]);
        if node_type.is_concrete() {
            command = command.arg(format!("-m={}", node_type.shorthand()));
        }
        let stdout = self.connection.run_ok(ErrorKind::TopNode, command).await?;
        let mut nodes = decode_nodes(&stdout)?;
        if !names.is_empty() {
            nodes = nodes.retain_names(names);
        }
        debug!(count = nodes.len(), node_type = %node_type, "queried nodes");
        Ok(nodes)
    }

    /// GPU-share nodes.
    ///
    /// # Errors
    ///
    /// As [`query`](Self::query).
    pub async fn gpushare_nodes(&self, names: &[String]) -> Result<Vec<GpuShareNode>> {
        Ok(self.query(&NodeType::GpuShare, names).await?.gpu_share)
    }

    /// GPU-exclusive nodes.
    ///
    /// # Errors
    ///
    /// As [`query`](Self::query).
    pub async fn gpu_exclusive_nodes(&self, names: &[String]) -> Result<Vec<GpuExclusiveNode>> {
        Ok(self.query(&NodeType::GpuExclusive, names).await?.gpu_exclusive)
    }

    /// GPU-topology nodes.
    ///
    /// # Errors
    ///
    /// As [`query`](Self::query).
    pub async fn gpu_topology_nodes(&self, names: &[String]) -> Result<Vec<GpuTopologyNode>> {
        Ok(self.query(&NodeType::GpuTopology, names).await?.gpu_topology)
    }

    /// Nodes without GPU scheduling.
    ///
    /// # Errors
    ///
    /// As [`query`](Self::query).
    pub async fn normal_nodes(&self, names: &[String]) -> Result<Vec<NormalNode>> {
        Ok(self.query(&NodeType::Normal, names).await?.normal)
    }
}
