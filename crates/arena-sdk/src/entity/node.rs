use super::null_as_default;
use crate::types::NodeType;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Identity fields every node reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Node name.
    pub name: String,
    /// Free-form description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Internal IP address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: String,
    /// Readiness, e.g. `Ready`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Cluster role, e.g. `master`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    /// Scheduling category.
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

/// Advanced metrics for one GPU device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuMetric {
    /// Device index.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Device UUID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// Device health, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Utilization percentage.
    #[serde(rename = "gpuDutyCycle", default)]
    pub duty_cycle: f64,
    /// Used memory, in bytes.
    #[serde(rename = "usedGPUMemory", default)]
    pub used_memory: f64,
    /// Total memory, in bytes.
    #[serde(rename = "totalGPUMemory", default)]
    pub total_memory: f64,
    /// Pods on this device, as `namespace/name`.
    #[serde(rename = "podNames", default, deserialize_with = "null_as_default")]
    pub pod_names: Vec<String>,
}

/// GPU counters shared by every GPU node type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuSummary {
    /// GPUs installed.
    #[serde(rename = "totalGPUs", default)]
    pub total_gpus: f64,
    /// GPUs allocated to pods.
    #[serde(rename = "allocatedGPUs", default)]
    pub allocated_gpus: f64,
    /// GPUs reported unhealthy.
    #[serde(rename = "unhealthyGPUs", default)]
    pub unhealthy_gpus: f64,
    /// Per-device metrics; empty unless GPU metrics are enabled.
    #[serde(rename = "gpuMetrics", default, deserialize_with = "null_as_default")]
    pub gpu_metrics: Vec<GpuMetric>,
}

/// A node without GPU scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalNode {
    /// Identity fields.
    #[serde(flatten)]
    pub info: NodeInfo,
}

/// A device of a GPU-share node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuShareDevice {
    /// Device index.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Device memory, in GiB.
    #[serde(rename = "totalGPUMemory", default)]
    pub total_memory: f64,
    /// Memory allocated to pods, in GiB.
    #[serde(rename = "allocatedGPUMemory", default)]
    pub allocated_memory: f64,
    /// Compute share of the device, in percent units.
    #[serde(rename = "totalGPUCore", default)]
    pub total_core: i64,
    /// Compute share allocated to pods.
    #[serde(rename = "allocatedGPUCore", default)]
    pub allocated_core: i64,
}

/// A pod placed on a GPU-share node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuShareInstance {
    /// Pod name.
    pub name: String,
    /// Pod namespace.
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,
    /// Pod phase.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Requested GPU memory, in GiB.
    #[serde(rename = "requestGPUMemory", default)]
    pub request_memory: i64,
    /// Requested GPU compute share.
    #[serde(rename = "requestGPUCore", default)]
    pub request_core: i64,
    /// Memory taken on each device, keyed by device index.
    #[serde(
        rename = "gpuMemoryAllocation",
        alias = "allocation",
        default,
        deserialize_with = "null_as_default"
    )]
    pub allocation: BTreeMap<String, i64>,
    /// Compute share taken on each device, keyed by device index.
    #[serde(rename = "gpuCoreAllocation", default, deserialize_with = "null_as_default")]
    pub core_allocation: BTreeMap<String, i64>,
}

/// A node whose GPUs are shared by memory slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuShareNode {
    /// Identity fields.
    #[serde(flatten)]
    pub info: NodeInfo,
    /// GPU counters.
    #[serde(flatten)]
    pub gpus: GpuSummary,
    /// GPU memory on the node, in GiB.
    #[serde(rename = "totalGPUMemory", default)]
    pub total_memory: f64,
    /// GPU memory allocated to pods, in GiB.
    #[serde(rename = "allocatedGPUMemory", default)]
    pub allocated_memory: f64,
    /// GPU compute share on the node.
    #[serde(rename = "totalGPUCore", default)]
    pub total_core: i64,
    /// GPU compute share allocated to pods.
    #[serde(rename = "allocatedGPUCore", default)]
    pub allocated_core: i64,
    /// Devices.
    #[serde(default, deserialize_with = "null_as_default")]
    pub devices: Vec<GpuShareDevice>,
    /// Pods on this node.
    #[serde(default, deserialize_with = "null_as_default")]
    pub instances: Vec<GpuShareInstance>,
}

/// A pod placed on a GPU-exclusive node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuExclusiveInstance {
    /// Pod name.
    pub name: String,
    /// Pod namespace.
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,
    /// Pod phase.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Whole GPUs requested.
    #[serde(rename = "requestGPUs", default)]
    pub request_gpus: i64,
}

/// A node whose GPUs are allocated whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuExclusiveNode {
    /// Identity fields.
    #[serde(flatten)]
    pub info: NodeInfo,
    /// GPU counters.
    #[serde(flatten)]
    pub gpus: GpuSummary,
    /// Pods on this node.
    #[serde(default, deserialize_with = "null_as_default")]
    pub instances: Vec<GpuExclusiveInstance>,
}

/// A pod placed on a GPU-topology node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuTopologyInstance {
    /// Pod name.
    pub name: String,
    /// Pod namespace.
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,
    /// Pod phase.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Whole GPUs requested.
    #[serde(rename = "requestGPUs", default)]
    pub request_gpus: i64,
    /// Device indexes allocated.
    #[serde(default, deserialize_with = "null_as_default")]
    pub allocation: Vec<String>,
    /// Device indexes visible to the pod.
    #[serde(rename = "visibleGPUs", default, deserialize_with = "null_as_default")]
    pub visible_gpus: Vec<String>,
}

/// A device of a GPU-topology node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuTopologyDevice {
    /// Device index.
    #[serde(alias = "gpuIndex", default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Health flag.
    #[serde(default)]
    pub healthy: bool,
    /// Allocation state.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

/// Interconnect between the devices of a topology node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuTopology {
    /// Link type between each device pair, e.g. `NV1` or `SYS`.
    #[serde(rename = "linkMatrix", default, deserialize_with = "null_as_default")]
    pub link_matrix: Vec<Vec<String>>,
    /// Bandwidth between each device pair, in GB/s.
    #[serde(rename = "bandwidthMatrix", default, deserialize_with = "null_as_default")]
    pub bandwidth_matrix: Vec<Vec<f32>>,
}

/// A node whose GPUs are allocated by interconnect topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuTopologyNode {
    /// Identity fields.
    #[serde(flatten)]
    pub info: NodeInfo,
    /// GPU counters.
    #[serde(flatten)]
    pub gpus: GpuSummary,
    /// Devices.
    #[serde(default, deserialize_with = "null_as_default")]
    pub devices: Vec<GpuTopologyDevice>,
    /// Pods on this node.
    #[serde(default, deserialize_with = "null_as_default")]
    pub instances: Vec<GpuTopologyInstance>,
    /// Device interconnect.
    #[serde(rename = "gpuTopology", default, deserialize_with = "null_as_default")]
    pub topology: GpuTopology,
}

/// A cluster node, by scheduling category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// No GPU scheduling.
    Normal(NormalNode),
    /// GPUs shared by memory.
    GpuShare(GpuShareNode),
    /// GPUs allocated whole.
    GpuExclusive(GpuExclusiveNode),
    /// GPUs allocated by topology.
    GpuTopology(GpuTopologyNode),
    /// A type this client does not know.
    Unknown(UnknownNode),
}

/// A node of unrecognized type; serializes back to the raw record.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownNode {
    /// Identity fields.
    pub info: NodeInfo,
    /// The record as reported.
    pub raw: Value,
}

impl Serialize for UnknownNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl Node {
    /// Identity fields.
    #[must_use]
    pub fn info(&self) -> &NodeInfo {
        match self {
            Self::Normal(node) => &node.info,
            Self::GpuShare(node) => &node.info,
            Self::GpuExclusive(node) => &node.info,
            Self::GpuTopology(node) => &node.info,
            Self::Unknown(node) => &node.info,
        }
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// Scheduling category, as reported.
    #[must_use]
    pub fn node_type(&self) -> &NodeType {
        &self.info().node_type
    }

    /// GPU counters, for GPU node types.
    #[must_use]
    pub fn gpus(&self) -> Option<&GpuSummary> {
        match self {
            Self::GpuShare(node) => Some(&node.gpus),
            Self::GpuExclusive(node) => Some(&node.gpus),
            Self::GpuTopology(node) => Some(&node.gpus),
            Self::Normal(_) | Self::Unknown(_) => None,
        }
    }
}

/// Every node reported by one query, grouped by type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeSet {
    /// Nodes without GPU scheduling.
    #[serde(rename = "normalNodes")]
    pub normal: Vec<NormalNode>,
    /// GPU-share nodes.
    #[serde(rename = "gpuShareNodes")]
    pub gpu_share: Vec<GpuShareNode>,
    /// GPU-exclusive nodes.
    #[serde(rename = "gpuExclusiveNodes")]
    pub gpu_exclusive: Vec<GpuExclusiveNode>,
    /// GPU-topology nodes.
    #[serde(rename = "gpuTopologyNodes")]
    pub gpu_topology: Vec<GpuTopologyNode>,
    /// Nodes of unrecognized types, as reported.
    #[serde(rename = "unknownNodes", skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<UnknownNode>,
}

impl NodeSet {
    /// Adds `node` to its group.
    pub fn push(&mut self, node: Node) {
        match node {
            Node::Normal(node) => self.normal.push(node),
            Node::GpuShare(node) => self.gpu_share.push(node),
            Node::GpuExclusive(node) => self.gpu_exclusive.push(node),
            Node::GpuTopology(node) => self.gpu_topology.push(node),
            Node::Unknown(node) => self.unknown.push(node),
        }
    }

    /// Keeps only the nodes whose name is in `names`.
    #[must_use]
    pub fn retain_names(mut self, names: &[String]) -> Self {
        let keep = |name: &str| names.iter().any(|wanted| wanted == name);
        self.normal.retain(|node| keep(&node.info.name));
        self.gpu_share.retain(|node| keep(&node.info.name));
        self.gpu_exclusive.retain(|node| keep(&node.info.name));
        self.gpu_topology.retain(|node| keep(&node.info.name));
        self.unknown.retain(|node| keep(&node.info.name));
        self
    }

    /// Total node count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.normal.len()
            + self.gpu_share.len()
            + self.gpu_exclusive.len()
            + self.gpu_topology.len()
            + self.unknown.len()
    }

    /// Returns `true` if no node was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every node, recognized types first.
    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(self.len());
        nodes.extend(self.normal.into_iter().map(Node::Normal));
        nodes.extend(self.gpu_share.into_iter().map(Node::GpuShare));
        nodes.extend(self.gpu_exclusive.into_iter().map(Node::GpuExclusive));
        nodes.extend(self.gpu_topology.into_iter().map(Node::GpuTopology));
        nodes.extend(self.unknown.into_iter().map(Node::Unknown));
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gpushare_node_fields() {
        let node: GpuShareNode = serde_json::from_value(json!({
            "name": "gpu-1",
            "ip": "192.168.1.10",
            "status": "Ready",
            "role": "worker",
            "type": "GPUShare",
            "totalGPUs": 2,
            "allocatedGPUs": 1,
            "unhealthyGPUs": 0,
            "gpuMetrics": null,
            "totalGPUMemory": 31.5,
            "allocatedGPUMemory": 8,
            "totalGPUCore": 200,
            "allocatedGPUCore": 30,
            "devices": [{
                "id": "0",
                "totalGPUMemory": 15.75,
                "allocatedGPUMemory": 8,
                "totalGPUCore": 100,
                "allocatedGPUCore": 30
            }],
            "instances": [{
                "name": "infer-0",
                "namespace": "default",
                "status": "Running",
                "requestGPUMemory": 8,
                "requestGPUCore": 30,
                "gpuMemoryAllocation": {"0": 8},
                "gpuCoreAllocation": {"0": 30}
            }]
        }))
        .unwrap();

        assert_eq!(node.info.node_type, NodeType::GpuShare);
        assert!((node.gpus.total_gpus - 2.0).abs() < f64::EPSILON);
        assert!(node.gpus.gpu_metrics.is_empty());
        assert_eq!(node.devices.len(), 1);
        assert_eq!(node.instances[0].allocation.get("0"), Some(&8));
        assert_eq!((node.total_core, node.allocated_core), (200, 30));
        assert_eq!(node.devices[0].total_core, 100);
        assert_eq!(node.instances[0].request_core, 30);
        assert_eq!(node.instances[0].core_allocation.get("0"), Some(&30));
    }

    #[test]
    fn test_gpushare_core_fields_default_when_absent() {
        let instance: GpuShareInstance = serde_json::from_value(json!({
            "name": "infer-1",
            "requestGPUMemory": 4,
            "gpuMemoryAllocation": {"1": 4},
            "gpuCoreAllocation": null
        }))
        .unwrap();

        assert_eq!(instance.request_core, 0);
        assert!(instance.core_allocation.is_empty());
        let value = serde_json::to_value(&instance).unwrap();
        assert_eq!(value["gpuCoreAllocation"], json!({}));
        assert_eq!(value["gpuMemoryAllocation"], json!({"1": 4}));
    }

    #[test]
    fn test_topology_device_accepts_gpu_index() {
        let device: GpuTopologyDevice =
            serde_json::from_value(json!({"gpuIndex": "3", "healthy": true, "status": "idle"}))
                .unwrap();
        assert_eq!(device.id, "3");
        assert!(device.healthy);
    }

    #[test]
    fn test_node_set_skips_empty_unknown_group() {
        let value = serde_json::to_value(NodeSet::default()).unwrap();
        assert!(value.get("unknownNodes").is_none());
        assert_eq!(value["normalNodes"], json!([]));
    }

    #[test]
    fn test_retain_names_filters_every_group() {
        let mut set = NodeSet::default();
        for name in ["a", "b"] {
            set.push(Node::Normal(NormalNode {
                info: serde_json::from_value(json!({"name": name, "type": "Normal"})).unwrap(),
            }));
        }
        let raw = json!({"name": "c", "type": "GPUVirtual", "vgpus": 4});
        set.push(Node::Unknown(UnknownNode {
            info: serde_json::from_value(raw.clone()).unwrap(),
            raw,
        }));

        let kept = set.retain_names(&["b".to_string(), "c".to_string()]);
        assert_eq!(kept.len(), 2);
        let names: Vec<_> = kept.into_nodes().iter().map(|n| n.name().to_string()).collect();
        assert_eq!(names, ["b", "c"]);
    }

    #[test]
    fn test_unknown_node_serializes_raw_record() {
        let raw = json!({"name": "v1", "type": "GPUVirtual", "vgpus": 4});
        let node = Node::Unknown(UnknownNode {
            info: serde_json::from_value(raw.clone()).unwrap(),
            raw: raw.clone(),
        });
        assert_eq!(serde_json::to_value(&node).unwrap(), raw);
        assert!(node.gpus().is_none());
    }
}
