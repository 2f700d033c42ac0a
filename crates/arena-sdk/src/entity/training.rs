use super::null_as_default;
use crate::types::{TrainingJobStatus, TrainingJobType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A training job as reported by `arena get` / `arena list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingJobInfo {
    /// Job name.
    pub name: String,
    /// Namespace the job runs in.
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,
    /// Time since submission, e.g. `3m`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    /// Lifecycle state.
    pub status: TrainingJobStatus,
    /// Job kind.
    pub trainer: TrainingJobType,
    /// `TensorBoard` address, when enabled.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tensorboard: String,
    /// Name of the chief instance.
    #[serde(default, deserialize_with = "null_as_default")]
    pub chief_name: String,
    /// Priority class.
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: String,
    /// GPUs requested across instances.
    #[serde(rename = "requestGPUs", default)]
    pub request_gpus: f64,
    /// GPUs allocated across instances.
    #[serde(rename = "allocatedGPUs", default)]
    pub allocated_gpus: f64,
    /// Pods of the job.
    #[serde(default, deserialize_with = "null_as_default")]
    pub instances: Vec<TrainingInstance>,
}

impl TrainingJobInfo {
    /// The chief instance, if one is reported.
    #[must_use]
    pub fn chief(&self) -> Option<&TrainingInstance> {
        self.instances.iter().find(|instance| instance.chief)
    }
}

/// One pod of a training job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingInstance {
    /// Pod name.
    pub name: String,
    /// Pod phase.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Pod age.
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: String,
    /// Node the pod runs on.
    #[serde(default, deserialize_with = "null_as_default")]
    pub node: String,
    /// IP of that node.
    #[serde(rename = "nodeIP", default, deserialize_with = "null_as_default")]
    pub node_ip: String,
    /// Whether this pod is the chief.
    #[serde(default)]
    pub chief: bool,
    /// GPUs requested by the pod.
    #[serde(rename = "requestGPUs", default)]
    pub request_gpus: f64,
    /// Per-device metrics, keyed by device index.
    #[serde(rename = "gpuMetrics", default, deserialize_with = "null_as_default")]
    pub gpu_metrics: BTreeMap<String, InstanceGpuMetric>,
}

/// Utilization of one device used by a training pod.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceGpuMetric {
    /// Utilization percentage.
    #[serde(rename = "gpuDutyCycle", default)]
    pub duty_cycle: f64,
    /// Used memory, in bytes.
    #[serde(rename = "usedGPUMemory", default)]
    pub used_memory: f64,
    /// Total memory, in bytes.
    #[serde(rename = "totalGPUMemory", default)]
    pub total_memory: f64,
}
