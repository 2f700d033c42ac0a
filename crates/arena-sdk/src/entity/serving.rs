use super::null_as_default;
use crate::types::ServingJobType;
use serde::{Deserialize, Serialize};

/// A serving job as reported by `arena serve get` / `arena serve list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServingJobInfo {
    /// Unique identity of the job.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// Job name.
    pub name: String,
    /// Namespace the job runs in.
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,
    /// Serving kind.
    #[serde(rename = "type")]
    pub serving_type: ServingJobType,
    /// Model version.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    /// Time since submission.
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: String,
    /// Replicas requested.
    #[serde(default)]
    pub desired_instances: i64,
    /// Replicas ready.
    #[serde(default)]
    pub available_instances: i64,
    /// Cluster IP of the service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: String,
    /// CPUs requested across replicas.
    #[serde(rename = "requestCPUs", default)]
    pub request_cpus: f64,
    /// GPUs requested across replicas.
    #[serde(rename = "requestGPUs", default)]
    pub request_gpus: f64,
    /// GPU memory requested across replicas, in GiB.
    #[serde(rename = "requestGPUMemory", default)]
    pub request_gpu_memory: i64,
    /// GPU compute share requested across replicas.
    #[serde(rename = "requestGPUCore", default)]
    pub request_gpu_core: i64,
    /// Creation time, in Unix seconds.
    #[serde(default)]
    pub creation_timestamp: i64,
    /// Exposed ports.
    #[serde(default, deserialize_with = "null_as_default")]
    pub endpoints: Vec<Endpoint>,
    /// Pods of the job.
    #[serde(default, deserialize_with = "null_as_default")]
    pub instances: Vec<ServingInstance>,
}

impl ServingJobInfo {
    /// Returns `true` once every desired replica is available.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.desired_instances > 0 && self.available_instances >= self.desired_instances
    }
}

/// An exposed port of a serving job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Port name, e.g. `grpc` or `restful`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Service port.
    #[serde(default)]
    pub port: i64,
    /// Node port, 0 if none.
    #[serde(default)]
    pub node_port: i64,
}

/// One pod of a serving job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServingInstance {
    /// Pod name.
    pub name: String,
    /// Pod phase.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Pod age.
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: String,
    /// Containers ready.
    #[serde(default)]
    pub ready_containers: i64,
    /// Containers in the pod.
    #[serde(default)]
    pub total_containers: i64,
    /// Container restarts.
    #[serde(default)]
    pub restart_count: i64,
    /// IP of the node the pod runs on.
    #[serde(rename = "nodeIP", default, deserialize_with = "null_as_default")]
    pub node_ip: String,
    /// Node the pod runs on.
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_name: String,
    /// Pod IP.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: String,
    /// GPUs requested by the pod.
    #[serde(rename = "requestGPUs", default)]
    pub request_gpus: f64,
    /// GPU memory requested by the pod, in GiB.
    #[serde(rename = "requestGPUMemory", default)]
    pub request_gpu_memory: i64,
    /// GPU compute share requested by the pod.
    #[serde(rename = "requestGPUCore", default)]
    pub request_gpu_core: i64,
    /// Creation time, in Unix seconds.
    #[serde(default)]
    pub creation_timestamp: i64,
}
