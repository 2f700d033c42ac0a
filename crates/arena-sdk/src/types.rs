//! Tag enumerations shared by builders, clients and decoded entities.
//!
//! Every enum converts totally from a string: text that names no known value
//! becomes an `Unknown` variant carrying the raw input, so new values reported
//! by the tool never fail a decode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of training job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrainingJobType {
    /// `TensorFlow` job (`tfjob`).
    TfJob,
    /// MPI job (`mpijob`).
    MpiJob,
    /// `PyTorch` job (`pytorchjob`).
    PyTorchJob,
    /// Horovod job (`horovodjob`).
    HorovodJob,
    /// Volcano job (`volcanojob`).
    VolcanoJob,
    /// Spark job (`sparkjob`).
    SparkJob,
    /// Elastic training job (`etjob`).
    EtJob,
    /// Any kind; used as a list filter.
    All,
    /// Unrecognized kind, with the raw text.
    Unknown(String),
}

impl TrainingJobType {
    /// Every concrete kind.
    pub const KNOWN: [Self; 7] = [
        Self::TfJob,
        Self::MpiJob,
        Self::PyTorchJob,
        Self::HorovodJob,
        Self::VolcanoJob,
        Self::SparkJob,
        Self::EtJob,
    ];

    /// The tool's name for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::TfJob => "tfjob",
            Self::MpiJob => "mpijob",
            Self::PyTorchJob => "pytorchjob",
            Self::HorovodJob => "horovodjob",
            Self::VolcanoJob => "volcanojob",
            Self::SparkJob => "sparkjob",
            Self::EtJob => "etjob",
            Self::All => "",
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns `true` for a kind usable as a `--type` filter.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Self::All | Self::Unknown(_))
    }
}

impl From<&str> for TrainingJobType {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            return Self::All;
        }
        Self::KNOWN
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .unwrap_or_else(|| Self::Unknown(value.to_string()))
    }
}

/// Kind of serving job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServingJobType {
    /// `TensorFlow` Serving.
    Tensorflow,
    /// `TensorRT` inference server.
    Tensorrt,
    /// `KFServing`.
    KfServing,
    /// Custom serving image.
    Custom,
    /// Any kind; used as a list filter.
    All,
    /// Unrecognized kind, with the raw text.
    Unknown(String),
}

impl ServingJobType {
    /// Every concrete kind.
    pub const KNOWN: [Self; 4] = [Self::Tensorflow, Self::Tensorrt, Self::KfServing, Self::Custom];

    /// Short form accepted by `--type` filters.
    #[must_use]
    pub fn shorthand(&self) -> &str {
        match self {
            Self::Tensorflow => "tf",
            Self::Tensorrt => "trt",
            Self::KfServing => "kf",
            Self::Custom => "custom",
            Self::All => "",
            Self::Unknown(raw) => raw,
        }
    }

    /// Display name, as reported in job listings.
    #[must_use]
    pub fn alias(&self) -> &str {
        match self {
            Self::Tensorflow => "Tensorflow",
            Self::Tensorrt => "Tensorrt",
            Self::KfServing => "KFServing",
            Self::Custom => "Custom",
            Self::All => "",
            Self::Unknown(raw) => raw,
        }
    }

    /// Subcommand of `arena serve` that submits this kind.
    #[must_use]
    pub fn subcommand(&self) -> &str {
        match self {
            Self::Tensorflow => "tensorflow",
            Self::Tensorrt => "tensorrt",
            Self::KfServing => "kfserving",
            Self::Custom => "custom",
            Self::All => "",
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns `true` for a kind usable as a `--type` filter.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Self::All | Self::Unknown(_))
    }
}

impl From<&str> for ServingJobType {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            return Self::All;
        }
        Self::KNOWN
            .into_iter()
            .find(|kind| {
                kind.shorthand() == value
                    || kind.alias().eq_ignore_ascii_case(value)
                    || kind.subcommand().eq_ignore_ascii_case(value)
            })
            .unwrap_or_else(|| Self::Unknown(value.to_string()))
    }
}

/// Scheduling category of a cluster node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    /// Node without GPU scheduling.
    Normal,
    /// GPUs shared by memory slices.
    GpuShare,
    /// GPUs allocated whole.
    GpuExclusive,
    /// GPUs allocated by topology.
    GpuTopology,
    /// Any type; used as a query filter.
    All,
    /// Unrecognized type, with the raw text.
    Unknown(String),
}

impl NodeType {
    /// Every concrete type.
    pub const KNOWN: [Self; 4] = [Self::Normal, Self::GpuShare, Self::GpuExclusive, Self::GpuTopology];

    /// The tool's name for this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "Normal",
            Self::GpuShare => "GPUShare",
            Self::GpuExclusive => "GPUExclusive",
            Self::GpuTopology => "GPUTopology",
            Self::All => "",
            Self::Unknown(raw) => raw,
        }
    }

    /// One-letter form accepted by `top node -m`.
    #[must_use]
    pub fn shorthand(&self) -> &str {
        match self {
            Self::Normal => "n",
            Self::GpuShare => "s",
            Self::GpuExclusive => "e",
            Self::GpuTopology => "t",
            Self::All => "",
            Self::Unknown(raw) => raw,
        }
    }

    fn long_alias(&self) -> &str {
        match self {
            Self::Normal => "none",
            Self::GpuShare => "share",
            Self::GpuExclusive => "exclusive",
            Self::GpuTopology => "topology",
            Self::All | Self::Unknown(_) => "",
        }
    }

    /// Returns `true` for a type usable as a `-m` filter.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Self::All | Self::Unknown(_))
    }
}

impl From<&str> for NodeType {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            return Self::All;
        }
        Self::KNOWN
            .into_iter()
            .find(|kind| {
                kind.shorthand() == value
                    || kind.as_str().eq_ignore_ascii_case(value)
                    || kind.long_alias() == value
            })
            .unwrap_or_else(|| Self::Unknown(value.to_string()))
    }
}

/// Lifecycle state of a training job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrainingJobStatus {
    /// Waiting to be scheduled.
    Pending,
    /// Running.
    Running,
    /// Finished successfully.
    Succeeded,
    /// Finished with an error.
    Failed,
    /// Changing its worker count.
    Scaling,
    /// Unrecognized status (including `UNKNOWN`), with the raw text.
    Unknown(String),
}

impl TrainingJobStatus {
    /// The tool's name for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Scaling => "SCALING",
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns `true` once the job has finished, successfully or not.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl From<&str> for TrainingJobStatus {
    fn from(value: &str) -> Self {
        match value {
            "PENDING" => Self::Pending,
            "RUNNING" => Self::Running,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "SCALING" => Self::Scaling,
            other => Self::Unknown(other.to_string()),
        }
    }
}

macro_rules! string_conversions {
    ($ty:ident, $display:ident) => {
        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self::from(value.as_str())
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.$display().to_string()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.$display())
            }
        }
    };
}

string_conversions!(TrainingJobType, as_str);
string_conversions!(ServingJobType, alias);
string_conversions!(NodeType, as_str);
string_conversions!(TrainingJobStatus, as_str);

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("tfjob", TrainingJobType::TfJob)]
    #[test_case("mpijob", TrainingJobType::MpiJob)]
    #[test_case("pytorchjob", TrainingJobType::PyTorchJob)]
    #[test_case("horovodjob", TrainingJobType::HorovodJob)]
    #[test_case("volcanojob", TrainingJobType::VolcanoJob)]
    #[test_case("sparkjob", TrainingJobType::SparkJob)]
    #[test_case("etjob", TrainingJobType::EtJob)]
    #[test_case("", TrainingJobType::All)]
    fn test_training_job_type_from_str(raw: &str, expected: TrainingJobType) {
        assert_eq!(TrainingJobType::from(raw), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[test]
    fn test_unknown_training_job_type_keeps_raw_text() {
        let kind = TrainingJobType::from("rayjob");
        assert_eq!(kind, TrainingJobType::Unknown("rayjob".to_string()));
        assert_eq!(kind.to_string(), "rayjob");
        assert!(!kind.is_concrete());
    }

    #[test_case("tf", ServingJobType::Tensorflow ; "tf shorthand")]
    #[test_case("Tensorflow", ServingJobType::Tensorflow ; "tf alias")]
    #[test_case("tensorflow", ServingJobType::Tensorflow ; "tf subcommand")]
    #[test_case("trt", ServingJobType::Tensorrt ; "trt shorthand")]
    #[test_case("kf", ServingJobType::KfServing ; "kf shorthand")]
    #[test_case("KFServing", ServingJobType::KfServing ; "kf alias")]
    #[test_case("custom", ServingJobType::Custom ; "custom shorthand")]
    #[test_case("", ServingJobType::All ; "empty")]
    fn test_serving_job_type_from_str(raw: &str, expected: ServingJobType) {
        assert_eq!(ServingJobType::from(raw), expected);
    }

    #[test_case("n", NodeType::Normal ; "normal shorthand")]
    #[test_case("Normal", NodeType::Normal ; "normal name")]
    #[test_case("s", NodeType::GpuShare ; "share shorthand")]
    #[test_case("GPUShare", NodeType::GpuShare ; "share name")]
    #[test_case("e", NodeType::GpuExclusive ; "exclusive shorthand")]
    #[test_case("GPUExclusive", NodeType::GpuExclusive ; "exclusive name")]
    #[test_case("t", NodeType::GpuTopology ; "topology shorthand")]
    #[test_case("topology", NodeType::GpuTopology ; "topology alias")]
    fn test_node_type_from_str(raw: &str, expected: NodeType) {
        assert_eq!(NodeType::from(raw), expected);
    }

    #[test]
    fn test_unknown_node_type() {
        assert_eq!(
            NodeType::from("GPUVirtual"),
            NodeType::Unknown("GPUVirtual".to_string())
        );
    }

    #[test]
    fn test_status_unknown_keeps_raw() {
        assert_eq!(TrainingJobStatus::from("RUNNING"), TrainingJobStatus::Running);
        assert_eq!(
            TrainingJobStatus::from("UNKNOWN"),
            TrainingJobStatus::Unknown("UNKNOWN".to_string())
        );
        assert!(TrainingJobStatus::Failed.is_terminal());
        assert!(!TrainingJobStatus::Scaling.is_terminal());
    }

    #[test]
    fn test_serde_uses_tool_strings() {
        let json = serde_json::to_string(&ServingJobType::KfServing).unwrap();
        assert_eq!(json, "\"KFServing\"");

        let kind: TrainingJobType = serde_json::from_str("\"pytorchjob\"").unwrap();
        assert_eq!(kind, TrainingJobType::PyTorchJob);

        let node: NodeType = serde_json::from_str("\"Something\"").unwrap();
        assert_eq!(serde_json::to_string(&node).unwrap(), "\"Something\"");
    }
}
