//! Typed views of the tool's JSON output.
//!
//! Entities are produced by [`crate::decode`] and carry no behaviour beyond
//! accessors; their `Display` form is the pretty-printed JSON they
//! re-serialize to.

mod node;
mod serving;
mod training;

pub use node::{
    GpuExclusiveInstance, GpuExclusiveNode, GpuMetric, GpuShareDevice, GpuShareInstance,
    GpuShareNode, GpuTopology, GpuTopologyDevice, GpuTopologyInstance, GpuTopologyNode,
    GpuSummary, Node, NodeInfo, NodeSet, NormalNode, UnknownNode,
};
pub use serving::{Endpoint, ServingInstance, ServingJobInfo};
pub use training::{InstanceGpuMetric, TrainingInstance, TrainingJobInfo};

use serde::{Deserialize, Deserializer};

/// Deserializes JSON `null` as the type's default.
///
/// The tool prints `null` for empty collections and sometimes for empty
/// strings.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Implements `Display` as pretty-printed JSON.
macro_rules! json_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    let json = serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?;
                    f.write_str(&json)
                }
            }
        )+
    };
}

json_display!(
    Node,
    NodeSet,
    TrainingJobInfo,
    TrainingInstance,
    ServingJobInfo,
    ServingInstance,
);
