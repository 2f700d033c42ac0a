//! Decoding the tool's `-o json` output.
//!
//! Decoding is all-or-nothing: one malformed element fails the whole
//! response with [`ErrorKind::MalformedResponse`](crate::ErrorKind).
//! Unknown keys are ignored and unknown tag values become `Unknown`
//! variants.

use crate::entity::{Node, NodeInfo, NodeSet, ServingJobInfo, TrainingJobInfo, UnknownNode};
use crate::error::{ArenaError, Result};
use crate::types::NodeType;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes one training job (an object, or an array holding exactly one).
///
/// # Errors
///
/// Returns `MalformedResponse` if the output is not a single valid job.
pub fn decode_training_job(output: &str) -> Result<TrainingJobInfo> {
    decode_one("training job", output)
}

/// Decodes a training job listing; `null` is an empty listing.
///
/// # Errors
///
/// Returns `MalformedResponse` if any element is invalid.
pub fn decode_training_jobs(output: &str) -> Result<Vec<TrainingJobInfo>> {
    decode_many("training job", output)
}

/// Decodes one serving job (an object, or an array holding exactly one).
///
/// # Errors
///
/// Returns `MalformedResponse` if the output is not a single valid job.
pub fn decode_serving_job(output: &str) -> Result<ServingJobInfo> {
    decode_one("serving job", output)
}

/// Decodes a serving job listing; `null` is an empty listing.
///
/// # Errors
///
/// Returns `MalformedResponse` if any element is invalid.
pub fn decode_serving_jobs(output: &str) -> Result<Vec<ServingJobInfo>> {
    decode_many("serving job", output)
}

/// Decodes `top node -d -o json` output.
///
/// The output is an object of arrays keyed by node group; every element is
/// dispatched on its own `type` tag, so the group keys are not trusted.
///
/// # Errors
///
/// Returns `MalformedResponse` if the shape is wrong or any node is invalid.
pub fn decode_nodes(output: &str) -> Result<NodeSet> {
    let groups = match parse_json(output)? {
        Value::Null => return Ok(NodeSet::default()),
        Value::Object(groups) => groups,
        other => {
            return Err(ArenaError::malformed_response(format!(
                "expected an object of node groups, got {}",
                kind_of(&other)
            )));
        }
    };

    let mut set = NodeSet::default();
    for (group, nodes) in groups {
        match nodes {
            Value::Null => {}
            Value::Array(nodes) => {
                for node in nodes {
                    set.push(decode_node(node)?);
                }
            }
            other => {
                return Err(ArenaError::malformed_response(format!(
                    "node group {group} is {}, expected an array",
                    kind_of(&other)
                )));
            }
        }
    }
    Ok(set)
}

/// Decodes one node record, dispatching on its `type` tag.
///
/// # Errors
///
/// Returns `MalformedResponse` if required fields are missing.
pub fn decode_node(value: Value) -> Result<Node> {
    let info: NodeInfo = from_value("node", value.clone())?;
    let node = match info.node_type {
        NodeType::Normal => Node::Normal(from_value("normal node", value)?),
        NodeType::GpuShare => Node::GpuShare(from_value("GPUShare node", value)?),
        NodeType::GpuExclusive => Node::GpuExclusive(from_value("GPUExclusive node", value)?),
        NodeType::GpuTopology => Node::GpuTopology(from_value("GPUTopology node", value)?),
        NodeType::All | NodeType::Unknown(_) => Node::Unknown(UnknownNode { info, raw: value }),
    };
    Ok(node)
}

fn decode_one<T: DeserializeOwned>(what: &str, output: &str) -> Result<T> {
    match parse_json(output)? {
        Value::Array(mut items) if items.len() == 1 => from_value(what, items.remove(0)),
        Value::Array(items) => Err(ArenaError::malformed_response(format!(
            "expected one {what}, got {}",
            items.len()
        ))),
        value => from_value(what, value),
    }
}

fn decode_many<T: DeserializeOwned>(what: &str, output: &str) -> Result<Vec<T>> {
    match parse_json(output)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| from_value(what, item))
            .collect(),
        value @ Value::Object(_) => Ok(vec![from_value(what, value)?]),
        other => Err(ArenaError::malformed_response(format!(
            "expected a list of {what}s, got {}",
            kind_of(&other)
        ))),
    }
}

fn parse_json(output: &str) -> Result<Value> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Err(ArenaError::malformed_response("empty output"));
    }
    serde_json::from_str(trimmed)
        .map_err(|err| ArenaError::malformed_response(format!("invalid JSON: {err}")))
}

fn from_value<T: DeserializeOwned>(what: &str, value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|err| ArenaError::malformed_response(format!("invalid {what}: {err}")))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
