//! Decoding recorded tool output and re-serializing it.

use arena_sdk::decode::{decode_nodes, decode_serving_job, decode_training_jobs};
use arena_sdk::entity::Node;
use arena_sdk::{NodeType, ServingJobType, TrainingJobStatus};
use serde_json::Value;

const NODES: &str = include_str!("fixtures/nodes.json");
const TRAINING_JOBS: &str = include_str!("fixtures/training_job.json");
const SERVING_JOB: &str = include_str!("fixtures/serving_job.json");

/// Asserts every field of `expected` appears in `actual` with the same value.
fn assert_contains(expected: &Value, actual: &Value, path: &str) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            for (key, value) in expected {
                assert!(actual.contains_key(key), "missing {path}.{key}");
                assert_contains(value, &actual[key], &format!("{path}.{key}"));
            }
        }
        (Value::Array(expected), Value::Array(actual)) => {
            assert_eq!(expected.len(), actual.len(), "length of {path}");
            for (i, (a, b)) in expected.iter().zip(actual).enumerate() {
                assert_contains(a, b, &format!("{path}[{i}]"));
            }
        }
        (Value::Number(expected), Value::Number(actual)) => {
            assert_eq!(expected.as_f64(), actual.as_f64(), "value of {path}");
        }
        _ => assert_eq!(expected, actual, "value of {path}"),
    }
}

#[test]
fn test_nodes_round_trip() {
    let set = decode_nodes(NODES).unwrap();
    let fixture: Value = serde_json::from_str(NODES).unwrap();
    let reserialized = serde_json::to_value(&set).unwrap();
    assert_contains(&fixture, &reserialized, "$");
}

#[test]
fn test_training_jobs_round_trip() {
    let jobs = decode_training_jobs(TRAINING_JOBS).unwrap();
    let fixture: Value = serde_json::from_str(TRAINING_JOBS).unwrap();
    assert_contains(&fixture, &serde_json::to_value(&jobs).unwrap(), "$");
}

#[test]
fn test_serving_job_round_trip() {
    let job = decode_serving_job(SERVING_JOB).unwrap();
    let fixture: Value = serde_json::from_str(SERVING_JOB).unwrap();
    assert_contains(&fixture, &serde_json::to_value(&job).unwrap(), "$");
}

#[test]
fn test_nodes_fixture_typed_view() {
    let set = decode_nodes(NODES).unwrap();
    assert_eq!(set.len(), 4);
    assert!(set.unknown.is_empty());

    let share = &set.gpu_share[0];
    assert_eq!(share.devices.len(), 2);
    assert_eq!(share.gpus.gpu_metrics[0].status.as_deref(), Some("healthy"));
    assert_eq!((share.total_core, share.allocated_core), (200, 30));
    assert_eq!(share.devices[1].allocated_core, 0);
    assert_eq!(share.instances[0].core_allocation.get("0"), Some(&30));

    let topology = &set.gpu_topology[0];
    assert_eq!(topology.topology.link_matrix[0][1], "NV1");
    assert_eq!(topology.instances[0].visible_gpus, ["0", "1"]);

    let types: Vec<NodeType> = set
        .into_nodes()
        .iter()
        .map(|node| node.node_type().clone())
        .collect();
    assert_eq!(
        types,
        [
            NodeType::Normal,
            NodeType::GpuShare,
            NodeType::GpuExclusive,
            NodeType::GpuTopology,
        ]
    );
}

#[test]
fn test_unknown_node_round_trips_raw() {
    let output = r#"{"gpuVirtualNodes":[{"name":"v-1","type":"GPUVirtual","vgpus":16}]}"#;
    let set = decode_nodes(output).unwrap();
    let nodes = set.clone().into_nodes();
    assert!(matches!(&nodes[0], Node::Unknown(node) if node.info.name == "v-1"));

    let reserialized = serde_json::to_value(&set).unwrap();
    assert_eq!(reserialized["unknownNodes"][0]["vgpus"], 16);
}

#[test]
fn test_fixture_tags() {
    let jobs = decode_training_jobs(TRAINING_JOBS).unwrap();
    assert_eq!(jobs[0].status, TrainingJobStatus::Running);
    assert_eq!(jobs[0].chief().map(|c| c.name.as_str()), Some("tf-test-worker-0"));

    let serving = decode_serving_job(SERVING_JOB).unwrap();
    assert_eq!(serving.serving_type, ServingJobType::Tensorflow);
    assert!(!serving.is_ready());
    assert_eq!(serving.endpoints[1].node_port, 30501);
    assert_eq!(serving.uuid, "5c1e8a2b-3f4d-4e6a-9b7c-0d1e2f3a4b5c");
    assert!((serving.request_cpus - 2.0).abs() < f64::EPSILON);
    assert_eq!(serving.creation_timestamp, 1_718_000_000);
    assert_eq!(serving.instances[1].creation_timestamp, 1_718_000_015);
}
