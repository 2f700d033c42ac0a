//! Training facade against a scripted executor.

use arena_exec::{FakeExecutor, ProcessResult};
use arena_sdk::training::{ScaleOutEtJobBuilder, TensorflowJobBuilder, TrainingJobBuilder};
use arena_sdk::{ArenaClient, ClientConfig, ErrorKind, LogsRequest, TrainingJobType};
use std::time::Duration;

fn client(fake: &FakeExecutor) -> ArenaClient<FakeExecutor> {
    ArenaClient::with_executor(ClientConfig::default(), fake.clone()).unwrap()
}

fn args(fake: &FakeExecutor) -> Vec<String> {
    fake.last_args().unwrap()
}

#[tokio::test]
async fn test_submit_tf_test_end_to_end() {
    let fake = FakeExecutor::new();
    let job = TensorflowJobBuilder::new()
        .with_name("tf-test")
        .with_workers(1)
        .with_gpus(1)
        .with_command("python main.py")
        .build()
        .unwrap();

    client(&fake).training().submit(&job).await.unwrap();

    let recorded = fake.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].program, "arena");
    assert_eq!(
        recorded[0].args,
        [
            "submit",
            "tfjob",
            "--namespace=default",
            "--arena-namespace=arena-system",
            "--loglevel=info",
            "--name=tf-test",
            "--workers=1",
            "--gpus=1",
            "python main.py",
        ]
    );
}

#[tokio::test]
async fn test_submit_multi_line_command_and_env() {
    let fake = FakeExecutor::new();
    let script = "python -c 'import os\nprint(os.getcwd())'";
    let job = TensorflowJobBuilder::new()
        .with_name("tf-multiline")
        .with_envs([("BANNER", "line one\r\nline two")])
        .with_command(script)
        .build()
        .unwrap();

    client(&fake).training().submit(&job).await.unwrap();

    assert_eq!(fake.call_count(), 1);
    let args = args(&fake);
    assert!(args.contains(&"--env=BANNER=line one\r\nline two".to_string()));
    assert_eq!(args.last().map(String::as_str), Some(script));
}

#[tokio::test]
async fn test_submit_already_exists() {
    let fake = FakeExecutor::new().with_response(ProcessResult::failed(
        1,
        "Error: the job tf-test is already exist, please delete it first. use 'arena get tf-test' to get more information.",
    ));
    let job = TensorflowJobBuilder::new().with_name("tf-test").build().unwrap();

    let err = client(&fake).training().submit(&job).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TrainingJobExists);
    assert!(err.is_already_exists());
}

#[tokio::test]
async fn test_submit_timeout() {
    let fake = FakeExecutor::new().with_response(ProcessResult::timed_out_after(
        Duration::from_secs(1),
        "arena submit tfjob --name=tf-test",
    ));
    let job = TensorflowJobBuilder::new().with_name("tf-test").build().unwrap();

    let err = client(&fake).training().submit(&job).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(err.message().contains("timeout=1s"));
}

#[tokio::test]
async fn test_get_not_found_is_none() {
    let fake = FakeExecutor::new().with_response(ProcessResult::failed(
        1,
        "Not found training job tf-test in namespace default, please use 'arena submit' to create it.",
    ));

    let job = client(&fake)
        .training()
        .get("tf-test", &TrainingJobType::All)
        .await
        .unwrap();
    assert!(job.is_none());
    assert_eq!(
        args(&fake),
        [
            "get",
            "--namespace=default",
            "--arena-namespace=arena-system",
            "--loglevel=info",
            "tf-test",
            "-o",
            "json",
        ]
    );
}

#[tokio::test]
async fn test_get_not_found_in_other_namespace_is_an_error() {
    let fake = FakeExecutor::new().with_response(ProcessResult::failed(
        1,
        "Not found training job tf-test in namespace default",
    ));

    let err = client(&fake)
        .training()
        .with_namespace("team-a")
        .get("tf-test", &TrainingJobType::TfJob)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GetTrainingJob);
}

#[tokio::test]
async fn test_get_decodes_job() {
    let fake = FakeExecutor::new().with_response(ProcessResult::ok(
        r#"{"name":"tf-test","namespace":"default","status":"SUCCEEDED","trainer":"tfjob","instances":[]}"#,
    ));

    let job = client(&fake)
        .training()
        .get("tf-test", &TrainingJobType::TfJob)
        .await
        .unwrap()
        .unwrap();
    assert!(job.status.is_terminal());
    assert!(args(&fake).contains(&"--type=tfjob".to_string()));
}

#[tokio::test]
async fn test_list_all_namespaces() {
    let fake = FakeExecutor::new().with_response(ProcessResult::ok("null"));

    let jobs = client(&fake)
        .training()
        .list(&TrainingJobType::PyTorchJob, true)
        .await
        .unwrap();
    assert!(jobs.is_empty());
    assert_eq!(
        &args(&fake)[4..],
        ["--type=pytorchjob", "-A", "-o", "json"]
    );
}

#[tokio::test]
async fn test_list_malformed_output() {
    let fake = FakeExecutor::new().with_response(ProcessResult::ok("No training job found"));

    let err = client(&fake)
        .training()
        .list(&TrainingJobType::All, false)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_delete_and_prune_arguments() {
    let fake = FakeExecutor::new();
    let training = client(&fake).training();

    training.delete("tf-test", &TrainingJobType::TfJob).await.unwrap();
    assert_eq!(&args(&fake)[4..], ["tf-test", "--type=tfjob"]);

    training.prune(Duration::from_secs(3600), true).await.unwrap();
    assert_eq!(args(&fake)[0], "prune");
    assert_eq!(&args(&fake)[4..], ["--since=3600s", "-A"]);
}

#[tokio::test]
async fn test_empty_name_is_rejected_before_spawn() {
    let fake = FakeExecutor::new();
    let err = client(&fake)
        .training()
        .delete("", &TrainingJobType::All)
        .await
        .unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn test_scale_out() {
    let fake = FakeExecutor::new();
    let job = ScaleOutEtJobBuilder::new()
        .with_name("elastic")
        .with_count(2)
        .build()
        .unwrap();

    client(&fake).training().scale_out(&job).await.unwrap();
    let args = args(&fake);
    assert_eq!(&args[..2], ["scaleout", "etjob"]);
    assert_eq!(&args[5..], ["--name=elastic", "--count=2"]);
}

#[tokio::test]
async fn test_scale_in_failure_kind() {
    let fake = FakeExecutor::new().with_response(ProcessResult::failed(1, "job is not running"));
    let job = arena_sdk::training::ScaleInEtJobBuilder::new()
        .with_name("elastic")
        .build()
        .unwrap();

    let err = client(&fake).training().scale_in(&job).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ScaleInTrainingJob);
}

#[tokio::test]
async fn test_logs_stream_into_sink() {
    let fake = FakeExecutor::new().with_response(ProcessResult::ok("step 1\nstep 2\n"));
    let mut sink = Vec::new();

    client(&fake)
        .training()
        .logs(
            "tf-test",
            &TrainingJobType::TfJob,
            &LogsRequest::new().tail(2),
            &mut sink,
        )
        .await
        .unwrap();

    assert_eq!(sink, b"step 1\nstep 2\n");
    assert_eq!(&args(&fake)[4..], ["tf-test", "-T=tfjob", "--tail=2"]);
}
