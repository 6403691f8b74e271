//! End-to-end test: handlers over the real reqwest transport against a mock API.
//!
//! Each test starts a wiremock server, points URL at it, and runs one
//! handler with a recording console and temp status/outputs locations, then
//! checks what the API received, what the job log shows, and what was
//! written to disk.

use manual_approval::api::ReqwestTransport;
use manual_approval::config::environment::vars;
use manual_approval::config::{Environment, Settings};
use manual_approval::console::RecordingConsole;
use manual_approval::{HandlerKind, ManualApproval};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Job {
    runner: ManualApproval,
    console: Arc<RecordingConsole>,
    status_file: PathBuf,
    outputs_dir: PathBuf,
    _tmp: TempDir,
}

impl Job {
    fn status(&self) -> Value {
        let raw = std::fs::read_to_string(&self.status_file).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

fn job(server: &MockServer, extra: &[(&str, &str)]) -> Job {
    let tmp = TempDir::new().unwrap();
    let status_file = tmp.path().join("status");
    let outputs_dir = tmp.path().join("outputs");
    std::fs::create_dir_all(&outputs_dir).unwrap();

    let mut pairs = vec![
        (vars::URL.to_string(), server.uri()),
        (vars::API_TOKEN.to_string(), "e2e-token".to_string()),
        (vars::STATUS_FILE.to_string(), status_file.display().to_string()),
        (vars::OUTPUTS_DIR.to_string(), outputs_dir.display().to_string()),
    ];
    pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    let console = Arc::new(RecordingConsole::new());
    let runner = ManualApproval::new(
        Settings::default(),
        Environment::from_pairs(pairs),
        Arc::new(ReqwestTransport::new().unwrap()),
        console.clone(),
    );

    Job {
        runner,
        console,
        status_file,
        outputs_dir,
        _tmp: tmp,
    }
}

#[tokio::test]
async fn test_e2e_init_opens_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/workflows/approval"))
        .and(header("authorization", "Bearer e2e-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "disallowLaunchedByUser": true,
            "notifyEligibleUsers": false,
            "approvers": ["alice", "release-team"],
            "instructions": "Check the **dashboard**",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"approvers":[{"userName":"alice"},{"userName":"bob"}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let job = job(
        &server,
        &[
            (vars::APPROVERS, "alice,release-team"),
            (vars::DISALLOW_LAUNCHED_BY_USER, "T"),
            (vars::INSTRUCTIONS, "Check the **dashboard**"),
        ],
    );

    job.runner.run(HandlerKind::Init).await.unwrap();

    assert_eq!(
        job.console.lines(),
        vec![
            "Waiting for approval from one of the following: alice,bob".to_string(),
            "Instructions:\n<p>Check the <strong>dashboard</strong></p>\n".to_string(),
        ]
    );
    assert_eq!(
        job.status(),
        json!({"status": "PENDING_APPROVAL", "message": "Waiting for approval from approvers"})
    );
}

#[tokio::test]
async fn test_e2e_init_server_error_records_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/workflows/approval"))
        .respond_with(ResponseTemplate::new(500).set_body_string("approver not found"))
        .expect(1)
        .mount(&server)
        .await;

    let job = job(&server, &[]);

    let err = job.runner.run(HandlerKind::Init).await.unwrap_err();

    assert!(err.to_string().contains("HTTP/500 Internal Server Error"));
    let lines = job.console.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "ERROR: API response: 'approver not found'");

    let status = job.status();
    assert_eq!(status["status"], "FAILED");
    assert!(status["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to initialize workflow manual approval request: 'failed to send event"));
}

#[tokio::test]
async fn test_e2e_callback_rejected_with_inputs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/workflows/approval/status"))
        .and(header("authorization", "Bearer e2e-token"))
        .and(body_json(json!({
            "status": "UPDATE_MANUAL_APPROVAL_STATUS_REJECTED",
            "comments": "not today",
            "respondedOn": "2026-10-18T09:30:00Z",
            "userName": "alice",
            "userId": "u-1",
            "inputs": [
                {"name": "replicas", "value": "3", "is_default": false},
                {"name": "dryRun", "value": "true", "is_default": true},
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let payload = json!({
        "status": "UPDATE_MANUAL_APPROVAL_STATUS_REJECTED",
        "comments": "not today",
        "respondedOn": "2026-10-18T09:30:00Z",
        "userName": "alice",
        "userId": "u-1",
        "inputs": [
            {"name": "replicas", "value": 3, "is_default": false},
            {"name": "dryRun", "value": true, "is_default": true},
        ],
    })
    .to_string();
    let job = job(&server, &[(vars::PAYLOAD, &payload)]);

    job.runner.run(HandlerKind::Callback).await.unwrap();

    assert_eq!(
        job.console.lines(),
        vec![
            "Rejected by alice on 2026-10-18T09:30:00Z with comments:\nnot today",
            "",
            "Input Parameters:",
            "------------------",
            " replicas: 3 ",
            " dryRun: true (default) ",
        ]
    );
    assert_eq!(
        job.status(),
        json!({"status": "REJECTED", "message": "Successfully changed workflow manual approval status"})
    );

    let comments = std::fs::read_to_string(job.outputs_dir.join("comments")).unwrap();
    assert_eq!(comments, "not today");
    let values: Value = serde_json::from_str(
        &std::fs::read_to_string(job.outputs_dir.join("approvalInputValues")).unwrap(),
    )
    .unwrap();
    assert_eq!(values, json!({"replicas": 3, "dryRun": true}));
}

#[tokio::test]
async fn test_e2e_cancel_timed_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/workflows/approval/status"))
        .and(body_json(json!({"status": "UPDATE_MANUAL_APPROVAL_STATUS_TIMED_OUT"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let job = job(&server, &[(vars::CANCELLATION_REASON, "TIMED_OUT")]);

    job.runner.run(HandlerKind::Cancel).await.unwrap();

    assert_eq!(
        job.console.lines(),
        vec![
            "Workflow timed out",
            "Workflow approval response was not received within allotted time.",
        ]
    );
    assert!(!job.status_file.exists());
}
