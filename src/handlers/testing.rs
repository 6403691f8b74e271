//! Shared fixtures for handler tests: a scripted transport and a harness
//! that wires it to a recording console and a temp artifact directory.

use super::ManualApproval;
use crate::api::{HttpTransport, OutboundRequest, RawResponse};
use crate::config::environment::vars;
use crate::config::{Environment, Settings};
use crate::console::RecordingConsole;
use crate::error::{ApprovalError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Replies to each POST with the next scripted response.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<RawResponse>>>,
    seen: Mutex<Vec<OutboundRequest>>,
}

impl ScriptedTransport {
    pub fn replying(status: u16, reason: &str, body: &str) -> Self {
        let transport = Self::default();
        transport.replies.lock().unwrap().push_back(Ok(RawResponse {
            status,
            reason: reason.to_string(),
            body: body.to_string(),
        }));
        transport
    }

    pub fn failing(message: &str) -> Self {
        let transport = Self::default();
        transport
            .replies
            .lock()
            .unwrap()
            .push_back(Err(ApprovalError::Transport {
                method: "POST",
                url: "scripted".to_string(),
                message: message.to_string(),
            }));
        transport
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// Body of the only request sent, decoded as JSON.
    pub fn single_body(&self) -> Value {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        serde_json::from_slice(&requests[0].body).unwrap()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn post(&self, request: &OutboundRequest) -> Result<RawResponse> {
        self.seen.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }
}

pub struct Harness {
    pub runner: ManualApproval,
    pub console: Arc<RecordingConsole>,
    pub transport: Arc<ScriptedTransport>,
    pub status_file: PathBuf,
    pub outputs_dir: PathBuf,
    _tmp: TempDir,
}

impl Harness {
    /// Harness with URL, API_TOKEN, CLOUDBEES_STATUS and CLOUDBEES_OUTPUTS set,
    /// plus `extra` variables. An empty value in `extra` unsets a variable.
    pub fn new(transport: ScriptedTransport, extra: &[(&str, &str)]) -> Self {
        let tmp = TempDir::new().unwrap();
        let status_file = tmp.path().join("status");
        let outputs_dir = tmp.path().join("outputs");
        std::fs::create_dir_all(&outputs_dir).unwrap();

        let mut pairs = vec![
            (vars::URL.to_string(), "http://test.com".to_string()),
            (vars::API_TOKEN.to_string(), "test".to_string()),
            (vars::STATUS_FILE.to_string(), status_file.display().to_string()),
            (vars::OUTPUTS_DIR.to_string(), outputs_dir.display().to_string()),
        ];
        pairs.retain(|(k, _)| !extra.iter().any(|(name, _)| name == k));
        pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        let console = Arc::new(RecordingConsole::new());
        let transport = Arc::new(transport);
        let runner = ManualApproval::new(
            Settings { debug: true },
            Environment::from_pairs(pairs),
            transport.clone(),
            console.clone(),
        );

        Self {
            runner,
            console,
            transport,
            status_file,
            outputs_dir,
            _tmp: tmp,
        }
    }

    pub fn status(&self) -> Option<String> {
        std::fs::read_to_string(&self.status_file).ok()
    }

    pub fn output(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.outputs_dir.join(name)).ok()
    }

    pub fn lines(&self) -> Vec<String> {
        self.console.lines()
    }
}
