//! The three lifecycle handlers of a manual approval job.
//!
//! - `init`: open an approval request and record PENDING_APPROVAL.
//! - `callback`: forward the approver's decision and record APPROVED/REJECTED
//!   plus the `comments` and `approvalInputValues` outputs.
//! - `cancel`: tell the API the approval was aborted or timed out.
//!
//! Each invocation runs exactly one handler, makes at most one API call, and
//! funnels every failure into a single returned error.

mod callback;
mod cancel;
mod init;
#[cfg(test)]
mod testing;

pub use callback::format_parameter_line;
pub use init::approval_request_from_env;

use crate::api::{ApiClient, ApiFailure, HttpTransport};
use crate::approval::types::JobStatus;
use crate::artifacts::ArtifactWriter;
use crate::config::{Environment, Settings};
use crate::console::Console;
use crate::error::{ApprovalError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which lifecycle phase this invocation handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Init,
    Callback,
    Cancel,
}

impl FromStr for HandlerKind {
    type Err = ApprovalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "init" => Ok(HandlerKind::Init),
            "callback" => Ok(HandlerKind::Callback),
            "cancel" => Ok(HandlerKind::Cancel),
            other => Err(ApprovalError::UnsupportedHandler(other.to_string())),
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Init => write!(f, "init"),
            HandlerKind::Callback => write!(f, "callback"),
            HandlerKind::Cancel => write!(f, "cancel"),
        }
    }
}

/// Runs a handler against an environment snapshot.
///
/// Transport and console are injected so the composition root decides
/// whether they are real (`ReqwestTransport`, `StdoutConsole`) or scripted.
pub struct ManualApproval {
    env: Environment,
    api: ApiClient,
    console: Arc<dyn Console>,
    artifacts: ArtifactWriter,
}

impl ManualApproval {
    pub fn new(
        settings: Settings,
        env: Environment,
        transport: Arc<dyn HttpTransport>,
        console: Arc<dyn Console>,
    ) -> Self {
        let artifacts = ArtifactWriter::from_env(&env);
        Self {
            api: ApiClient::new(transport, settings.debug),
            env,
            console,
            artifacts,
        }
    }

    /// Dispatch to the selected handler.
    pub async fn run(&self, handler: HandlerKind) -> Result<()> {
        tracing::debug!(%handler, "Running handler");
        match handler {
            HandlerKind::Init => self.init().await,
            HandlerKind::Callback => self.callback().await,
            HandlerKind::Cancel => self.cancel().await,
        }
    }

    fn emit(&self, line: impl AsRef<str>) {
        self.console.emit(line.as_ref());
    }

    /// Print a failed API call and the raw response that came with it.
    fn report_api_failure(&self, failure: &ApiFailure) {
        self.emit(format!("ERROR: API call failed with error: '{}'", failure.error));
        self.emit(format!("ERROR: API response: '{}'", failure.response));
    }

    /// Record FAILED in the status file and hand back the error to return.
    /// A failure to write the status file replaces the original error.
    fn record_failure(&self, message: String, error: ApprovalError) -> ApprovalError {
        match self.artifacts.write_status(JobStatus::Failed, message) {
            Ok(()) => error,
            Err(write_error) => {
                tracing::warn!(original = %error, "Could not record FAILED status");
                write_error
            }
        }
    }
}
