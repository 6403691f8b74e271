//! `cancel` — withdraw a pending approval when the workflow is aborted or times out.
//!
//! Unlike `init` and `callback`, this handler never writes a status record:
//! the orchestrator already knows why the job is ending.

use super::ManualApproval;
use crate::api::APPROVAL_STATUS_PATH;
use crate::approval::types::{CancellationReason, StatusUpdate};
use crate::config::environment::vars;
use crate::error::Result;

impl ManualApproval {
    pub(super) async fn cancel(&self) -> Result<()> {
        tracing::debug!("Inside cancel handler");

        let raw = self.env.require(vars::CANCELLATION_REASON)?;
        let reason = CancellationReason::from_env_value(raw);

        match reason {
            CancellationReason::Cancelled => {
                self.emit("Workflow aborted by user");
                self.emit("Cancelling the manual approval request");
            }
            CancellationReason::TimedOut => {
                self.emit("Workflow timed out");
                self.emit("Workflow approval response was not received within allotted time.");
            }
        }

        let body = StatusUpdate {
            status: reason.status(),
        };
        if let Err(failure) = self.api.post(&self.env, APPROVAL_STATUS_PATH, &body).await {
            self.report_api_failure(&failure);
            return Err(failure.error);
        }
        Ok(())
    }
}
