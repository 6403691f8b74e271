//! `init` — open a manual approval request.

use super::ManualApproval;
use crate::api::APPROVAL_PATH;
use crate::approval::markdown::render_markdown;
use crate::approval::types::{ApprovalRequest, ApprovalResponse, JobStatus};
use crate::config::environment::{vars, Environment};
use crate::error::{ApprovalError, Result};

const PENDING_MESSAGE: &str = "Waiting for approval from approvers";

/// Build the approval request from the job's environment.
///
/// Both flags default to false; malformed flag text fails the invocation
/// before anything is sent or written.
pub fn approval_request_from_env(env: &Environment) -> Result<ApprovalRequest> {
    let disallow_launched_by_user = env.flag(vars::DISALLOW_LAUNCHED_BY_USER, false)?;
    let notify_eligible_users = env.flag(vars::NOTIFY_ALL_ELIGIBLE_USERS, false)?;

    Ok(ApprovalRequest {
        disallow_launched_by_user,
        notify_eligible_users,
        approvers: env
            .get(vars::APPROVERS)
            .map(|raw| raw.split(',').map(str::to_string).collect()),
        instructions: env.get(vars::INSTRUCTIONS).map(str::to_string),
        approval_inputs: env.get(vars::INPUTS).map(str::to_string),
    })
}

impl ManualApproval {
    pub(super) async fn init(&self) -> Result<()> {
        tracing::debug!("Inside init handler");

        let request = approval_request_from_env(&self.env)?;

        let response = match self.api.post(&self.env, APPROVAL_PATH, &request).await {
            Ok(body) => body,
            Err(failure) => {
                self.report_api_failure(&failure);
                let message = format!(
                    "Failed to initialize workflow manual approval request: '{}'",
                    failure.error
                );
                return Err(self.record_failure(message, failure.error));
            }
        };

        let parsed: ApprovalResponse =
            serde_json::from_str(&response).map_err(ApprovalError::InvalidResponse)?;

        self.emit(format!(
            "Waiting for approval from one of the following: {}",
            parsed.user_names().join(",")
        ));
        if let Some(instructions) = &request.instructions {
            self.emit(format!("Instructions:\n{}", render_markdown(instructions)));
        }

        self.artifacts
            .write_status(JobStatus::PendingApproval, PENDING_MESSAGE)
    }
}
