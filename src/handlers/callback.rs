//! `callback` — forward the approver's decision and publish its outputs.

use super::ManualApproval;
use crate::api::APPROVAL_STATUS_PATH;
use crate::approval::coercion::{capture_input_values, coerce_inputs, to_transport_string};
use crate::approval::types::{CallbackPayload, InputValue};
use crate::artifacts::{COMMENTS_OUTPUT, INPUT_VALUES_OUTPUT};
use crate::config::environment::vars;
use crate::error::{ApprovalError, Result};
use serde_json::{Map, Value};

const SUCCESS_MESSAGE: &str = "Successfully changed workflow manual approval status";
const DEFAULT_SUFFIX: &str = " (default)";

/// One job-log line for an input parameter.
///
/// Newlines become `<br/>` so the log renders as HTML; default values are
/// marked with a suffix.
pub fn format_parameter_line(input: &InputValue) -> String {
    let mut value = to_transport_string(&input.value).replace('\n', "<br/>");
    if input.is_default {
        value.push_str(DEFAULT_SUFFIX);
    }
    format!(" {}: {} ", input.name, value)
}

impl ManualApproval {
    pub(super) async fn callback(&self) -> Result<()> {
        tracing::debug!("Inside callback handler");

        let raw = self.env.require(vars::PAYLOAD)?;
        tracing::debug!(payload = raw, "Incoming payload");

        let payload: CallbackPayload =
            serde_json::from_str(raw).map_err(ApprovalError::InvalidPayload)?;
        tracing::debug!(
            status = %payload.status,
            comments = %payload.comments,
            responded_on = %payload.responded_on,
            user_name = %payload.user_name,
            "Decoded callback payload"
        );

        // The API takes string values only; outputs keep the original types.
        let captured = capture_input_values(payload.input_values());
        let outbound = CallbackPayload {
            inputs: payload.inputs.as_deref().map(coerce_inputs),
            ..payload.clone()
        };
        if captured.is_empty() {
            tracing::debug!("No input parameters defined");
        }

        if let Err(failure) = self
            .api
            .post(&self.env, APPROVAL_STATUS_PATH, &outbound)
            .await
        {
            self.report_api_failure(&failure);
            let message = format!(
                "Failed to change workflow manual approval status: '{}'",
                failure.error
            );
            return Err(self.record_failure(message, failure.error));
        }

        let Some(decision) = payload.status.decision() else {
            let error = ApprovalError::UnexpectedStatus(payload.status.to_string());
            self.emit(format!("ERROR: {error}"));
            return Err(self.record_failure(error.to_string(), error));
        };

        self.emit(format!(
            "{} by {} on {} with comments:\n{}",
            decision.label(),
            payload.user_name,
            payload.responded_on,
            payload.comments
        ));
        self.emit_input_parameters(payload.input_values());

        self.write_outputs(&captured, &payload.comments)?;
        self.artifacts
            .write_status(decision.job_status(), SUCCESS_MESSAGE)
    }

    fn emit_input_parameters(&self, inputs: &[InputValue]) {
        if inputs.is_empty() {
            return;
        }
        self.emit("");
        self.emit("Input Parameters:");
        self.emit("------------------");
        for input in inputs {
            self.emit(format_parameter_line(input));
        }
    }

    fn write_outputs(&self, captured: &Map<String, Value>, comments: &str) -> Result<()> {
        if !captured.is_empty() {
            let bytes = serde_json::to_vec(captured).map_err(|source| ApprovalError::Serialize {
                what: "approval input values",
                source,
            })?;
            self.artifacts.write_output(INPUT_VALUES_OUTPUT, &bytes)?;
        }
        self.artifacts
            .write_output(COMMENTS_OUTPUT, comments.as_bytes())
    }
}
