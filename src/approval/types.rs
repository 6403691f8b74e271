//! Wire and artifact types for the approval lifecycle.
//!
//! Everything here lives for a single invocation: decoded from the
//! environment or an HTTP response, used, and dropped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Body of the `init` request that opens an approval.
/// Optional fields are omitted entirely when their source is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub disallow_launched_by_user: bool,
    pub notify_eligible_users: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approvers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Serialized parameter definitions, passed through opaquely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_inputs: Option<String>,
}

/// Response to the `init` request.
///
/// The API sends `null` for an empty approver list or an unset name; both
/// decode as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApprovalResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub approvers: Vec<Approver>,
}

impl ApprovalResponse {
    pub fn user_names(&self) -> Vec<&str> {
        self.approvers.iter().map(|a| a.user_name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approver {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Approval status as exchanged with the approval API.
///
/// Unknown values are kept verbatim so they can be forwarded and reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApprovalStatus {
    Approved,
    Rejected,
    Aborted,
    TimedOut,
    Other(String),
}

impl ApprovalStatus {
    pub const APPROVED: &'static str = "UPDATE_MANUAL_APPROVAL_STATUS_APPROVED";
    pub const REJECTED: &'static str = "UPDATE_MANUAL_APPROVAL_STATUS_REJECTED";
    pub const ABORTED: &'static str = "UPDATE_MANUAL_APPROVAL_STATUS_ABORTED";
    pub const TIMED_OUT: &'static str = "UPDATE_MANUAL_APPROVAL_STATUS_TIMED_OUT";

    pub fn as_str(&self) -> &str {
        match self {
            ApprovalStatus::Approved => Self::APPROVED,
            ApprovalStatus::Rejected => Self::REJECTED,
            ApprovalStatus::Aborted => Self::ABORTED,
            ApprovalStatus::TimedOut => Self::TIMED_OUT,
            ApprovalStatus::Other(s) => s.as_str(),
        }
    }

    /// The approver's decision this status represents, if it is one.
    pub fn decision(&self) -> Option<Decision> {
        match self {
            ApprovalStatus::Approved => Some(Decision::Approved),
            ApprovalStatus::Rejected => Some(Decision::Rejected),
            _ => None,
        }
    }
}

/// A final approver decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn job_status(&self) -> JobStatus {
        match self {
            Decision::Approved => JobStatus::Approved,
            Decision::Rejected => JobStatus::Rejected,
        }
    }

    /// Past-tense label used in the job log ("Approved by ...").
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approved => "Approved",
            Decision::Rejected => "Rejected",
        }
    }
}

impl From<String> for ApprovalStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::APPROVED => ApprovalStatus::Approved,
            Self::REJECTED => ApprovalStatus::Rejected,
            Self::ABORTED => ApprovalStatus::Aborted,
            Self::TIMED_OUT => ApprovalStatus::TimedOut,
            _ => ApprovalStatus::Other(s),
        }
    }
}

impl From<ApprovalStatus> for String {
    fn from(status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision payload delivered to the `callback` handler.
///
/// Fields we do not interpret (e.g. `userId`) are carried in `extra` and
/// forwarded to the approval API untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayload {
    pub status: ApprovalStatus,
    pub comments: String,
    pub responded_on: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<InputValue>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CallbackPayload {
    /// Input values supplied with the decision, empty when none were sent.
    pub fn input_values(&self) -> &[InputValue] {
        self.inputs.as_deref().unwrap_or_default()
    }
}

/// A single named approval parameter as supplied by the approver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputValue {
    pub name: String,
    #[serde(default)]
    pub value: ParamValue,
    #[serde(default)]
    pub is_default: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed value of an approval parameter.
///
/// `Number` keeps the JSON number as written so integers stay integers.
/// Anything that is not a scalar lands in `Unsupported`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Unsupported(Value),
}

impl Default for ParamValue {
    fn default() -> Self {
        ParamValue::Unsupported(Value::Null)
    }
}

impl ParamValue {
    /// The value as plain JSON, preserving its original type.
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Number(n) => Value::Number(n.clone()),
            ParamValue::String(s) => Value::String(s.clone()),
            ParamValue::Unsupported(v) => v.clone(),
        }
    }
}

/// Outcome reported to the orchestrator through the status file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    PendingApproval,
    Approved,
    Rejected,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::PendingApproval => write!(f, "PENDING_APPROVAL"),
            JobStatus::Approved => write!(f, "APPROVED"),
            JobStatus::Rejected => write!(f, "REJECTED"),
            JobStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Why the orchestrator is tearing down a pending approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationReason {
    /// The workflow was aborted by a user.
    Cancelled,
    /// The approval window elapsed (any reason other than `CANCELLED`).
    TimedOut,
}

impl CancellationReason {
    pub fn from_env_value(raw: &str) -> Self {
        if raw == "CANCELLED" {
            CancellationReason::Cancelled
        } else {
            CancellationReason::TimedOut
        }
    }

    pub fn status(&self) -> ApprovalStatus {
        match self {
            CancellationReason::Cancelled => ApprovalStatus::Aborted,
            CancellationReason::TimedOut => ApprovalStatus::TimedOut,
        }
    }
}

/// Body of the status update sent by the `cancel` handler.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: ApprovalStatus,
}
