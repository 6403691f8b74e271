//! Environment snapshot for a single handler invocation.
//!
//! The orchestrator hands every input to the job through environment
//! variables. We snapshot them once at startup so handlers never read
//! ambient process state, and tests can build an environment from literals.

use crate::error::{ApprovalError, Result};
use std::collections::HashMap;

/// Names of the environment variables the handlers understand.
pub mod vars {
    pub const URL: &str = "URL";
    pub const API_TOKEN: &str = "API_TOKEN";
    pub const STATUS_FILE: &str = "CLOUDBEES_STATUS";
    pub const OUTPUTS_DIR: &str = "CLOUDBEES_OUTPUTS";
    pub const APPROVERS: &str = "APPROVERS";
    pub const INSTRUCTIONS: &str = "INSTRUCTIONS";
    pub const DISALLOW_LAUNCHED_BY_USER: &str = "DISALLOW_LAUNCHED_BY_USER";
    pub const NOTIFY_ALL_ELIGIBLE_USERS: &str = "NOTIFY_ALL_ELIGIBLE_USERS";
    pub const INPUTS: &str = "INPUTS";
    pub const PAYLOAD: &str = "PAYLOAD";
    pub const CANCELLATION_REASON: &str = "CANCELLATION_REASON";
    pub const DEBUG: &str = "DEBUG";
}

/// Immutable view of the variables visible to this invocation.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars())
    }

    /// Build an environment from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable. Empty values are treated as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Look up a variable that must be present.
    pub fn require(&self, name: &'static str) -> Result<&str> {
        self.get(name).ok_or(ApprovalError::MissingEnv(name))
    }

    /// Read an optional boolean flag, falling back to `default` when unset.
    pub fn flag(&self, name: &'static str, default: bool) -> Result<bool> {
        match self.get(name) {
            None => Ok(default),
            Some(raw) => parse_bool(raw).ok_or_else(|| ApprovalError::InvalidBool {
                name,
                value: raw.to_string(),
            }),
        }
    }
}

/// Parse boolean text the way pipeline configuration tends to spell it.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
