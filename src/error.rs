//! Error taxonomy for the manual approval handlers.
//!
//! Every failure is terminal for the invocation. The variants fall into four
//! groups: configuration (missing or malformed environment input), transport
//! (network failure or non-200 response), protocol (an approval status we do
//! not know how to map), and local I/O (status/output artifacts).

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ApprovalError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApprovalError {
    // ── Configuration ──
    #[error("{0} environment variable missing")]
    MissingEnv(&'static str),

    #[error("invalid boolean value {value:?} for {name}")]
    InvalidBool { name: &'static str, value: String },

    #[error("invalid PAYLOAD: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unknown arguments: [{}]", .0.join(" "))]
    UnknownArguments(Vec<String>),

    #[error("unsupported handler type: {0}")]
    UnsupportedHandler(String),

    // ── Transport ──
    #[error("failed to initialize HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to send request: {method} {url}: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    #[error("failed to send event: \n{method} {url}\nHTTP/{status} {reason}\n")]
    HttpStatus {
        method: &'static str,
        url: String,
        status: u16,
        reason: String,
    },

    #[error("invalid API response: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    // ── Protocol ──
    #[error("Unexpected approval status '{0}'")]
    UnexpectedStatus(String),

    // ── Local I/O ──
    #[error("failed to write to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("interrupted")]
    Interrupted,
}
