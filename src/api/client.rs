//! Authenticated JSON POST helper for the approval API.

use crate::api::transport::{HttpTransport, OutboundRequest};
use crate::config::environment::{vars, Environment};
use crate::error::ApprovalError;
use reqwest::Url;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Creates an approval request.
pub const APPROVAL_PATH: &str = "/v1/workflows/approval";
/// Updates the status of an approval request.
pub const APPROVAL_STATUS_PATH: &str = "/v1/workflows/approval/status";

/// A failed API call: the error plus whatever response body was received.
#[derive(Debug)]
pub struct ApiFailure {
    pub error: ApprovalError,
    /// Raw response body; empty when the request never got a response.
    pub response: String,
}

impl From<ApprovalError> for ApiFailure {
    fn from(error: ApprovalError) -> Self {
        Self {
            error,
            response: String::new(),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

/// Sends single authenticated JSON POSTs to the approval API.
///
/// The base URL and token are resolved from the environment on every call,
/// so a missing `URL` or `API_TOKEN` fails before anything is sent.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    debug: bool,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, debug: bool) -> Self {
        Self { transport, debug }
    }

    /// POST `body` to `path` under the configured base URL.
    /// Returns the response body on HTTP 200.
    pub async fn post<B>(&self, env: &Environment, path: &str, body: &B) -> Result<String, ApiFailure>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(path, "Posting to approval API");

        let base_url = env.require(vars::URL)?;
        let token = env.require(vars::API_TOKEN)?;
        let url = join_url(base_url, path)?;

        let body = serde_json::to_vec(body).map_err(|source| ApprovalError::Serialize {
            what: "request body",
            source,
        })?;
        if self.debug {
            tracing::debug!(payload = %String::from_utf8_lossy(&body), "Request body");
        }

        let request = OutboundRequest {
            url,
            bearer_token: token.to_string(),
            body,
        };
        let response = self.transport.post(&request).await?;

        if response.status != 200 {
            return Err(ApiFailure {
                error: ApprovalError::HttpStatus {
                    method: "POST",
                    url: request.url,
                    status: response.status,
                    reason: response.reason,
                },
                response: response.body,
            });
        }

        tracing::debug!(response = %response.body, "Approval API responded");
        Ok(response.body)
    }
}

/// Append `path` to `base`, keeping any path prefix already on the base.
pub fn join_url(base: &str, path: &str) -> Result<String, ApprovalError> {
    let invalid = |reason: String| ApprovalError::InvalidUrl {
        url: base.to_string(),
        reason,
    };

    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be used as a base URL".to_string()))?
        .pop_if_empty()
        .extend(path.split('/').filter(|segment| !segment.is_empty()));
    Ok(url.to_string())
}
