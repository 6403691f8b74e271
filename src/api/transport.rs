//! HTTP transport capability.
//!
//! Handlers never talk to `reqwest` directly; they go through
//! [`HttpTransport`] so tests can substitute a scripted transport.

use crate::error::{ApprovalError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Fixed client-side timeout for every approval API call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(150);

/// A fully resolved JSON POST.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: String,
    pub bearer_token: String,
    pub body: Vec<u8>,
}

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Reason phrase for the status code, e.g. "Internal Server Error".
    pub reason: String,
    pub body: String,
}

/// Capability to send one JSON POST.
///
/// Implementations report network-level failures (DNS, refused connection,
/// timeout) as errors; any HTTP status, including failures, is a response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, request: &OutboundRequest) -> Result<RawResponse>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApprovalError::HttpClient)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: &OutboundRequest) -> Result<RawResponse> {
        let transport_error = |e: reqwest::Error| ApprovalError::Transport {
            method: "POST",
            url: request.url.clone(),
            message: e.to_string(),
        };

        let response = self
            .client
            .post(&request.url)
            .header(AUTHORIZATION, format!("Bearer {}", request.bearer_token))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(request.body.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
