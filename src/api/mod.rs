//! Approval API access: the transport capability and the POST helper.

pub mod client;
pub mod transport;

pub use client::{join_url, ApiClient, ApiFailure, APPROVAL_PATH, APPROVAL_STATUS_PATH};
pub use transport::{HttpTransport, OutboundRequest, RawResponse, ReqwestTransport, REQUEST_TIMEOUT};
