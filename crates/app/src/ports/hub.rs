//! Hub port — the single outbound HTTP call the dispatcher needs.

use std::future::Future;

use url::Url;

/// Status and body of a response the hub actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubResponse {
    pub status: u16,
    pub body: String,
}

/// The hub could not be reached at all: connection refused, DNS failure,
/// timeout, or a body that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct TransportFailure {
    pub detail: String,
}

impl TransportFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Sends one `GET` request to the hub.
///
/// Implementations must issue exactly one request per call: no retries,
/// no caching, no custom headers.
pub trait HubTransport: Send + Sync {
    fn get(&self, url: Url) -> impl Future<Output = Result<HubResponse, TransportFailure>> + Send;
}
