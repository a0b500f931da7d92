//! reqwest-backed [`HubTransport`].

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use doorbridge_app::ports::{HubResponse, HubTransport, TransportFailure};
use serde::Deserialize;
use url::Url;

use crate::error::HubClientError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client settings for talking to the hub.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HubClientConfig {
    /// Upper bound on one command, connect included.
    pub timeout_secs: u64,
}

impl Default for HubClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HubClientConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Sends hub commands with one shared connection pool.
///
/// Cheap to clone.
#[derive(Debug, Clone)]
pub struct ReqwestHubTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestHubTransport {
    /// Build a transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HubClientError::InvalidTimeout`] for a zero timeout, or
    /// [`HubClientError::Build`] if the TLS backend cannot be initialised.
    pub fn new(config: &HubClientConfig) -> Result<Self, HubClientError> {
        if config.timeout_secs == 0 {
            return Err(HubClientError::InvalidTimeout);
        }
        let timeout = config.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(HubClientError::Build)?;
        Ok(Self { client, timeout })
    }

    async fn fetch(&self, url: Url) -> Result<HubResponse, TransportFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.describe(&err))?;
        let status = response.status().as_u16();
        // Only the status matters; an unreadable body is reported as empty.
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(error = %err, status, "could not read hub response body");
                String::new()
            }
        };
        Ok(HubResponse { status, body })
    }

    fn describe(&self, err: &reqwest::Error) -> TransportFailure {
        if err.is_timeout() {
            return TransportFailure::new(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ));
        }
        let mut detail = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        TransportFailure::new(detail)
    }
}

impl HubTransport for ReqwestHubTransport {
    fn get(&self, url: Url) -> impl Future<Output = Result<HubResponse, TransportFailure>> + Send {
        self.fetch(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_ten_second_timeout() {
        assert_eq!(HubClientConfig::default().timeout(), Duration::from_secs(10));
    }

    #[test]
    fn should_reject_zero_timeout() {
        let result = ReqwestHubTransport::new(&HubClientConfig { timeout_secs: 0 });
        assert!(matches!(result, Err(HubClientError::InvalidTimeout)));
    }

    #[test]
    fn should_build_transport_with_default_config() {
        assert!(ReqwestHubTransport::new(&HubClientConfig::default()).is_ok());
    }
}
