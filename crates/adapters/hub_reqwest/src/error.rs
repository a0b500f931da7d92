/// Failure while building the hub client.
#[derive(Debug, thiserror::Error)]
pub enum HubClientError {
    #[error("timeout must be at least one second")]
    InvalidTimeout,

    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
}
