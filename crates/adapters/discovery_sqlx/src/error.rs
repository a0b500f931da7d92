//! Connector-specific error type wrapping sqlx errors.

use std::time::Duration;

/// Errors raised while opening or using a door database connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// The credentials do not form a valid connection URL.
    #[error("invalid connection url: {0}")]
    Url(#[from] url::ParseError),

    /// The host cannot be written into a connection URL.
    #[error("invalid database host {0:?}")]
    InvalidHost(String),

    /// The `SQLite` file path cannot be resolved.
    #[error("invalid database path {0:?}")]
    InvalidPath(String),

    /// The database did not answer within the connect timeout.
    #[error("connection timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// A connection or query failed.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
