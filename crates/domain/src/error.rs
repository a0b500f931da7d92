//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`BridgeError`] via `#[from]`.

use crate::discovery::DiscoveryError;

/// Top-level error for everything that can go wrong outside of a hub command.
///
/// Hub command failures are *not* errors: they are reported as a
/// [`CommandResult`](crate::command::CommandResult) so the caller can surface
/// them to the operator.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested door (or other item) does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Door discovery against the database failed.
    #[error("discovery error ({}): {}; {}", .0.kind(), .0.detail(), .0.guidance())]
    Discovery(#[from] DiscoveryError),

    /// The setup workflow could not produce any door.
    #[error("setup error: {0}")]
    Setup(#[from] SetupError),
}

/// Invariant violations detected while building domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The hub host is empty.
    #[error("host must not be empty")]
    EmptyHost,

    /// The hub host contains whitespace or URL delimiters.
    #[error("invalid host {0:?}")]
    InvalidHost(String),

    /// The port is outside `1..=65535`.
    #[error("port must be between 1 and 65535")]
    InvalidPort,

    /// The door identifier is empty.
    #[error("door id must not be empty")]
    EmptyDoorId,

    /// The door display name is empty.
    #[error("door name must not be empty")]
    EmptyDoorName,

    /// A required database connection field is empty.
    #[error("database field `{0}` must not be empty")]
    EmptyDatabaseField(&'static str),

    /// The action key does not match any of the four door actions.
    #[error("unknown door action {0:?}")]
    UnknownAction(String),
}

/// Returned when a lookup by identifier finds nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Setup-level failures decided by the setup workflow (never by the reconciler).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// Discovery succeeded but the door table is empty.
    #[error("no doors were found in the database")]
    NoDoorsDiscovered,

    /// The operator's selection matched none of the discovered doors.
    #[error("no doors were selected for import")]
    NoDoorsSelected,
}
