//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod database;
pub mod hub;

pub use database::{DatabaseConnector, DatabaseSession, SqlRow, SqlValue};
pub use hub::{HubResponse, HubTransport, TransportFailure};

/// Error type returned by adapters across a port boundary.
///
/// Services decide how to classify it; adapters only describe what happened.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
