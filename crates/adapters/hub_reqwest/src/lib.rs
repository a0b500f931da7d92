//! # doorbridge-adapter-hub-reqwest
//!
//! Outbound HTTP adapter for the hub.
//!
//! ## Responsibilities
//! - Implement the `HubTransport` port with a shared `reqwest::Client`
//! - Apply the command timeout and disable redirects so the hub's status is
//!   reported exactly
//! - Turn reqwest failures into transport failures with a readable detail
//!
//! ## Dependency rule
//! Depends on `doorbridge-app` (for the port trait). Never depends on other adapters.

mod error;
mod transport;

pub use error::HubClientError;
pub use transport::{HubClientConfig, ReqwestHubTransport};
