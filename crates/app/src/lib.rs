//! # doorbridge-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HubTransport` — send one GET request to the hub
//!   - `DatabaseConnector` / `DatabaseSession` — open a connection and run a query
//! - Define the **use-cases**:
//!   - `DoorCommandDispatcher` — build, send and classify one door command
//!   - `DoorDiscoveryService` — read the door list (and hub port) from the database
//!   - `reconcile` — filter discovered doors down to the operator's selection
//!   - `DoorService` — registered doors, their actions and last results
//!   - `SetupService` — manual or database-driven registration
//!
//! ## Dependency rule
//! Depends on `doorbridge-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
