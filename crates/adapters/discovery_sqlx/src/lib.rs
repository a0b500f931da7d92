//! # doorbridge-adapter-discovery-sqlx
//!
//! Door database adapter using [sqlx](https://docs.rs/sqlx) and its `Any` driver.
//!
//! ## Responsibilities
//! - Implement the `DatabaseConnector` / `DatabaseSession` ports defined in
//!   `doorbridge-app::ports::database`
//! - Build a read-only connection URL for `PostgreSQL`, `MySQL` or `SQLite`
//! - Bound the connect phase with a timeout
//! - Decode untyped rows into the port's `SqlRow`
//!
//! ## Dependency rule
//! Depends on `doorbridge-app` (for port traits) and `doorbridge-domain` (for credentials).
//! The `app` and `domain` crates must never reference this adapter.

mod address;
mod connector;
mod error;
mod row;

pub use address::connection_url;
pub use connector::{ConnectorConfig, SqlxConnector, SqlxSession};
pub use error::ConnectorError;
