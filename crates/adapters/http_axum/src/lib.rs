//! # doorbridge-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small JSON API over the registered doors
//!   (`/api/doors`, `/api/doors/{id}/actions/{action}`, …)
//! - Serve the discovery workflow (`/api/discovery`, `/api/discovery/selection`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `doorbridge-app` (for port traits and services) and `doorbridge-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
