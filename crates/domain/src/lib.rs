//! # doorbridge-domain
//!
//! Pure domain model for the doorbridge door controller.
//!
//! ## Responsibilities
//! - Define **Hub endpoints** (the remote hub that drives the door actuators)
//! - Define **Doors** (hub-defined identifiers with a display name)
//! - Define **Actions** (the four fixed commands a door accepts) and their
//!   static parameter table
//! - Define **Command results** (classified outcome of one hub request)
//! - Define **Discovery** inputs and failures (database credentials, import
//!   selection, connection vs query errors)
//! - Contain all invariant enforcement and validation
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod action;
pub mod command;
pub mod discovery;
pub mod door;
pub mod hub;
pub mod setup;
