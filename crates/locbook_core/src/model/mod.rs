//! Domain model for the location catalog.
//!
//! # Responsibility
//! - Define the persisted `Location` record.
//! - Define caller-owned query state (filter, sort, page).
//!
//! # Invariants
//! - A persisted `Location` always carries a non-empty id.
//! - Query state is owned by the caller, never stored process-wide.

pub mod location;
pub mod query;
