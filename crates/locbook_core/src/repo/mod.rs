//! Storage contracts and their SQLite implementation.
//!
//! # Responsibility
//! - Expose a collection-oriented document store to the service layer.
//! - Keep SQL inside the persistence boundary.

pub mod document_repo;
