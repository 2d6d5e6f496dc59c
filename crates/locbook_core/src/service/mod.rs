//! Use-case services over the document repository.
//!
//! # Responsibility
//! - Orchestrate repository calls into catalog-level operations.
//! - Keep callers decoupled from storage details.

pub mod demo;
pub mod location_service;
pub mod stats;
