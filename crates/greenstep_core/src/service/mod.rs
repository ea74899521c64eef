//! Catalog use-case services.
//!
//! # Responsibility
//! - Wrap repository reads with the simulated transport (latency, failure).
//! - Keep view layers decoupled from fixture and URL details.

pub mod catalog_service;
pub mod qr;
