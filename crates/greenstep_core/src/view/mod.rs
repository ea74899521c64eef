//! Catalog and detail views.
//!
//! # Responsibility
//! - Hold per-instance UI state as explicit state machines.
//! - Derive presentations without a rendering environment.

pub mod catalog_view;
pub mod detail_view;
