//! Catalog search entry points.
//!
//! # Responsibility
//! - Client-side substring filtering over loaded tree records.
//! - Result count labels shown next to the query.

pub mod filter;
