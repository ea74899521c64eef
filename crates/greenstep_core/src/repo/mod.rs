//! Repository layer over the tree catalog.
//!
//! # Responsibility
//! - Define the read-only data access contract used by services.
//! - Own the compiled-in fixture that stands in for a backend database.
//!
//! # Invariants
//! - Repositories never expose their backing collection; reads return copies.
//! - Record validation happens once, when a repository is built.

mod fixture;
pub mod tree_repo;
