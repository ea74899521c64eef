//! Tree catalog domain model.
//!
//! # Responsibility
//! - Define the data structures shared by store, service and views.
//!
//! # Invariants
//! - Every tree is identified by a stable `TreeId`.
//! - Records are read-only fixtures; nothing is created or deleted at runtime.

pub mod tree;
