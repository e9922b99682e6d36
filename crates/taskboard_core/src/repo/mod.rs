//! Repository facade over store, remote source and merge.
//!
//! # Responsibility
//! - Offer the single API presentation code talks to.
//!
//! # Invariants
//! - Errors from fetch and store propagate unchanged; nothing is swallowed.
//! - A failed sync leaves local state exactly as it was.

pub mod task_repo;
