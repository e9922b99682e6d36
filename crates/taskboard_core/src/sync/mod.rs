//! Snapshot reconciliation between the remote source and the local store.
//!
//! # Responsibility
//! - Provide the pure merge algorithm applied during synchronization.
//!
//! # Invariants
//! - Merging is additive: local-only records are never deleted.
//! - The local completion flag always survives a remote overwrite.

pub mod merge;
