//! Domain model for the task board.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, sync and presentation.
//!
//! # Invariants
//! - Every domain object is identified by a stable string `TaskId`.
//! - Deletion is hard delete by id; there are no tombstones.

pub mod task;
