//! Local store abstractions and the SQLite implementation.
//!
//! # Responsibility
//! - Define the durable keyed storage contract used by the repository facade.
//! - Isolate SQL details from sync/business orchestration.
//!
//! # Invariants
//! - Writes are atomic with respect to concurrent reads; observers never see
//!   a partially written record or a half-applied batch.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod task_store;
