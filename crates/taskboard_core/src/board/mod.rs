//! Presentation-facing state container.
//!
//! # Responsibility
//! - Hold the observable board state and fold commands/store emissions into
//!   it through a pure reducer.
//!
//! # Invariants
//! - State transitions happen only via `reduce`; no shared mutable fields.
//! - `is_syncing` is reset unconditionally after a sync attempt, on success,
//!   failure and cancellation alike.

mod controller;
mod state;

pub use controller::TaskBoardController;
pub use state::{reduce, TaskBoardEvent, TaskBoardState};
