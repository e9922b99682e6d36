//! Core domain logic for Taskboard.
//! This crate is the single source of truth for task persistence and
//! synchronization invariants.

pub mod board;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repo;
pub mod store;
pub mod sync;

pub use board::{reduce, TaskBoardController, TaskBoardEvent, TaskBoardState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId};
pub use remote::source::{NetworkError, RemoteSource, SimulatedRemoteSource};
pub use repo::task_repo::{RepoError, RepoResult, TaskRepository, TaskValidationError};
pub use store::task_store::{SqliteTaskStore, StorageError, StoreResult, TaskStore};
pub use sync::merge::merge_snapshots;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
