//! Task repository facade.
//!
//! # Responsibility
//! - Stamp mutations with the injected clock before they reach storage.
//! - Run the fetch/merge/persist synchronization pass.
//!
//! # Invariants
//! - Blank titles are rejected here, before storage is touched.
//! - A remote fetch failure aborts sync before any store access.

use crate::clock::Clock;
use crate::model::task::Task;
use crate::remote::source::{NetworkError, RemoteSource};
use crate::store::task_store::{StorageError, TaskStore};
use crate::sync::merge::merge_snapshots;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository-level error for task commands and synchronization.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Network(NetworkError),
    Validation(TaskValidationError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Network(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Network(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<NetworkError> for RepoError {
    fn from(value: NetworkError) -> Self {
        Self::Network(value)
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Command rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Unified task API for presentation code.
///
/// Wraps a local store, a remote source and the merge engine. All time
/// stamps flow through the injected clock.
pub struct TaskRepository<S: TaskStore, R: RemoteSource> {
    store: S,
    remote: R,
    clock: Arc<dyn Clock>,
}

impl<S: TaskStore, R: RemoteSource> TaskRepository<S, R> {
    pub fn new(store: S, remote: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            remote,
            clock,
        }
    }

    /// Delegates to the store's observation stream.
    pub fn observe_tasks(&self) -> watch::Receiver<Vec<Task>> {
        self.store.observe_all()
    }

    /// Validates, stamps `updated_at` to now and upserts a new task.
    pub async fn insert_task(&self, task: &Task) -> RepoResult<()> {
        self.store.upsert(&self.stamped(task)?).await?;
        Ok(())
    }

    /// Validates, stamps `updated_at` to now and upserts an existing task.
    pub async fn update_task(&self, task: &Task) -> RepoResult<()> {
        self.store.upsert(&self.stamped(task)?).await?;
        Ok(())
    }

    /// Removes a task. No-op when already absent.
    pub async fn delete(&self, task: &Task) -> RepoResult<()> {
        self.store.delete(task).await?;
        Ok(())
    }

    /// Removes a task by id. No-op when already absent.
    pub async fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.store.delete_by_id(id).await?;
        Ok(())
    }

    /// One-shot ordered read of the current collection.
    pub async fn get_all_snapshot(&self) -> RepoResult<Vec<Task>> {
        Ok(self.store.get_all_snapshot().await?)
    }

    /// Fetches the remote snapshot, merges it against local state and
    /// persists the result as one batch.
    ///
    /// A fetch failure returns before any store access, so local data is
    /// untouched by a failed attempt. The read-merge-write sequence is not
    /// one store transaction: a local write landing between the snapshot
    /// read and the batch upsert can be overwritten by the merge output.
    pub async fn sync_with_network(&self) -> RepoResult<()> {
        let started_at = Instant::now();
        info!("event=sync module=repo status=start");

        let remote = match self.remote.fetch_tasks().await {
            Ok(tasks) => tasks,
            Err(err) => {
                error!(
                    "event=sync module=repo status=error stage=fetch duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        let local = self.store.get_all_snapshot().await?;
        let batch = merge_snapshots(&remote, &local, self.clock.now_epoch_ms());
        self.store.upsert_many(&batch).await?;

        info!(
            "event=sync module=repo status=ok remote_count={} local_count={} duration_ms={}",
            remote.len(),
            local.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn stamped(&self, task: &Task) -> Result<Task, TaskValidationError> {
        if task.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(Task {
            updated_at: self.clock.now_epoch_ms(),
            ..task.clone()
        })
    }
}
