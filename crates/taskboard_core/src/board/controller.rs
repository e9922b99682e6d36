//! Async command handler driving the board state.

use crate::board::state::{reduce, TaskBoardEvent, TaskBoardState};
use crate::model::task::Task;
use crate::remote::source::RemoteSource;
use crate::repo::task_repo::TaskRepository;
use crate::store::task_store::TaskStore;
use std::sync::Arc;
use tokio::sync::watch;

/// Owns the repository and the observable board state.
///
/// Every command funnels its outcome through the reducer; failures become
/// `error` messages in state rather than bubbling to the UI as panics.
pub struct TaskBoardController<S: TaskStore, R: RemoteSource> {
    repo: Arc<TaskRepository<S, R>>,
    state_tx: watch::Sender<TaskBoardState>,
}

impl<S: TaskStore, R: RemoteSource> TaskBoardController<S, R> {
    pub fn new(repo: Arc<TaskRepository<S, R>>) -> Self {
        let (state_tx, _) = watch::channel(TaskBoardState::default());
        Self { repo, state_tx }
    }

    /// Returns a receiver tracking the current board state.
    pub fn observe_state(&self) -> watch::Receiver<TaskBoardState> {
        self.state_tx.subscribe()
    }

    /// Folds store emissions into state until the store is dropped.
    ///
    /// Meant to run as its own task for the lifetime of the screen.
    pub async fn run_observe_loop(&self) {
        let mut tasks_rx = self.repo.observe_tasks();
        loop {
            let tasks = tasks_rx.borrow_and_update().clone();
            self.apply(TaskBoardEvent::TasksChanged(tasks));
            if tasks_rx.changed().await.is_err() {
                break;
            }
        }
    }

    /// Creates a task from user input. Blank titles surface as state errors.
    pub async fn add_task(&self, title: &str, description: &str) {
        let result = self.repo.insert_task(&Task::new(title, description)).await;
        if let Err(err) = result {
            self.apply(TaskBoardEvent::Failed(err.to_string()));
        }
    }

    /// Rewrites a task's content fields.
    pub async fn update_task(&self, task: &Task, title: &str, description: &str) {
        let updated = Task {
            title: title.to_string(),
            description: description.to_string(),
            ..task.clone()
        };
        if let Err(err) = self.repo.update_task(&updated).await {
            self.apply(TaskBoardEvent::Failed(err.to_string()));
        }
    }

    /// Flips a task's completion flag.
    pub async fn toggle_done(&self, task: &Task) {
        let toggled = Task {
            is_done: !task.is_done,
            ..task.clone()
        };
        if let Err(err) = self.repo.update_task(&toggled).await {
            self.apply(TaskBoardEvent::Failed(err.to_string()));
        }
    }

    pub async fn delete(&self, task: &Task) {
        if let Err(err) = self.repo.delete(task).await {
            self.apply(TaskBoardEvent::Failed(err.to_string()));
        }
    }

    /// Runs one synchronization pass.
    ///
    /// `is_syncing` is raised first and lowered by a drop guard, so the flag
    /// resets even when the caller abandons the future mid-flight.
    pub async fn sync(&self) {
        self.apply(TaskBoardEvent::SyncStarted);
        let _reset = SyncingReset {
            state_tx: &self.state_tx,
        };

        if let Err(err) = self.repo.sync_with_network().await {
            self.apply(TaskBoardEvent::Failed(err.to_string()));
        }
    }

    pub fn clear_error(&self) {
        self.apply(TaskBoardEvent::ErrorCleared);
    }

    fn apply(&self, event: TaskBoardEvent) {
        self.state_tx.send_modify(|state| {
            let next = reduce(state, event);
            *state = next;
        });
    }
}

/// Lowers `is_syncing` when dropped, covering failure and cancellation.
struct SyncingReset<'a> {
    state_tx: &'a watch::Sender<TaskBoardState>,
}

impl Drop for SyncingReset<'_> {
    fn drop(&mut self) {
        self.state_tx.send_modify(|state| {
            let next = reduce(state, TaskBoardEvent::SyncFinished);
            *state = next;
        });
    }
}
