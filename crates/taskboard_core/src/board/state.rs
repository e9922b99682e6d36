//! Board state value and reducer.

use crate::model::task::Task;

/// Immutable snapshot of everything the task list screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoardState {
    /// Current collection, newest `updated_at` first.
    pub tasks: Vec<Task>,
    /// True until the first store emission arrives.
    pub is_loading: bool,
    /// True while a sync pass is in flight.
    pub is_syncing: bool,
    /// Last user-visible failure, cleared explicitly.
    pub error: Option<String>,
}

impl Default for TaskBoardState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            is_loading: true,
            is_syncing: false,
            error: None,
        }
    }
}

/// State transitions accepted by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskBoardEvent {
    /// The store published a new collection.
    TasksChanged(Vec<Task>),
    SyncStarted,
    SyncFinished,
    Failed(String),
    ErrorCleared,
}

/// Pure reducer over immutable state snapshots.
pub fn reduce(state: &TaskBoardState, event: TaskBoardEvent) -> TaskBoardState {
    match event {
        TaskBoardEvent::TasksChanged(tasks) => TaskBoardState {
            tasks,
            is_loading: false,
            ..state.clone()
        },
        TaskBoardEvent::SyncStarted => TaskBoardState {
            is_syncing: true,
            ..state.clone()
        },
        TaskBoardEvent::SyncFinished => TaskBoardState {
            is_syncing: false,
            ..state.clone()
        },
        TaskBoardEvent::Failed(message) => TaskBoardState {
            error: Some(message),
            ..state.clone()
        },
        TaskBoardEvent::ErrorCleared => TaskBoardState {
            error: None,
            ..state.clone()
        },
    }
}
