//! Task domain model.
//!
//! # Responsibility
//! - Define the single record type persisted locally and exchanged with the
//!   remote source.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - Every local mutation refreshes `updated_at`; merge output never moves a
//!   record's timestamp backward.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Locally created tasks use UUID v4 strings, but remote snapshots may carry
/// arbitrary ids, so this stays a plain string rather than a `Uuid`.
pub type TaskId = String;

/// Canonical task record.
///
/// Plain value type with no behavior. Equality is full field equality, so an
/// idempotent merge yields a record equal to its input and writers can skip
/// spurious change notifications if they choose to.
///
/// Serialized field names follow the remote wire shape:
/// `{id, title, description, isDone, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID, generated at creation or provided by the remote.
    pub id: TaskId,
    /// Display title. Non-empty by facade contract; the entity itself does
    /// not validate.
    pub title: String,
    /// Free-form body text, may be empty.
    pub description: String,
    /// Completion flag. Local state wins over remote during merge.
    pub is_done: bool,
    /// Unix epoch milliseconds of the last mutation. Used only for conflict
    /// resolution, never for display.
    pub updated_at: i64,
}

impl Task {
    /// Creates a new task with a generated stable ID.
    ///
    /// `updated_at` starts at zero; the repository facade stamps it from the
    /// injected clock before the record reaches storage.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, description)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by sync paths where identity already exists externally.
    pub fn with_id(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            is_done: false,
            updated_at: 0,
        }
    }
}
