//! Last-write-wins merge over two task snapshots.
//!
//! # Responsibility
//! - Reconcile a remote snapshot against the current local snapshot.
//!
//! # Invariants
//! - Pure function: two immutable snapshots plus an explicit merge time in,
//!   upsert batch out. No clock reads, no I/O.
//! - Equal timestamps favor local, so re-running a merge is a no-op.

use crate::model::task::Task;
use std::collections::HashMap;

/// Reconciles `remote` against `local` into an upsert batch.
///
/// Per remote record, in input order:
/// - No local counterpart: adopt the record with `updated_at` set to
///   `merge_time_ms` (it is newly arrived on this device).
/// - Remote strictly newer: take remote `title`/`description`, keep the
///   local `is_done` flag (completion is sticky to this device), stamp
///   `merge_time_ms`.
/// - Otherwise: keep the local record exactly, including its timestamp.
///
/// Local records absent from `remote` do not appear in the output; callers
/// persist the output as an upsert batch, so absence leaves them untouched.
pub fn merge_snapshots(remote: &[Task], local: &[Task], merge_time_ms: i64) -> Vec<Task> {
    let local_by_id: HashMap<&str, &Task> = local
        .iter()
        .map(|task| (task.id.as_str(), task))
        .collect();

    let mut batch = Vec::with_capacity(remote.len());
    for incoming in remote {
        match local_by_id.get(incoming.id.as_str()) {
            None => batch.push(Task {
                updated_at: merge_time_ms,
                ..incoming.clone()
            }),
            Some(existing) if incoming.updated_at > existing.updated_at => batch.push(Task {
                id: incoming.id.clone(),
                title: incoming.title.clone(),
                description: incoming.description.clone(),
                is_done: existing.is_done,
                updated_at: merge_time_ms,
            }),
            Some(existing) => batch.push((*existing).clone()),
        }
    }

    batch
}
