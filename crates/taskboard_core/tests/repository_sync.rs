use async_trait::async_trait;
use std::sync::Arc;
use taskboard_core::db::open_db_in_memory;
use taskboard_core::{
    ManualClock, NetworkError, RemoteSource, RepoError, SqliteTaskStore, Task, TaskRepository,
    TaskStore, TaskValidationError,
};

/// Remote stand-in returning a fixed snapshot or a fixed failure.
enum StubRemote {
    Snapshot(Vec<Task>),
    Failing,
}

#[async_trait]
impl RemoteSource for StubRemote {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, NetworkError> {
        match self {
            Self::Snapshot(tasks) => Ok(tasks.clone()),
            Self::Failing => Err(NetworkError::Unavailable("stub offline".to_string())),
        }
    }
}

fn task(id: &str, title: &str, is_done: bool, updated_at: i64) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        is_done,
        updated_at,
    }
}

fn new_store() -> SqliteTaskStore {
    SqliteTaskStore::try_new(open_db_in_memory().unwrap()).unwrap()
}

fn find<'a>(tasks: &'a [Task], id: &str) -> &'a Task {
    tasks
        .iter()
        .find(|t| t.id == id)
        .unwrap_or_else(|| panic!("task {id} should exist"))
}

#[tokio::test]
async fn sync_merges_remote_into_local_state() {
    let store = new_store();
    store.upsert(&task("1", "A", false, 100)).await.unwrap();
    store.upsert(&task("9", "Mine", true, 400)).await.unwrap();

    let remote = StubRemote::Snapshot(vec![
        task("1", "B", true, 200),
        task("3", "New", true, 50),
    ]);
    let clock = Arc::new(ManualClock::new(1_000));
    let repo = TaskRepository::new(store, remote, clock);

    repo.sync_with_network().await.unwrap();
    let tasks = repo.get_all_snapshot().await.unwrap();

    // Remote is newer: content refreshed, local done flag preserved.
    let merged = find(&tasks, "1");
    assert_eq!(merged.title, "B");
    assert!(!merged.is_done);
    assert_eq!(merged.updated_at, 1_000);

    // Unknown remote record adopted with merge time.
    let adopted = find(&tasks, "3");
    assert_eq!(adopted.title, "New");
    assert!(adopted.is_done);
    assert_eq!(adopted.updated_at, 1_000);

    // Local-only record untouched.
    assert_eq!(find(&tasks, "9"), &task("9", "Mine", true, 400));
}

#[tokio::test]
async fn stale_remote_sync_is_an_exact_noop() {
    let store = new_store();
    store.upsert(&task("2", "Local", true, 500)).await.unwrap();

    let remote = StubRemote::Snapshot(vec![task("2", "Stale", false, 100)]);
    let clock = Arc::new(ManualClock::new(9_999));
    let repo = TaskRepository::new(store, remote, clock);

    let before = repo.get_all_snapshot().await.unwrap();
    repo.sync_with_network().await.unwrap();
    let after = repo.get_all_snapshot().await.unwrap();

    assert_eq!(before, after, "no spurious timestamp bump");
}

#[tokio::test]
async fn repeated_sync_with_same_remote_is_idempotent() {
    let store = new_store();
    store.upsert(&task("1", "A", true, 100)).await.unwrap();

    let remote = StubRemote::Snapshot(vec![task("1", "B", false, 200)]);
    let clock = Arc::new(ManualClock::new(1_000));
    let repo = TaskRepository::new(store, remote, clock.clone());

    repo.sync_with_network().await.unwrap();
    let first = repo.get_all_snapshot().await.unwrap();

    clock.advance(500);
    repo.sync_with_network().await.unwrap();
    let second = repo.get_all_snapshot().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn failed_fetch_leaves_local_state_untouched() {
    let store = new_store();
    store.upsert(&task("1", "A", false, 100)).await.unwrap();

    let clock = Arc::new(ManualClock::new(1_000));
    let repo = TaskRepository::new(store, StubRemote::Failing, clock);

    let before = repo.get_all_snapshot().await.unwrap();
    let err = repo.sync_with_network().await.unwrap_err();
    let after = repo.get_all_snapshot().await.unwrap();

    assert!(matches!(err, RepoError::Network(_)));
    assert_eq!(before, after);
}

#[tokio::test]
async fn insert_and_update_stamp_updated_at_from_the_clock() {
    let clock = Arc::new(ManualClock::new(42));
    let repo = TaskRepository::new(new_store(), StubRemote::Failing, clock.clone());

    let created = Task::new("write tests", "");
    repo.insert_task(&created).await.unwrap();
    assert_eq!(repo.get_all_snapshot().await.unwrap()[0].updated_at, 42);

    clock.set(99);
    let renamed = Task {
        title: "write more tests".to_string(),
        ..created
    };
    repo.update_task(&renamed).await.unwrap();

    let stored = repo.get_all_snapshot().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "write more tests");
    assert_eq!(stored[0].updated_at, 99);
}

#[tokio::test]
async fn blank_title_is_rejected_before_storage() {
    let clock = Arc::new(ManualClock::new(1));
    let repo = TaskRepository::new(new_store(), StubRemote::Failing, clock);

    let err = repo.insert_task(&Task::new("   ", "desc")).await.unwrap_err();

    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::EmptyTitle)
    ));
    assert!(repo.get_all_snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_through_the_facade_removes_the_record() {
    let clock = Arc::new(ManualClock::new(1));
    let repo = TaskRepository::new(new_store(), StubRemote::Failing, clock);

    let created = Task::new("short lived", "");
    repo.insert_task(&created).await.unwrap();
    repo.delete(&created).await.unwrap();

    assert!(repo.get_all_snapshot().await.unwrap().is_empty());

    // Deleting again is still not an error.
    repo.delete_by_id(&created.id).await.unwrap();
}

#[tokio::test]
async fn observe_tasks_streams_store_changes() {
    let clock = Arc::new(ManualClock::new(7));
    let repo = TaskRepository::new(new_store(), StubRemote::Failing, clock);

    let mut rx = repo.observe_tasks();
    assert!(rx.borrow_and_update().is_empty());

    repo.insert_task(&Task::new("observed", "")).await.unwrap();

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().len(), 1);
}
