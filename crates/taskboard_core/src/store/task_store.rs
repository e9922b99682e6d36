//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide upsert/delete/snapshot APIs over the canonical `tasks` table.
//! - Publish the full ordered collection to observers after every committed
//!   write.
//!
//! # Invariants
//! - At most one record per `id` (insert-or-replace semantics).
//! - `observe_all` and `get_all_snapshot` order by `updated_at` descending,
//!   ties broken by `id` ascending for determinism.
//! - A batch upsert becomes visible to observers as a single emission.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::Task;
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::{watch, Mutex};

const TASK_SELECT_SQL: &str = "SELECT id, title, description, is_done, updated_at
FROM tasks
ORDER BY updated_at DESC, id ASC";

const TASK_UPSERT_SQL: &str = "INSERT INTO tasks (id, title, description, is_done, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT(id) DO UPDATE SET
    title = excluded.title,
    description = excluded.description,
    is_done = excluded.is_done,
    updated_at = excluded.updated_at;";

pub type StoreResult<T> = Result<T, StorageError>;

/// Storage error for task persistence and query operations.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table is missing: {table}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable keyed storage for tasks with change notifications.
///
/// `observe_all` is an infinite, restartable stream: a new subscriber sees
/// the current collection immediately and one emission per committed write
/// afterwards. The store never retries failed I/O internally.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns a receiver tracking the current full, ordered collection.
    fn observe_all(&self) -> watch::Receiver<Vec<Task>>;

    /// Inserts or replaces one record by `id`.
    async fn upsert(&self, task: &Task) -> StoreResult<()>;

    /// Inserts or replaces a batch in a single transaction.
    async fn upsert_many(&self, tasks: &[Task]) -> StoreResult<()>;

    /// Removes the record for `task.id`. No-op when absent.
    async fn delete(&self, task: &Task) -> StoreResult<()>;

    /// Removes the record by id. No-op when absent.
    async fn delete_by_id(&self, id: &str) -> StoreResult<()>;

    /// One-shot ordered read of the current state.
    async fn get_all_snapshot(&self) -> StoreResult<Vec<Task>>;
}

/// SQLite-backed task store.
///
/// The connection is guarded by an async mutex; each write re-reads the
/// ordered collection under the same lock and publishes it through a watch
/// channel, so observers always receive fully committed state.
pub struct SqliteTaskStore {
    conn: Mutex<Connection>,
    tasks_tx: watch::Sender<Vec<Task>>,
}

impl SqliteTaskStore {
    /// Wraps a migrated connection, seeding observers with current state.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match
    ///   this binary's latest migration.
    /// - `MissingRequiredTable` when the `tasks` table is absent.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        verify_schema(&conn)?;
        let initial = query_all(&conn)?;
        let (tasks_tx, _) = watch::channel(initial);
        Ok(Self {
            conn: Mutex::new(conn),
            tasks_tx,
        })
    }

    fn publish(&self, conn: &Connection) -> StoreResult<()> {
        let snapshot = query_all(conn)?;
        self.tasks_tx.send_replace(snapshot);
        Ok(())
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    fn observe_all(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks_tx.subscribe()
    }

    async fn upsert(&self, task: &Task) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            TASK_UPSERT_SQL,
            params![
                task.id,
                task.title,
                task.description,
                i64::from(task.is_done),
                task.updated_at,
            ],
        )?;
        self.publish(&conn)
    }

    async fn upsert_many(&self, tasks: &[Task]) -> StoreResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(TASK_UPSERT_SQL)?;
            for task in tasks {
                stmt.execute(params![
                    task.id,
                    task.title,
                    task.description,
                    i64::from(task.is_done),
                    task.updated_at,
                ])?;
            }
        }
        tx.commit()?;
        self.publish(&conn)
    }

    async fn delete(&self, task: &Task) -> StoreResult<()> {
        self.delete_by_id(&task.id).await
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        self.publish(&conn)
    }

    async fn get_all_snapshot(&self) -> StoreResult<Vec<Task>> {
        let conn = self.conn.lock().await;
        query_all(&conn)
    }
}

fn verify_schema(conn: &Connection) -> StoreResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'tasks'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists != 1 {
        return Err(StorageError::MissingRequiredTable("tasks"));
    }

    Ok(())
}

fn query_all(conn: &Connection) -> StoreResult<Vec<Task>> {
    let mut stmt = conn.prepare(TASK_SELECT_SQL)?;
    let mut rows = stmt.query([])?;
    let mut tasks = Vec::new();

    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }

    Ok(tasks)
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let is_done = match row.get::<_, i64>("is_done")? {
        0 => false,
        1 => true,
        other => {
            return Err(StorageError::InvalidData(format!(
                "invalid is_done value `{other}` in tasks.is_done"
            )));
        }
    };

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        is_done,
        updated_at: row.get("updated_at")?,
    })
}
