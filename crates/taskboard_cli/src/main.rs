//! CLI smoke entry point.
//!
//! # Responsibility
//! - Drive one add/sync/list pass against an in-memory store to verify
//!   `taskboard_core` wiring independently of any UI host.

use std::sync::Arc;
use std::time::Duration;
use taskboard_core::db::open_db_in_memory;
use taskboard_core::{SimulatedRemoteSource, SqliteTaskStore, SystemClock, Task, TaskRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("taskboard_core version={}", taskboard_core::core_version());

    let clock = Arc::new(SystemClock);
    let store = SqliteTaskStore::try_new(open_db_in_memory()?)?;
    let remote = SimulatedRemoteSource::new(Duration::from_millis(200), clock.clone());
    let repo = TaskRepository::new(store, remote, clock);

    repo.insert_task(&Task::new("Write report", "quarterly numbers"))
        .await?;
    repo.sync_with_network().await?;

    for task in repo.get_all_snapshot().await? {
        let mark = if task.is_done { "x" } else { " " };
        println!("[{mark}] {} ({})", task.title, task.id);
    }

    Ok(())
}
