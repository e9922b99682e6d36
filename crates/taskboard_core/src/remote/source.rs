//! Remote task source.
//!
//! # Responsibility
//! - Expose an asynchronous, cancellable snapshot fetch.
//! - Ship an in-process simulated provider for development and smoke runs.
//!
//! # Invariants
//! - `fetch_tasks` has no side effects on local storage.

use crate::clock::Clock;
use crate::model::task::Task;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

/// Remote fetch failure, including timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    Unavailable(String),
    Timeout,
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "remote source unavailable: {message}"),
            Self::Timeout => write!(f, "remote fetch timed out"),
        }
    }
}

impl Error for NetworkError {}

/// External provider of task snapshots.
///
/// Callers must tolerate multi-second latency and may cancel an in-flight
/// fetch by dropping the future.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, NetworkError>;
}

/// Deterministic in-process stand-in for a real network service.
///
/// Sleeps a configurable latency, then returns a canned snapshot stamped
/// with the injected clock's current time, matching a provider that builds
/// its records at fetch time.
pub struct SimulatedRemoteSource {
    latency: Duration,
    clock: Arc<dyn Clock>,
}

impl SimulatedRemoteSource {
    pub fn new(latency: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { latency, clock }
    }
}

#[async_trait]
impl RemoteSource for SimulatedRemoteSource {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, NetworkError> {
        tokio::time::sleep(self.latency).await;

        let fetched_at = self.clock.now_epoch_ms();
        Ok(vec![
            Task {
                id: "net1".to_string(),
                title: "Buy milk".to_string(),
                description: "From the store".to_string(),
                is_done: false,
                updated_at: fetched_at,
            },
            Task {
                id: "net2".to_string(),
                title: "Call mom".to_string(),
                description: String::new(),
                is_done: true,
                updated_at: fetched_at,
            },
        ])
    }
}
