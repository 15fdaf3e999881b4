//! Connection cleanup run during graceful shutdown.

use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Close a SeaORM pool, logging the outcome.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(()) => info!(connection = name, "PostgreSQL pool closed"),
        Err(e) => error!(connection = name, "Error closing PostgreSQL pool: {}", e),
    }
}

/// Spawns named cleanup tasks immediately and waits for all of them in [`Self::run`].
#[derive(Default)]
pub struct CleanupCoordinator {
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl CleanupCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task<F>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.push((name, tokio::spawn(task)));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// A panicking task is logged and does not stop the others.
    pub async fn run(self) {
        info!(tasks = self.tasks.len(), "Running cleanup tasks");

        for (name, handle) in self.tasks {
            match handle.await {
                Ok(()) => info!(task = name, "Cleanup task completed"),
                Err(e) => error!(task = name, "Cleanup task failed: {}", e),
            }
        }
    }
}
