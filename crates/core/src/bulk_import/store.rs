//! The task/subtask store as seen by the import pipeline.
//!
//! The pipeline only needs a handful of operations. Implementations live in
//! `eyetask-db` (PostgreSQL) and `eyetask-pipeline` (in-memory, for tests).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::vocabulary::{Scene, SubtaskType, Weather};
use crate::activity::ActivityEntry;
use crate::types::DbId;

/// Identity of an existing task a parent issue resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: DbId,
    pub title: String,
}

/// A fully normalized subtask ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubtask {
    pub task_id: DbId,
    pub title: String,
    /// DATACO number with the prefix stripped.
    pub dataco_number: String,
    pub subtask_type: SubtaskType,
    pub amount_needed: f64,
    pub labels: Vec<String>,
    pub target_car: Vec<String>,
    pub weather: Weather,
    pub scene: Scene,
    pub day_time: Vec<String>,
}

/// Failure reported by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Task {0} does not exist")]
    TaskMissing(DbId),

    #[error("Duplicate DATACO number: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Wrap any backend error (sqlx, io, ...) into [`StoreError::Backend`].
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Operations the import pipeline performs against the task store.
#[async_trait]
pub trait ImportStore: Send + Sync {
    /// Look up a task by its normalized DATACO number.
    async fn find_task_by_dataco(&self, dataco_number: &str) -> Result<Option<TaskRef>, StoreError>;

    /// Ids of subtasks already carrying this normalized DATACO number.
    async fn find_subtasks_by_dataco(&self, dataco_number: &str) -> Result<Vec<DbId>, StoreError>;

    /// Insert a subtask, returning its id.
    async fn create_subtask(&self, subtask: &NewSubtask) -> Result<DbId, StoreError>;

    /// Recompute a task's `amount_needed` from its subtasks and store it.
    /// Returns the new total.
    async fn update_task_amount(&self, task_id: DbId) -> Result<f64, StoreError>;

    /// Append an activity entry.
    async fn log_activity(&self, entry: &ActivityEntry) -> Result<(), StoreError>;

    /// Cheap liveness probe used by the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn backend_wraps_source_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = StoreError::backend(io);
        assert_matches!(err, StoreError::Backend(_));
        assert_eq!(err.to_string(), "Store backend error: connection reset");
    }
}
