//! Task entity model.

use eyetask_core::bulk_import::store::TaskRef;
use eyetask_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub dataco_number: String,
    /// Rollup of the task's subtask amounts.
    pub amount_needed: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Task> for TaskRef {
    fn from(task: Task) -> Self {
        TaskRef {
            id: task.id,
            title: task.title,
        }
    }
}
