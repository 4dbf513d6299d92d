//! [`ImportStore`] backed by PostgreSQL.

use async_trait::async_trait;
use eyetask_core::activity::ActivityEntry;
use eyetask_core::bulk_import::store::{ImportStore, NewSubtask, StoreError, TaskRef};
use eyetask_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::CreateActivityLog;
use crate::models::subtask::CreateSubtask;
use crate::repositories::{ActivityLogRepo, SubtaskRepo, TaskRepo};

/// Adapts the repositories to the import pipeline's store seam.
#[derive(Clone)]
pub struct PgImportStore {
    pool: PgPool,
}

impl PgImportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImportStore for PgImportStore {
    async fn find_task_by_dataco(&self, dataco_number: &str) -> Result<Option<TaskRef>, StoreError> {
        let task = TaskRepo::find_by_dataco_number(&self.pool, dataco_number)
            .await
            .map_err(StoreError::backend)?;
        Ok(task.map(TaskRef::from))
    }

    async fn find_subtasks_by_dataco(&self, dataco_number: &str) -> Result<Vec<DbId>, StoreError> {
        SubtaskRepo::find_ids_by_dataco_number(&self.pool, dataco_number)
            .await
            .map_err(StoreError::backend)
    }

    async fn create_subtask(&self, subtask: &NewSubtask) -> Result<DbId, StoreError> {
        let input = CreateSubtask::from(subtask);
        match SubtaskRepo::create(&self.pool, &input).await {
            Ok(row) => Ok(row.id),
            // Lost a race with a concurrent import of the same row.
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::Conflict(input.dataco_number))
            }
            Err(e) => Err(StoreError::backend(e)),
        }
    }

    async fn update_task_amount(&self, task_id: DbId) -> Result<f64, StoreError> {
        TaskRepo::recompute_amount_needed(&self.pool, task_id)
            .await
            .map_err(StoreError::backend)?
            .ok_or(StoreError::TaskMissing(task_id))
    }

    async fn log_activity(&self, entry: &ActivityEntry) -> Result<(), StoreError> {
        ActivityLogRepo::create(&self.pool, &CreateActivityLog::from(entry))
            .await
            .map_err(StoreError::backend)?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}
