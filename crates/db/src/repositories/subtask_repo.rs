//! Repository for the `subtasks` table.

use eyetask_core::types::DbId;
use sqlx::PgPool;

use crate::models::subtask::{CreateSubtask, Subtask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, task_id, title, dataco_number, subtask_type, amount_needed, \
    labels, target_car, weather, scene, day_time, created_at, updated_at";

/// Inserts and duplicate lookups for subtasks. Imported subtasks are never
/// updated.
pub struct SubtaskRepo;

impl SubtaskRepo {
    /// Insert a new subtask, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSubtask) -> Result<Subtask, sqlx::Error> {
        let query = format!(
            "INSERT INTO subtasks
                (task_id, title, dataco_number, subtask_type, amount_needed,
                 labels, target_car, weather, scene, day_time)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(input.task_id)
            .bind(&input.title)
            .bind(&input.dataco_number)
            .bind(&input.subtask_type)
            .bind(input.amount_needed)
            .bind(&input.labels)
            .bind(&input.target_car)
            .bind(&input.weather)
            .bind(&input.scene)
            .bind(&input.day_time)
            .fetch_one(pool)
            .await
    }

    /// Ids of subtasks carrying the given normalized DATACO number.
    pub async fn find_ids_by_dataco_number(
        pool: &PgPool,
        dataco_number: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM subtasks WHERE dataco_number = $1")
            .bind(dataco_number)
            .fetch_all(pool)
            .await
    }

    /// All subtasks of a task, oldest first.
    pub async fn list_by_task(pool: &PgPool, task_id: DbId) -> Result<Vec<Subtask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subtasks WHERE task_id = $1 ORDER BY id");
        sqlx::query_as::<_, Subtask>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }
}
