//! Repository for the `tasks` table.

use eyetask_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::Task;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, dataco_number, amount_needed, created_at, updated_at";

/// Lookups and rollup maintenance for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task, returning the created row.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        dataco_number: &str,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (title, dataco_number)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(title)
            .bind(dataco_number)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its normalized DATACO number.
    pub async fn find_by_dataco_number(
        pool: &PgPool,
        dataco_number: &str,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE dataco_number = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(dataco_number)
            .fetch_optional(pool)
            .await
    }

    /// Recompute `amount_needed` as the sum of the task's subtask amounts.
    ///
    /// Returns the new total, or `None` if the task does not exist.
    pub async fn recompute_amount_needed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            "UPDATE tasks SET
                amount_needed = (
                    SELECT COALESCE(SUM(amount_needed), 0)
                    FROM subtasks WHERE task_id = $1
                ),
                updated_at = NOW()
             WHERE id = $1
             RETURNING amount_needed",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
