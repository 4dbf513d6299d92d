//! Repository for the append-only `activity_logs` table.

use eyetask_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{ActivityLog, CreateActivityLog};

/// Column list for `activity_logs` SELECT queries.
const COLUMNS: &str = "id, user_id, action_type, entity_type, entity_id, details, created_at";

/// Insert and query operations for activity logs.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append one entry, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, action_type, entity_type, entity_id, details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.user_id)
            .bind(&input.action_type)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Entries about one entity, newest first.
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }
}
