//! Activity log entity model and insert DTO.
//!
//! Activity logs are append-only; there is no `updated_at`.

use eyetask_core::activity::ActivityEntry;
use eyetask_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `activity_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub details: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for inserting an activity log entry.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub user_id: Option<DbId>,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub details: serde_json::Value,
}

impl From<&ActivityEntry> for CreateActivityLog {
    fn from(entry: &ActivityEntry) -> Self {
        Self {
            user_id: entry.user_id,
            action_type: entry.action_type.clone(),
            entity_type: entry.entity_type.clone(),
            entity_id: entry.entity_id,
            details: entry.details.clone(),
        }
    }
}
