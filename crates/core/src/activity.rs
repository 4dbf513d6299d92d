//! Activity log constants and entry type.
//!
//! Activity entries are the operator-facing audit trail of what an import
//! created. They are written through the same store as the records they
//! describe.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Action / entity type constants
// ---------------------------------------------------------------------------

/// Known action types for activity entries.
pub mod action_types {
    pub const SUBTASK_CREATED: &str = "subtask_created";
    pub const BULK_IMPORT: &str = "bulk_import";
}

/// Known entity types for activity entries.
pub mod entity_types {
    pub const TASK: &str = "task";
    pub const SUBTASK: &str = "subtask";
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A single activity entry to append.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    pub user_id: Option<DbId>,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub details: serde_json::Value,
}

impl ActivityEntry {
    /// Entry recording that an import created a subtask under a task.
    pub fn subtask_created(
        user_id: Option<DbId>,
        subtask_id: DbId,
        task_id: DbId,
        parent_key: &str,
        dataco_number: &str,
    ) -> Self {
        Self {
            user_id,
            action_type: action_types::SUBTASK_CREATED.to_string(),
            entity_type: entity_types::SUBTASK.to_string(),
            entity_id: Some(subtask_id),
            details: serde_json::json!({
                "source": action_types::BULK_IMPORT,
                "task_id": task_id,
                "parent_key": parent_key,
                "dataco_number": dataco_number,
            }),
        }
    }
}
