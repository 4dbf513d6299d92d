//! Subtask entity model and insert DTO.

use eyetask_core::bulk_import::store::NewSubtask;
use eyetask_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `subtasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subtask {
    pub id: DbId,
    pub task_id: DbId,
    pub title: String,
    pub dataco_number: String,
    pub subtask_type: String,
    pub amount_needed: f64,
    pub labels: Vec<String>,
    pub target_car: Vec<String>,
    pub weather: String,
    pub scene: String,
    pub day_time: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a subtask. Enumerations are stored as their text form.
#[derive(Debug, Clone)]
pub struct CreateSubtask {
    pub task_id: DbId,
    pub title: String,
    pub dataco_number: String,
    pub subtask_type: String,
    pub amount_needed: f64,
    pub labels: Vec<String>,
    pub target_car: Vec<String>,
    pub weather: String,
    pub scene: String,
    pub day_time: Vec<String>,
}

impl From<&NewSubtask> for CreateSubtask {
    fn from(s: &NewSubtask) -> Self {
        Self {
            task_id: s.task_id,
            title: s.title.clone(),
            dataco_number: s.dataco_number.clone(),
            subtask_type: s.subtask_type.as_str().to_string(),
            amount_needed: s.amount_needed,
            labels: s.labels.clone(),
            target_car: s.target_car.clone(),
            weather: s.weather.as_str().to_string(),
            scene: s.scene.as_str().to_string(),
            day_time: s.day_time.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyetask_core::bulk_import::vocabulary::{Scene, SubtaskType, Weather};

    #[test]
    fn enumerations_are_stored_as_text() {
        let new = NewSubtask {
            task_id: 3,
            title: "Urban dusk drive".into(),
            dataco_number: "5678".into(),
            subtask_type: SubtaskType::Hours,
            amount_needed: 2.5,
            labels: vec![],
            target_car: vec!["wl-01".into()],
            weather: Weather::Overcast,
            scene: Scene::TestTrack,
            day_time: vec!["dusk".into()],
        };
        let row = CreateSubtask::from(&new);
        assert_eq!(row.subtask_type, "hours");
        assert_eq!(row.weather, "Overcast");
        assert_eq!(row.scene, "Test Track");
    }
}
