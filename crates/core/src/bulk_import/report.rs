//! Per-batch import report returned to the caller. Never persisted.

use serde::{Deserialize, Serialize};

/// Aggregate outcome of one import call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<RowError>,
    pub task_results: Vec<TaskResult>,
}

/// A row that was not persisted, with enough context to find it in the
/// source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub task_key: String,
    pub subtask_key: String,
    pub error: String,
}

/// Per-parent summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub task_key: String,
    /// Number of subtasks created under this parent.
    pub subtasks_added: usize,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a persisted row against `task_key`.
    pub fn record_success(&mut self, task_key: &str) {
        self.total_processed += 1;
        self.successful += 1;
        match self.task_results.iter_mut().find(|r| r.task_key == task_key) {
            Some(result) => result.subtasks_added += 1,
            None => self.task_results.push(TaskResult {
                task_key: task_key.to_string(),
                subtasks_added: 1,
            }),
        }
    }

    /// Count a failed row.
    pub fn record_failure(&mut self, task_key: &str, subtask_key: &str, error: impl Into<String>) {
        self.total_processed += 1;
        self.failed += 1;
        self.errors.push(RowError {
            task_key: task_key.to_string(),
            subtask_key: subtask_key.to_string(),
            error: error.into(),
        });
    }

    /// Make sure `task_key` has a summary entry even when nothing was added.
    pub fn ensure_task(&mut self, task_key: &str) {
        if !self.task_results.iter().any(|r| r.task_key == task_key) {
            self.task_results.push(TaskResult {
                task_key: task_key.to_string(),
                subtasks_added: 0,
            });
        }
    }

    /// One-line human summary used as the response message.
    pub fn summary(&self) -> String {
        format!(
            "Import completed: {} of {} subtasks created, {} failed",
            self.successful, self.total_processed, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_outcomes() {
        let mut report = ImportReport::new();
        report.ensure_task("DATACO-1");
        report.record_success("DATACO-1");
        report.record_success("DATACO-1");
        report.record_failure("DATACO-1", "77", "Subtask with DATACO number 77 already exists");

        assert_eq!(report.total_processed, 3);
        assert_eq!(report.successful, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.task_results.len(), 1);
        assert_eq!(report.task_results[0].subtasks_added, 2);
        assert_eq!(report.errors[0].subtask_key, "77");
        assert_eq!(report.summary(), "Import completed: 2 of 3 subtasks created, 1 failed");
    }

    #[test]
    fn serializes_in_camel_case() {
        let mut report = ImportReport::new();
        report.record_failure("DATACO-1", "5", "boom");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["totalProcessed"], 1);
        assert_eq!(json["errors"][0]["taskKey"], "DATACO-1");
        assert_eq!(json["errors"][0]["subtaskKey"], "5");
        assert!(json["taskResults"].as_array().unwrap().is_empty());
    }
}
