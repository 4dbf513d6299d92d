//! Normalization and persistence of subtask rows.
//!
//! Parents are processed in order, rows within a parent in order. Each row
//! is isolated: anything that goes wrong while checking, normalizing or
//! writing it becomes a row error in the report and the next row runs. Only
//! the per-parent rollup is allowed to fail the whole call.

use std::collections::BTreeMap;

use eyetask_core::activity::ActivityEntry;
use eyetask_core::bulk_import::classification::{
    amount_is_acceptable, augment_labels, classify_parent, Classification,
};
use eyetask_core::bulk_import::payload::{ImportBatch, ParentIssue, SubtaskRecord};
use eyetask_core::bulk_import::report::ImportReport;
use eyetask_core::bulk_import::store::{ImportStore, NewSubtask, StoreError, TaskRef};
use eyetask_core::bulk_import::vocabulary::{
    map_day_time, map_scene, map_subtask_type, map_weather,
};
use eyetask_core::types::DbId;

use crate::resolver::not_found_message;

/// Why a single row was not imported.
#[derive(Debug, thiserror::Error)]
pub enum RowFailure {
    #[error("Subtask with DATACO number {0} already exists")]
    Duplicate(String),

    #[error("Invalid amount_needed {0}: must not be negative")]
    NegativeAmount(f64),

    #[error("Invalid amount_needed {0}: must be greater than 0")]
    NonPositiveAmount(f64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Import every row of a resolved batch.
///
/// `task_map` comes from [`crate::resolve_parents`] and is keyed by the
/// original parent key. `actor` is recorded on activity entries.
pub async fn import_batch(
    store: &dyn ImportStore,
    batch: &ImportBatch,
    task_map: &BTreeMap<String, TaskRef>,
    actor: Option<DbId>,
) -> Result<ImportReport, StoreError> {
    let mut report = ImportReport::new();

    for parent in &batch.parent_issues {
        report.ensure_task(&parent.key);

        let Some(task) = task_map.get(&parent.key) else {
            for row in &parent.subtasks {
                report.record_failure(&parent.key, &row.dataco_number, not_found_message(&parent.key));
            }
            tracing::warn!(parent_key = %parent.key, "Skipping unresolved parent");
            continue;
        };

        let classification = classify_parent(parent);
        tracing::info!(
            parent_key = %parent.key,
            task_id = task.id,
            rows = parent.subtasks.len(),
            classification = classification.as_str(),
            "Importing subtasks",
        );

        for row in &parent.subtasks {
            match import_row(store, parent, task, row, classification, actor).await {
                Ok(subtask_id) => {
                    tracing::debug!(
                        parent_key = %parent.key,
                        dataco_number = %row.dataco_number,
                        subtask_id,
                        "Subtask created",
                    );
                    report.record_success(&parent.key);
                }
                Err(e) => {
                    tracing::warn!(
                        parent_key = %parent.key,
                        dataco_number = %row.dataco_number,
                        error = %e,
                        "Subtask row failed",
                    );
                    report.record_failure(&parent.key, &row.dataco_number, e.to_string());
                }
            }
        }

        let total = store.update_task_amount(task.id).await?;
        tracing::debug!(task_id = task.id, amount_needed = total, "Task rollup updated");
    }

    tracing::info!(
        total = report.total_processed,
        successful = report.successful,
        failed = report.failed,
        "Bulk import finished",
    );
    Ok(report)
}

/// Run one row through the duplicate guard, normalization and the writes.
async fn import_row(
    store: &dyn ImportStore,
    parent: &ParentIssue,
    task: &TaskRef,
    row: &SubtaskRecord,
    classification: Classification,
    actor: Option<DbId>,
) -> Result<DbId, RowFailure> {
    let dataco_number = row.normalized_key();

    if !store.find_subtasks_by_dataco(dataco_number).await?.is_empty() {
        return Err(RowFailure::Duplicate(dataco_number.to_string()));
    }

    if !amount_is_acceptable(row.amount_needed, row.issue_type, classification) {
        return Err(if row.amount_needed < 0.0 {
            RowFailure::NegativeAmount(row.amount_needed)
        } else {
            RowFailure::NonPositiveAmount(row.amount_needed)
        });
    }

    let subtask = normalize_row(task.id, parent, row, classification);
    let subtask_id = store.create_subtask(&subtask).await.map_err(|e| match e {
        StoreError::Conflict(n) => RowFailure::Duplicate(n),
        other => RowFailure::Store(other),
    })?;

    store
        .log_activity(&ActivityEntry::subtask_created(
            actor,
            subtask_id,
            task.id,
            &parent.key,
            dataco_number,
        ))
        .await?;

    Ok(subtask_id)
}

/// Map a row onto the internal vocabulary.
pub fn normalize_row(
    task_id: DbId,
    parent: &ParentIssue,
    row: &SubtaskRecord,
    classification: Classification,
) -> NewSubtask {
    NewSubtask {
        task_id,
        title: row.summary.clone(),
        dataco_number: row.normalized_key().to_string(),
        subtask_type: map_subtask_type(row.issue_type, classification.is_calibration()),
        amount_needed: row.amount_needed,
        labels: augment_labels(row.labels.as_deref(), &row.summary, classification),
        target_car: parent.target_cars(),
        weather: map_weather(row.weather.as_deref()),
        scene: map_scene(row.road_type.as_deref()),
        day_time: map_day_time(row.day_time.as_ref()),
    }
}
