//! Resolution of parent issue keys to existing tasks.

use std::collections::BTreeMap;

use eyetask_core::bulk_import::payload::ParentIssue;
use eyetask_core::bulk_import::store::{ImportStore, StoreError, TaskRef};
use futures::future::try_join_all;
use serde::Serialize;

/// Result of resolving every parent of a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Original (unstripped) parent key -> resolved task.
    pub task_map: BTreeMap<String, TaskRef>,
}

impl Resolution {
    /// Original keys that did not resolve, in input order.
    pub fn unresolved_keys<'a>(&self, parents: &'a [ParentIssue]) -> Vec<&'a str> {
        parents
            .iter()
            .map(|p| p.key.as_str())
            .filter(|key| !self.task_map.contains_key(*key))
            .collect()
    }
}

/// Message reported for a parent key with no matching task.
pub fn not_found_message(key: &str) -> String {
    format!("Task not found for key: {key}")
}

/// Look up the task behind every parent key.
///
/// Keys are normalized by stripping the `DATACO-` prefix. Lookups run
/// concurrently; a store failure on any of them fails the whole resolution.
/// Missing tasks are reported in `errors` and make the resolution invalid.
pub async fn resolve_parents(
    store: &dyn ImportStore,
    parents: &[ParentIssue],
) -> Result<Resolution, StoreError> {
    let lookups = parents.iter().map(|parent| async move {
        let task = store.find_task_by_dataco(parent.dataco_number()).await?;
        Ok::<_, StoreError>((parent.key.as_str(), task))
    });
    let found = try_join_all(lookups).await?;

    let mut errors = Vec::new();
    let mut task_map = BTreeMap::new();
    for (key, task) in found {
        match task {
            Some(task) => {
                task_map.insert(key.to_string(), task);
            }
            None => errors.push(not_found_message(key)),
        }
    }

    tracing::debug!(
        parents = parents.len(),
        resolved = task_map.len(),
        unresolved = errors.len(),
        "Resolved bulk import parents",
    );

    Ok(Resolution {
        valid: errors.is_empty(),
        errors,
        task_map,
    })
}
