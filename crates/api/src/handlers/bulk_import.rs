//! Handlers for the `/tasks/bulk-import` resource.
//!
//! Both endpoints take the raw JIRA export as JSON. The structural check
//! runs on the untyped value first so every shape problem is reported at
//! once; only a payload that passes it is deserialized into an
//! [`ImportBatch`].

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use eyetask_core::bulk_import::payload::ImportBatch;
use eyetask_core::bulk_import::report::ImportReport;
use eyetask_core::bulk_import::store::{StoreError, TaskRef};
use eyetask_core::bulk_import::validator::validate_structure;
use eyetask_core::types::Timestamp;
use eyetask_pipeline::{import_batch, resolve_parents};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireImporter};
use crate::response::NoCache;
use crate::state::AppState;

/// Response of the dry-run endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub task_map: BTreeMap<String, TaskRef>,
}

/// Response of a completed import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    pub results: ImportReport,
    pub timestamp: Timestamp,
}

/// POST /api/v1/tasks/bulk-import/validate
///
/// Run the structural check and the parent lookup without writing anything.
/// Structural errors short-circuit: the store is not queried and `taskMap`
/// is empty.
pub async fn validate_import(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(payload): Json<Value>,
) -> AppResult<NoCache<ValidateResponse>> {
    let structure = validate_structure(&payload);
    if !structure.valid {
        return Ok(NoCache(ValidateResponse {
            valid: false,
            errors: structure.errors,
            warnings: structure.warnings,
            task_map: BTreeMap::new(),
        }));
    }

    let batch = parse_batch(payload)?;
    let resolution = resolve_parents(state.store.as_ref(), &batch.parent_issues)
        .await
        .map_err(|e| store_failure(&user, "validate", e))?;

    tracing::info!(
        user_id = user.user_id,
        parents = batch.parent_issues.len(),
        subtasks = batch.subtask_count(),
        valid = resolution.valid,
        "Bulk import validated",
    );

    Ok(NoCache(ValidateResponse {
        valid: resolution.valid,
        errors: resolution.errors,
        warnings: structure.warnings,
        task_map: resolution.task_map,
    }))
}

/// POST /api/v1/tasks/bulk-import
///
/// Validate, resolve every parent, then import row by row. A structural
/// failure answers 400 and an unresolved parent answers 404; in both cases
/// nothing is written. Row-level failures are reported in `results`. Once
/// the writes start they run to completion, rollups included, even if the
/// caller stops waiting.
pub async fn import_tasks(
    State(state): State<AppState>,
    RequireImporter(user): RequireImporter,
    Json(payload): Json<Value>,
) -> AppResult<NoCache<ImportResponse>> {
    let structure = validate_structure(&payload);
    if !structure.valid {
        tracing::info!(
            user_id = user.user_id,
            errors = structure.errors.len(),
            "Bulk import rejected by structural validation",
        );
        return Err(AppError::ValidationFailed {
            errors: structure.errors,
            warnings: structure.warnings,
        });
    }

    let batch = parse_batch(payload)?;

    let resolution = resolve_parents(state.store.as_ref(), &batch.parent_issues)
        .await
        .map_err(|e| store_failure(&user, "resolve", e))?;
    if !resolution.valid {
        tracing::info!(
            user_id = user.user_id,
            unresolved = ?resolution.unresolved_keys(&batch.parent_issues),
            "Bulk import rejected: unresolved parents",
        );
        return Err(AppError::UnresolvedParents(resolution.errors));
    }

    tracing::info!(
        user_id = user.user_id,
        role = %user.role,
        parents = batch.parent_issues.len(),
        subtasks = batch.subtask_count(),
        "Bulk import started",
    );

    // The writes run on their own task: a request timeout or a dropped
    // connection abandons only this waiter, never a half-written parent.
    let store = Arc::clone(&state.store);
    let task_map = resolution.task_map;
    let actor = Some(user.user_id);
    let import = tokio::spawn(async move {
        import_batch(store.as_ref(), &batch, &task_map, actor).await
    });

    let report = import
        .await
        .map_err(|e| {
            tracing::error!(
                user_id = user.user_id,
                role = %user.role,
                error = %e,
                "Bulk import task aborted",
            );
            AppError::InternalError(format!("import task aborted: {e}"))
        })?
        .map_err(|e| store_failure(&user, "import", e))?;

    Ok(NoCache(ImportResponse {
        success: true,
        message: report.summary(),
        results: report,
        timestamp: chrono::Utc::now(),
    }))
}

/// Deserialize a structurally valid payload into typed records.
///
/// Optional fields of the wrong JSON type (for example a numeric `weather`)
/// are not covered by the structural check and surface here.
fn parse_batch(payload: Value) -> AppResult<ImportBatch> {
    serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid import payload: {e}")))
}

/// Log an unexpected store failure with the caller's identity.
fn store_failure(user: &AuthUser, stage: &'static str, err: StoreError) -> AppError {
    tracing::error!(
        user_id = user.user_id,
        role = %user.role,
        stage,
        error = %err,
        "Bulk import failed",
    );
    AppError::Store(err)
}
