//! Route definitions for the `/tasks/bulk-import` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::bulk_import;
use crate::state::AppState;

/// Routes mounted at `/tasks/bulk-import`.
///
/// ```text
/// POST   /            -> import_tasks
/// POST   /validate    -> validate_import  (dry-run)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(bulk_import::import_tasks))
        .route("/validate", post(bulk_import::validate_import))
}
