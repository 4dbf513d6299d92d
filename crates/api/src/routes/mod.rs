pub mod bulk_import;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tasks/bulk-import                    run a full import (admin, data_manager)
/// /tasks/bulk-import/validate           dry run, no writes (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/tasks/bulk-import", bulk_import::router())
}
