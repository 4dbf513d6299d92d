use std::sync::Arc;

use eyetask_core::bulk_import::store::ImportStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Task/subtask store the import pipeline runs against.
    pub store: Arc<dyn ImportStore>,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
}
