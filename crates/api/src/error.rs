use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eyetask_core::bulk_import::store::StoreError;
use eyetask_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for identity errors and [`StoreError`] for store
/// failures, and adds the import-specific batch rejections. Responses are
/// JSON of the form `{ "error", "code", "details"?, "warnings"? }`. Store
/// failures are logged and answered with a fixed message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `eyetask_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the task store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The payload failed structural validation. Nothing was read or written.
    #[error("Validation failed with {} error(s)", .errors.len())]
    ValidationFailed {
        errors: Vec<String>,
        warnings: Vec<String>,
    },

    /// One or more parent keys did not resolve to a task. Nothing was written.
    #[error("Unresolved parent issues: {}", .0.join("; "))]
    UnresolvedParents(Vec<String>),

    /// An unexpected failure. The message is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Store errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }

            // --- Import batch rejections ---
            AppError::ValidationFailed { .. } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Invalid import data structure".to_string(),
            ),
            AppError::UnresolvedParents(_) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Some parent tasks were not found".to_string(),
            ),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        match self {
            AppError::ValidationFailed { errors, warnings } => {
                body["details"] = json!(errors);
                body["warnings"] = json!(warnings);
            }
            AppError::UnresolvedParents(errors) => {
                body["details"] = json!(errors);
            }
            _ => {}
        }

        (status, axum::Json(body)).into_response()
    }
}
