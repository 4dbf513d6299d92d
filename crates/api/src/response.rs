//! Shared response types for API handlers.

use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON body sent with headers that forbid any caching.
///
/// Import results describe a one-off write and must never be replayed from
/// a browser or proxy cache.
#[derive(Debug)]
pub struct NoCache<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for NoCache<T> {
    fn into_response(self) -> Response {
        (
            [
                (
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-cache, no-store, must-revalidate"),
                ),
                (PRAGMA, HeaderValue::from_static("no-cache")),
                (EXPIRES, HeaderValue::from_static("0")),
            ],
            Json(self.0),
        )
            .into_response()
    }
}
