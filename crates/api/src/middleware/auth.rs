//! Caller identity from the `Authorization: Bearer <jwt>` header.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use eyetask_core::error::CoreError;
use eyetask_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller. Handlers log with `user_id` and `role` so a
/// failed import can be traced back to who ran it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// `"admin"`, `"data_manager"` or `"driver"`.
    pub role: String,
}

impl AuthUser {
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.contains(&self.role.as_str())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// The token part of a Bearer `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        assert_matches!(
            bearer_token(&HeaderMap::new()),
            Err(AppError::Core(CoreError::Unauthorized(msg))) if msg == "Missing Authorization header"
        );
    }

    #[test]
    fn other_schemes_and_empty_tokens_are_rejected() {
        assert_matches!(
            bearer_token(&headers("Basic dXNlcjpwYXNz")),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
        assert_matches!(
            bearer_token(&headers("Bearer ")),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
    }

    #[test]
    fn role_membership() {
        let user = AuthUser {
            user_id: 1,
            role: "data_manager".into(),
        };
        assert!(user.has_any_role(&["admin", "data_manager"]));
        assert!(!user.has_any_role(&["admin"]));
    }
}
