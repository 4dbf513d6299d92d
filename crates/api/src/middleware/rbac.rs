//! Role gates for the import endpoints.
//!
//! Each extractor authenticates through [`AuthUser`] first, so a missing or
//! bad token is still a 401; a valid token with the wrong role is a 403.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use eyetask_core::error::CoreError;
use eyetask_core::roles::{ROLE_ADMIN, ROLE_DATA_MANAGER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Roles allowed to write imported tasks.
pub const IMPORTER_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_DATA_MANAGER];

/// Only `admin`. Guards the dry-run endpoint.
pub struct RequireAdmin(pub AuthUser);

/// `admin` or `data_manager`. Guards the import endpoint.
pub struct RequireImporter(pub AuthUser);

async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[&str],
    message: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !user.has_any_role(allowed) {
        tracing::info!(user_id = user.user_id, role = %user.role, "Role not permitted");
        return Err(AppError::Core(CoreError::Forbidden(message.to_string())));
    }
    Ok(user)
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[ROLE_ADMIN], "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

impl FromRequestParts<AppState> for RequireImporter {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(
            parts,
            state,
            IMPORTER_ROLES,
            "Admin or Data Manager role required",
        )
        .await
        .map(RequireImporter)
    }
}
