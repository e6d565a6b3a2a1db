//! Bearer token authentication extractor.
//!
//! Extracts the session token from the `Authorization: Bearer <token>`
//! header and resolves it through the identity provider. Extraction fails
//! with 401 when the header is missing, malformed, or the session is
//! unknown or expired.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use hearth_core::auth::IdentityProvider;
use hearth_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated caller. Extracting this validates the session token.
pub struct CurrentUser {
    pub user: User,
    /// The raw bearer token, kept so sign-out can revoke it.
    pub token: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts)?;

        let user = state
            .identity
            .current_session(&token)
            .await
            .map_err(|e| AppError::Internal(format!("Session lookup failed: {e}")))?
            .ok_or_else(|| {
                AppError::Unauthorized("Session expired or unknown. Sign in again.".to_string())
            })?;

        Ok(CurrentUser { user, token })
    }
}

/// Extract the session token from request headers.
fn extract_bearer_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(AppError::Unauthorized(
        "Missing session token. Provide via 'Authorization: Bearer <token>' header.".to_string(),
    ))
}
