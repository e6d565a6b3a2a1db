//! Authentication HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/auth/signup  - Register and open a session
//! - POST /api/v1/auth/signin  - Verify credentials and open a session
//! - POST /api/v1/auth/signout - Revoke the current session
//! - GET  /api/v1/auth/session - Resolve the current session's user

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use hearth_core::auth::IdentityProvider;
use hearth_types::auth::AuthSession;
use hearth_types::user::User;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/auth/signup - Register a new account.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequest>,
) -> Result<Json<ApiResponse<AuthSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    validate_credentials(&body.email, &body.password)?;

    let session = state
        .identity
        .sign_up(&body.email, body.full_name.as_deref(), &body.password)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", "/api/v1/auth/session");
    Ok(Json(resp))
}

/// POST /api/v1/auth/signin - Open a session for existing credentials.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInRequest>,
) -> Result<Json<ApiResponse<AuthSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session = state.identity.sign_in(&body.email, &body.password).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", "/api/v1/auth/session");
    Ok(Json(resp))
}

/// POST /api/v1/auth/signout - Revoke the caller's session.
///
/// Also drops the in-memory chat state manager, so nothing of the session
/// survives server-side.
pub async fn sign_out(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state.identity.sign_out(&current.token).await?;
    state.drop_manager(&current.user.id).await;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(serde_json::json!({"signed_out": true}), request_id, elapsed);
    Ok(Json(resp))
}

/// GET /api/v1/auth/session - The user behind the presented token.
pub async fn current_session(
    current: CurrentUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(current.user, request_id, elapsed)
        .with_link("self", "/api/v1/auth/session");
    Ok(Json(resp))
}
