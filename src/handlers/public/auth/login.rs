// handlers/public/auth/login.rs - POST /api/login handler

use axum::{extract::State, response::Json, Form};
use serde::Serialize;

use crate::api::LoginForm;
use crate::app::AppState;
use crate::auth::issue_token;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub token: String,
}

/// POST /api/login - Authenticate user and receive JWT token
///
/// Expected Input (form-url-encoded): `username`, `password`
///
/// Expected Output (Success, 200):
/// ```json
/// { "username": "alice", "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Failure (401): `{ "error": "Could not authenticate user", "code": "UNAUTHORIZED" }`
pub async fn login_post(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(username), Some(password)) = (form.username, form.password) else {
        return Err(ApiError::unauthorized("Could not authenticate user"));
    };

    let authenticated = state.users.authenticate(&username, &password).await?;
    if !authenticated {
        tracing::warn!("Failed login attempt for '{}'", username);
        return Err(ApiError::unauthorized("Could not authenticate user"));
    }

    let token = issue_token(&state.config.security, &username)?;
    tracing::info!("User '{}' logged in", username);

    Ok(Json(LoginResponse { username, token }))
}
