// handlers/public/auth/login.rs - POST /api/login handler

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::TokenAuthority;
use crate::error::ApiError;

/// Absent fields decode as empty strings and simply fail the credential check.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/login - Exchange the admin credential pair for a bearer token
///
/// Expected Input:
/// ```json
/// { "username": "admin", "password": "..." }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "admin:1735689600.9f86d081884c7d65..." }
/// ```
///
/// Errors: 400 when the body is not JSON, 401 on any credential mismatch.
pub async fn login_post(
    State(authority): State<Arc<TokenAuthority>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::bad_request("Invalid request body"))?;

    match authority.authenticate(&request.username, &request.password) {
        Ok(token) => {
            tracing::info!("Admin login succeeded for '{}'", request.username);
            Ok(Json(LoginResponse { token }))
        }
        Err(err) => {
            tracing::warn!("Admin login failed for '{}'", request.username);
            Err(err.into())
        }
    }
}
