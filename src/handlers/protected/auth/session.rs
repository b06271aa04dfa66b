use axum::Json;

use crate::middleware::AdminSession;

/// GET /api/session - Describe the admin behind the presented bearer token
///
/// Expected Output:
/// ```json
/// { "username": "admin", "expires_at": 1735689600 }
/// ```
///
/// A missing, malformed, forged or expired token yields 401.
pub async fn session_get(session: AdminSession) -> Json<AdminSession> {
    Json(session)
}
