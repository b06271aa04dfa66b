// handlers/mod.rs - Two-tier handler layout
//
// Public (no token) → Protected (token for writes, see middleware::auth)

pub mod protected;
pub mod public;

pub use protected::session_get;
pub use public::{health_get, login_post};

use crate::error::ApiError;

/// Fallback for any method a route does not serve
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
