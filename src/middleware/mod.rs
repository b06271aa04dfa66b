pub mod auth;
pub mod cors;

pub use auth::{require_admin_middleware, AdminSession};
pub use cors::cors_middleware;
