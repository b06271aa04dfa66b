// handlers/public/mod.rs - Public handlers (no token required)
//
// Health probes and token acquisition. Nothing here passes through the
// admin gate.

pub mod auth;
pub mod health;

pub use auth::*;
pub use health::health_get;
