// handlers/protected/mod.rs - Handlers that act on behalf of the admin
//
// Reads on resources are open; writes only arrive here after the admin
// gate has verified the bearer token and attached an `AdminSession`.

pub mod auth;
pub mod resource;

pub use auth::*;
