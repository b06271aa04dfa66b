use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::auth::TokenAuthority;
use crate::config::SecurityConfig;
use crate::database::models::{Athlete, Coach, FutureMeet, Meet, RaceResult};
use crate::database::Database;
use crate::handlers::{self, protected::resource::resource};
use crate::middleware::{cors_middleware, require_admin_middleware};

/// Shared, read-only per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub authority: Arc<TokenAuthority>,
}

impl AppState {
    pub fn new(db: Database, security: &SecurityConfig) -> Self {
        Self {
            db,
            authority: Arc::new(TokenAuthority::new(security)),
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<TokenAuthority> {
    fn from_ref(state: &AppState) -> Self {
        state.authority.clone()
    }
}

/// Full application router.
///
/// Layering, outermost first: tracing → CORS (answers OPTIONS) → admin gate
/// (entity routes only) → handler. Paths no route claims are served from
/// `frontend_dir`, with `index.html` standing in for unknown paths.
pub fn app(state: AppState, frontend_dir: &Path) -> Router {
    let spa = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(frontend_dir.join("index.html")));

    Router::new()
        // Public
        .route("/health", get(handlers::health_get).fallback(handlers::method_not_allowed))
        .route("/api/health", get(handlers::health_get).fallback(handlers::method_not_allowed))
        .route("/api/login", post(handlers::login_post).fallback(handlers::method_not_allowed))
        .route("/api/session", get(handlers::session_get).fallback(handlers::method_not_allowed))
        // Entity resources (writes gated)
        .merge(resource_routes(state.clone()))
        // Built frontend with SPA fallback
        .fallback_service(spa)
        // Global middleware
        .layer(from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn resource_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/athletes", resource::<Athlete>())
        .route("/api/meets", resource::<Meet>())
        .route("/api/future-meets", resource::<FutureMeet>())
        .route("/api/results", resource::<RaceResult>())
        .route("/api/coaches", resource::<Coach>())
        .route_layer(from_fn_with_state(state, require_admin_middleware))
}
