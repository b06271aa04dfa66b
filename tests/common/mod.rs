#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use reqwest::StatusCode;
use serde_json::Value;
use tower::ServiceExt;

use xc_team_api::app::{app, AppState};
use xc_team_api::auth::TokenAuthority;
use xc_team_api::config::{DatabaseConfig, SecurityConfig};
use xc_team_api::database::Database;

pub const ADMIN_USERNAME: &str = "coach";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const ADMIN_SECRET: &str = "integration-test-secret";

pub fn security() -> SecurityConfig {
    SecurityConfig {
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        admin_secret: ADMIN_SECRET.to_string(),
        token_ttl_hours: 24,
    }
}

pub fn admin_token() -> String {
    TokenAuthority::new(&security()).issue(ADMIN_USERNAME)
}

/// Router wired to a pool that never connects. Anything that reaches the
/// datastore fails, so a passing request proves it was answered earlier.
pub fn offline_router(frontend_dir: &Path) -> Router {
    let database = DatabaseConfig {
        url: "postgres://xc:xc@127.0.0.1:1/xc".to_string(),
        max_connections: 1,
        connection_timeout: 1,
    };
    let db = Database::connect_lazy(&database).expect("lazy pool");
    app(AppState::new(db, &security()), frontend_dir)
}

/// Scratch frontend directory with an `index.html`, unique per test
pub fn frontend_fixture(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("xc-team-api-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).expect("create frontend dir");
    std::fs::write(dir.join("index.html"), "<!doctype html><title>XC Team</title>")
        .expect("write index.html");
    dir
}

pub async fn send(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.expect("router is infallible")
}

pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).expect("json body")
}

/// Connection string for end-to-end tests, or `None` to skip them
pub fn test_database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.is_empty() => Some(url),
        _ => {
            eprintln!("TEST_DATABASE_URL not set; skipping end-to-end test");
            None
        }
    }
}

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub fn spawn(database_url: &str, frontend_dir: &Path) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_xc-team-api"))
            .env("PORT", port.to_string())
            .env("DATABASE_URL", database_url)
            .env("ADMIN_USERNAME", ADMIN_USERNAME)
            .env("ADMIN_PASSWORD", ADMIN_PASSWORD)
            .env("ADMIN_SECRET", ADMIN_SECRET)
            .env("FRONTEND_DIR", frontend_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/health", self.base_url);

        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
