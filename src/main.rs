use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use xc_team_api::app::{app, AppState};
use xc_team_api::config::AppConfig;
use xc_team_api::database::Database;

#[derive(Parser)]
#[command(name = "xc-team-api")]
#[command(about = "Cross-country team management API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Listen port (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Built frontend directory (overrides FRONTEND_DIR)")]
    frontend_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and the admin settings
    let _ = dotenvy::dotenv();

    xc_team_api::init_tracing("xc_team_api=info,tower_http=info");

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.frontend_dir {
        config.server.frontend_dir = dir;
    }
    tracing::info!("Starting XC Team API in {:?} mode", config.environment);

    let db = Database::connect(&config.database)
        .await
        .context("unable to connect to database")?;
    db.health_check().await.context("unable to ping database")?;
    tracing::info!("Connected to database");

    if !config.server.frontend_dir.is_dir() {
        tracing::warn!(
            "Frontend directory not found at {}",
            config.server.frontend_dir.display()
        );
    }

    let state = AppState::new(db.clone(), &config.security);
    let router = app(state, &config.server.frontend_dir);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
