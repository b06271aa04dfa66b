use clap::Subcommand;
use serde_json::Value;

use crate::cli::utils::{api_url, error_message, output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Check server health status from the /health endpoint")]
    Health,
}

pub async fn handle(cmd: ServerCommands, server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Health => {
            let response = reqwest::get(api_url(server, "/health")).await?;
            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                output_error(output_format, &error_message(&body), Some(status.as_str()))?;
                anyhow::bail!("server at {} is unhealthy", server);
            }

            let data = serde_json::from_str::<Value>(&body).ok();
            output_success(output_format, &format!("{} is healthy", server), data)
        }
    }
}
