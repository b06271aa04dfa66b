use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::utils::{api_url, error_message, output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Log in and print a bearer token")]
    Login {
        #[arg(long, env = "ADMIN_USERNAME", help = "Admin username")]
        username: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true, help = "Admin password")]
        password: String,
    },
}

pub async fn handle(cmd: AuthCommands, server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let response = reqwest::Client::new()
                .post(api_url(server, "/api/login"))
                .json(&json!({ "username": username, "password": password }))
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                output_error(output_format, &error_message(&body), Some(status.as_str()))?;
                anyhow::bail!("login failed with status {}", status);
            }

            let token = serde_json::from_str::<Value>(&body)?
                .get("token")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("login response did not include a token"))?;

            match output_format {
                OutputFormat::Json => output_success(output_format, "Logged in", Some(json!({ "token": token }))),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
    }
}
