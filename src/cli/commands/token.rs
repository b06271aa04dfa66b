use clap::Subcommand;
use serde_json::json;

use crate::auth::{AuthError, TokenAuthority};
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::SecurityConfig;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Mint an admin token signed with ADMIN_SECRET")]
    Issue {
        #[arg(help = "Username embedded in the token")]
        username: String,
    },

    #[command(about = "Check a token's signature and expiry against ADMIN_SECRET")]
    Verify {
        #[arg(help = "Token, without the 'Bearer ' prefix")]
        token: String,
    },
}

pub fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = SecurityConfig::signing_from_env()?;
    let authority = TokenAuthority::new(&security);

    match cmd {
        TokenCommands::Issue { username } => {
            let token = authority.issue(&username);
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "token": token }))?),
                OutputFormat::Text => println!("{}", token),
            }
            Ok(())
        }
        TokenCommands::Verify { token } => match authority.verify(&token) {
            Ok(claims) => output_success(
                output_format,
                &format!("Valid token for '{}' (expires at {})", claims.username, claims.expires_at),
                Some(json!({ "username": claims.username, "expires_at": claims.expires_at })),
            ),
            Err(err) => {
                output_error(output_format, &err.to_string(), Some(error_code(err)))?;
                anyhow::bail!("token rejected")
            }
        },
    }
}

fn error_code(err: AuthError) -> &'static str {
    match err {
        AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
        AuthError::Malformed => "MALFORMED",
        AuthError::InvalidSignature => "INVALID_SIGNATURE",
        AuthError::Expired => "EXPIRED",
    }
}
