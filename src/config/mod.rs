use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub port: u16,
    pub frontend_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    #[serde(skip_serializing)]
    pub url: String,
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub connection_timeout: u64,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout)
    }
}

/// Admin credential and signing key. Fixed for the life of the process.
#[derive(Clone, Serialize)]
pub struct SecurityConfig {
    pub admin_username: String,
    #[serde(skip_serializing)]
    pub admin_password: String,
    #[serde(skip_serializing)]
    pub admin_secret: String,
    pub token_ttl_hours: u64,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .field("admin_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FRONTEND_DIR: &str = "../frontend/dist";
const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;
/// Ten years
const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365 * 10;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. `from_env` passes
    /// the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let mut database = DatabaseConfig::preset(environment);
        database.url = required(&lookup, "DATABASE_URL")?;
        if let Some(v) = parsed(&lookup, "DATABASE_MAX_CONNECTIONS")? {
            database.max_connections = v;
        }
        if let Some(v) = parsed(&lookup, "DATABASE_CONNECTION_TIMEOUT")? {
            database.connection_timeout = v;
        }

        let server = ServerConfig {
            port: parsed(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT),
            frontend_dir: lookup("FRONTEND_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FRONTEND_DIR)),
        };

        let security = SecurityConfig::from_lookup(&lookup, true)?;

        Ok(Self {
            environment,
            server,
            database,
            security,
        })
    }
}

impl DatabaseConfig {
    fn preset(environment: Environment) -> Self {
        let (max_connections, connection_timeout) = match environment {
            Environment::Development => (10, 30),
            Environment::Staging => (20, 10),
            Environment::Production => (50, 5),
        };
        Self {
            url: String::new(),
            max_connections,
            connection_timeout,
        }
    }
}

impl SecurityConfig {
    /// Signing-only view used by the CLI: the admin login pair is optional.
    pub fn signing_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| env::var(key).ok(), false)
    }

    fn from_lookup<F>(lookup: &F, require_login: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (admin_username, admin_password) = if require_login {
            (
                required(lookup, "ADMIN_USERNAME")?,
                required(lookup, "ADMIN_PASSWORD")?,
            )
        } else {
            (
                lookup("ADMIN_USERNAME").unwrap_or_default(),
                lookup("ADMIN_PASSWORD").unwrap_or_default(),
            )
        };

        let token_ttl_hours = parsed(lookup, "TOKEN_TTL_HOURS")?.unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        if token_ttl_hours == 0 || token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::Invalid {
                name: "TOKEN_TTL_HOURS",
                value: token_ttl_hours.to_string(),
            });
        }

        Ok(Self {
            admin_username,
            admin_password,
            admin_secret: required(lookup, "ADMIN_SECRET")?,
            token_ttl_hours,
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parsed<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
