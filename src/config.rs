//! Environment-based configuration, loaded once at startup.

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::pinger::PingConfig;

/// Default liveness server port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Process configuration, read from the environment at boot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Messaging transport credential (`TOKEN`).
    pub token: SecretString,
    /// Backend submission URL (`BACKEND_URL`).
    pub backend_url: String,
    /// Liveness server bind port (`PORT`).
    pub port: u16,
    /// Periodic pinger settings, present only when both `PERIODIC_TASK_URL`
    /// and `ADMIN_KEY` are set.
    pub ping: Option<PingConfig>,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `TOKEN` and `BACKEND_URL` are required; their absence is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = require_env("TOKEN")?;
        let backend_url = require_env("BACKEND_URL")?;

        let port = match std::env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            token: SecretString::from(token),
            backend_url,
            port,
            ping: PingConfig::from_env(),
        })
    }
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key: "PORT".to_string(),
        message: format!("expected a port number, got {raw:?}"),
    })
}
