//! Periodic pinger — a fixed-interval authenticated GET, independent of
//! any conversation activity.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tokio::task::JoinHandle;

/// Interval between pings.
pub const PING_INTERVAL: Duration = Duration::from_secs(2700);

/// Header carrying the admin credential.
const ADMIN_KEY_HEADER: &str = "admin-key";

/// Periodic pinger settings.
#[derive(Debug, Clone)]
pub struct PingConfig {
    /// Target URL (`PERIODIC_TASK_URL`).
    pub url: String,
    /// Credential sent in the `admin-key` header (`ADMIN_KEY`).
    pub admin_key: SecretString,
    /// Time between pings.
    pub interval: Duration,
}

impl PingConfig {
    /// Read the pinger settings from the environment. Returns `None` unless
    /// both `PERIODIC_TASK_URL` and `ADMIN_KEY` are set.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("PERIODIC_TASK_URL")
            .ok()
            .filter(|v| !v.is_empty())?;
        let admin_key = std::env::var("ADMIN_KEY").ok().filter(|v| !v.is_empty())?;
        Some(Self {
            url,
            admin_key: SecretString::from(admin_key),
            interval: PING_INTERVAL,
        })
    }
}

/// Spawn the ping loop. Runs for the lifetime of the process; failures are
/// logged and the loop continues.
pub fn spawn_pinger(config: PingConfig) -> JoinHandle<()> {
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut tick = tokio::time::interval(config.interval);

        tracing::info!(
            url = %config.url,
            interval_secs = config.interval.as_secs(),
            "Periodic pinger started"
        );

        loop {
            tick.tick().await;
            ping_once(&client, &config).await;
        }
    })
}

/// Run a single ping cycle.
async fn ping_once(client: &reqwest::Client, config: &PingConfig) {
    let result = client
        .get(&config.url)
        .header(ADMIN_KEY_HEADER, config.admin_key.expose_secret())
        .send()
        .await;

    match result {
        Ok(resp) => {
            tracing::info!(url = %config.url, status = %resp.status(), "Ping completed");
        }
        Err(e) => {
            tracing::warn!(url = %config.url, "Ping failed: {e}");
        }
    }
}
