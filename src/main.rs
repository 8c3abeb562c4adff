use std::sync::Arc;

use intake_bot::backend::HttpSubmitter;
use intake_bot::channels::{Channel, TelegramChannel};
use intake_bot::config::Config;
use intake_bot::intake::{Dispatcher, IntakeEngine};
use intake_bot::{health, pinger};
use secrecy::ExposeSecret;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  required: TOKEN, BACKEND_URL");
        std::process::exit(1);
    });

    eprintln!("🤖 Intake Bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Liveness: http://0.0.0.0:{}/", config.port);
    eprintln!("   Backend: {}", config.backend_url);

    // ── Liveness server ──────────────────────────────────────────────────
    let _liveness = health::spawn_liveness_server(config.port);

    // ── Periodic pinger ──────────────────────────────────────────────────
    match config.ping.clone() {
        Some(ping) => {
            eprintln!("   Pinger: every {}s → {}", ping.interval.as_secs(), ping.url);
            let _pinger = pinger::spawn_pinger(ping);
        }
        None => {
            if std::env::var("PERIODIC_TASK_URL").is_ok() || std::env::var("ADMIN_KEY").is_ok() {
                tracing::warn!(
                    "Pinger disabled: PERIODIC_TASK_URL and ADMIN_KEY must both be set"
                );
            }
            eprintln!("   Pinger: disabled");
        }
    }

    // ── Conversation engine over Telegram ────────────────────────────────
    let submitter = Arc::new(HttpSubmitter::new(config.backend_url.clone()));
    let engine = Arc::new(IntakeEngine::new(submitter));
    let channel: Arc<dyn Channel> =
        Arc::new(TelegramChannel::new(config.token.expose_secret().to_string()));

    if let Err(e) = channel.health_check().await {
        tracing::warn!("Telegram health check failed: {e}");
    }

    eprintln!("   Channel: telegram\n");

    Dispatcher::new(engine, channel).run().await?;

    Ok(())
}
