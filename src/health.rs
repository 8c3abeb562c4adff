//! Liveness endpoint for uptime checks.

use axum::Router;
use axum::routing::get;
use tokio::task::JoinHandle;

/// Fixed response body confirming the process is running.
pub const ALIVE_BODY: &str = "Intake bot is alive";

async fn alive() -> &'static str {
    ALIVE_BODY
}

/// Build the liveness routes: `GET /` returns a fixed body.
pub fn liveness_routes() -> Router {
    Router::new().route("/", get(alive))
}

/// Serve the liveness endpoint on `0.0.0.0:port` in a background task.
pub fn spawn_liveness_server(port: u16) -> JoinHandle<()> {
    tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
            .await
            .expect("Failed to bind liveness server port");
        tracing::info!(port, "Liveness server started");
        axum::serve(listener, liveness_routes()).await.ok();
    })
}
