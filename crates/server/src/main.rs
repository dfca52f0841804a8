//! HTTP boundary for the extraction engine.
//!
//! `POST /extract` answers the `GET_ARTICLE_TEXT` message for a posted page,
//! `POST /summarize` extracts and summarizes it, `GET /health` reports liveness.

use anyhow::Context;
use precis_core::{ExtractConfig, GeminiClient, Settings, SummaryConfig};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;

use config::ServerConfig;
use routes::{AppState, router};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("precis_server=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env()?;
    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "settings unavailable, using defaults");
        Settings::default()
    });

    let api_key = settings.resolve_api_key().ok();
    if api_key.is_none() {
        tracing::info!("no server API key configured, clients must send x-api-key");
    }

    let client = GeminiClient::new(settings.apply(SummaryConfig::default())).context("Failed to build API client")?;
    let state = AppState::new(ExtractConfig::default(), client, api_key);
    let app = router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;

    tracing::info!(addr = %config.addr, timeout_secs = config.request_timeout.as_secs(), "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
