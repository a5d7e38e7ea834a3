//! Ticker Sentiment Service: binary entrypoint.
//! Loads configuration, installs tracing and metrics, and serves the Axum router.

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ticker_sentiment::clock::SystemClock;
use ticker_sentiment::config::AppConfig;
use ticker_sentiment::sources::SourceRegistry;
use ticker_sentiment::{create_router, AppState, SentimentService};

/// Compact logs by default; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ticker_sentiment=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AppConfig::from_env().context("loading configuration")?;

    // Recorder first so the cache TTL gauge lands in it.
    let metrics = if cfg.metrics_enabled {
        Some(ticker_sentiment::telemetry::install()?)
    } else {
        None
    };

    let registry = SourceRegistry::load_default().context("loading news sources")?;
    tracing::info!(sources = registry.len(), "news sources loaded");

    let service = SentimentService::from_config(&cfg, registry, Arc::new(SystemClock))?;
    let app = create_router(AppState::new(service), metrics);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;
    tracing::info!(addr = %cfg.bind_addr, "sentiment api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
