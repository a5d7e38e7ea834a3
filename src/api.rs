use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::report::SentimentReport;
use crate::service::SentimentService;

pub const DEFAULT_TICKER: &str = "AAPL";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SentimentService>,
}

impl AppState {
    pub fn new(service: SentimentService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// `/metrics` is mounted only when a recorder handle is supplied.
pub fn create_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(health))
        .route("/api/sentiment", get(sentiment))
        .with_state(state);

    if let Some(handle) = metrics {
        router = router.route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        );
    }

    router.layer(CorsLayer::very_permissive())
}

#[derive(Deserialize)]
struct SentimentQuery {
    #[serde(default)]
    ticker: Option<String>,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn sentiment(
    State(state): State<AppState>,
    Query(q): Query<SentimentQuery>,
) -> Json<SentimentReport> {
    let ticker = normalize_ticker(q.ticker.as_deref());
    Json(state.service.get_sentiment(&ticker).await)
}

/// Trimmed, upper-cased; blank or missing falls back to `AAPL`.
/// Symbol shape is checked by the service.
pub fn normalize_ticker(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_ascii_uppercase(),
        _ => DEFAULT_TICKER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_normalization() {
        assert_eq!(normalize_ticker(None), "AAPL");
        assert_eq!(normalize_ticker(Some("   ")), "AAPL");
        assert_eq!(normalize_ticker(Some(" msft ")), "MSFT");
        assert_eq!(normalize_ticker(Some("brk.b")), "BRK.B");
    }
}
