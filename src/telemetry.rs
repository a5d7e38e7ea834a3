// src/telemetry.rs
//! Prometheus recorder wiring. Fetch-level series are described in `ingest`;
//! cache and pipeline series here.

use anyhow::{Context, Result};
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// Install the global recorder. Fails if one is already installed.
pub fn install() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("prometheus: install recorder")?;
    describe_pipeline_metrics();
    Ok(handle)
}

pub fn describe_pipeline_metrics() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("sentiment_cache_hits_total", "Reports served from cache.");
        describe_counter!(
            "sentiment_cache_misses_total",
            "Cache lookups that were missing or stale."
        );
        describe_counter!(
            "sentiment_simulated_total",
            "Requests that fell back to simulated articles."
        );
        describe_counter!(
            "sentiment_failures_total",
            "Requests that ended in a failure report."
        );
        describe_gauge!("sentiment_cache_ttl_secs", "Configured cache TTL in seconds.");
    });
}
