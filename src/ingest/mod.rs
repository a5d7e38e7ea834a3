// src/ingest/mod.rs
//! Article fetcher: one concurrent GET per registered source, headline
//! extraction, per-source failure isolation.

pub mod extract;
pub mod http;
pub mod types;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::ingest::extract::{extract_headlines, MAX_PER_SOURCE};
use crate::ingest::types::{Article, PageFetcher};
use crate::sources::{Source, SourceRegistry};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_articles_fetched_total",
            "Headlines extracted from real news sources."
        );
        describe_counter!(
            "news_fetch_errors_total",
            "Per-source fetch failures (transport or non-200)."
        );
        describe_histogram!("news_fetch_ms", "Per-source fetch + parse time in milliseconds.");
    });
}

/// Fans a ticker out to every source in the registry.
#[derive(Clone)]
pub struct NewsFetcher {
    registry: Arc<SourceRegistry>,
    pages: Arc<dyn PageFetcher>,
}

impl NewsFetcher {
    pub fn new(registry: Arc<SourceRegistry>, pages: Arc<dyn PageFetcher>) -> Self {
        Self { registry, pages }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Fetch all sources concurrently and wait for every one of them.
    ///
    /// Failed sources contribute nothing. The merged list follows registry
    /// order and is truncated to `max_articles`. Never fails.
    pub async fn fetch_articles(&self, ticker: &str, max_articles: usize) -> Vec<Article> {
        ensure_metrics_described();

        let mut tasks = JoinSet::new();
        for (idx, source) in self.registry.list().iter().cloned().enumerate() {
            let pages = Arc::clone(&self.pages);
            let url = source.url_for(ticker);
            tasks.spawn(async move {
                let articles = fetch_from_source(pages.as_ref(), &source, &url).await;
                (idx, articles)
            });
        }

        let mut per_source: Vec<(usize, Vec<Article>)> = Vec::with_capacity(self.registry.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(done) => per_source.push(done),
                Err(e) => {
                    warn!(target: "fetch", error = %e, "fetch task aborted");
                    counter!("news_fetch_errors_total", "source" => "unknown").increment(1);
                }
            }
        }
        per_source.sort_by_key(|(idx, _)| *idx);

        let mut all: Vec<Article> = per_source.into_iter().flat_map(|(_, v)| v).collect();
        let found = all.len();
        all.truncate(max_articles);

        info!(target: "fetch", %ticker, found, kept = all.len(), "news fetch finished");
        all
    }
}

async fn fetch_from_source(pages: &dyn PageFetcher, source: &Source, url: &str) -> Vec<Article> {
    let t0 = std::time::Instant::now();
    debug!(target: "fetch", source = %source.display_name, %url, "fetching");

    let body = match pages.fetch_page(url).await {
        Ok(b) => b,
        Err(e) => {
            warn!(
                target: "fetch",
                source = %source.display_name,
                %url,
                error = %e,
                "source unavailable"
            );
            counter!("news_fetch_errors_total", "source" => source.display_name.clone())
                .increment(1);
            return Vec::new();
        }
    };

    let headlines = extract_headlines(&body, MAX_PER_SOURCE);
    histogram!("news_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    if headlines.is_empty() {
        debug!(target: "fetch", source = %source.display_name, "no headline elements matched");
        return Vec::new();
    }
    counter!("news_articles_fetched_total").increment(headlines.len() as u64);

    headlines
        .into_iter()
        .map(|headline| Article {
            headline,
            source: source.display_name.clone(),
            weight: source.weight,
            url: url.to_string(),
            date: None,
        })
        .collect()
}
