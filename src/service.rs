//! # Sentiment Service
//! The single public operation: "get sentiment for ticker".
//!
//! Cache → fetch (all sources in parallel) → simulated fallback when nothing
//! was found → weighted scoring → cache write. Failures become a
//! `success: false` report and are never cached.

use metrics::counter;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::SentimentCache;
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::error::SentimentError;
use crate::ingest::http::HttpPageFetcher;
use crate::ingest::NewsFetcher;
use crate::report::{SentimentReport, SentimentSummary};
use crate::scoring::score_articles;
use crate::sentiment::{PolarityScorer, VaderScorer};
use crate::sources::{is_valid_ticker, SourceRegistry};
use crate::synthetic::generate_articles;

pub struct SentimentService {
    fetcher: NewsFetcher,
    scorer: Arc<dyn PolarityScorer>,
    cache: Arc<SentimentCache>,
    clock: Arc<dyn Clock>,
    max_articles: usize,
}

impl SentimentService {
    pub fn new(
        fetcher: NewsFetcher,
        scorer: Arc<dyn PolarityScorer>,
        cache: Arc<SentimentCache>,
        clock: Arc<dyn Clock>,
        max_articles: usize,
    ) -> Self {
        Self {
            fetcher,
            scorer,
            cache,
            clock,
            max_articles,
        }
    }

    /// Production wiring: reqwest fetcher, VADER scorer, cache with the configured TTL.
    pub fn from_config(
        cfg: &AppConfig,
        registry: SourceRegistry,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        let pages = HttpPageFetcher::new(cfg.fetch_timeout)?;
        let fetcher = NewsFetcher::new(Arc::new(registry), Arc::new(pages));
        let cache = Arc::new(SentimentCache::new(cfg.cache_ttl_secs, clock.clone()));
        Ok(Self::new(
            fetcher,
            Arc::new(VaderScorer::new()),
            cache,
            clock,
            cfg.max_articles,
        ))
    }

    pub fn cache(&self) -> &SentimentCache {
        &self.cache
    }

    /// Always returns a well-formed report.
    pub async fn get_sentiment(&self, ticker: &str) -> SentimentReport {
        if let Some(hit) = self.cache.get(ticker) {
            info!(target: "sentiment", %ticker, "serving cached sentiment");
            return hit;
        }

        match self.compute(ticker).await {
            Ok(summary) => {
                let report = SentimentReport::Success(summary);
                self.cache.put(ticker, report.clone());
                report
            }
            Err(e) => {
                warn!(target: "sentiment", %ticker, error = %e, "sentiment analysis failed");
                counter!("sentiment_failures_total").increment(1);
                SentimentReport::failure(e.to_string())
            }
        }
    }

    async fn compute(&self, ticker: &str) -> Result<SentimentSummary, SentimentError> {
        if !is_valid_ticker(ticker) {
            return Err(SentimentError::InvalidTicker(ticker.to_string()));
        }
        let today = self.clock.today();

        let mut articles = self.fetcher.fetch_articles(ticker, self.max_articles).await;
        if articles.is_empty() {
            info!(
                target: "sentiment",
                %ticker,
                sources = self.fetcher.registry().len(),
                "no real articles found, generating simulated ones"
            );
            counter!("sentiment_simulated_total").increment(1);
            articles = generate_articles(ticker, today);
            articles.truncate(self.max_articles);
        } else {
            info!(target: "sentiment", %ticker, articles = articles.len(), "found real articles");
        }

        let summary = score_articles(articles, self.scorer.as_ref(), today)?;
        info!(
            target: "sentiment",
            %ticker,
            overall = summary.overall_sentiment,
            simulated = summary.is_simulated,
            sources = summary.distinct_source_count,
            "sentiment computed"
        );
        Ok(summary)
    }
}
