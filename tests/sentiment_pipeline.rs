// tests/sentiment_pipeline.rs
//
// Orchestrator behavior with an in-memory page fetcher and a manual clock.
//
// Covered:
// - simulated fallback when every source fails (deterministic per ticker)
// - cache hit within TTL (no refetch), recompute after TTL
// - real articles path (weights, dates, source count)
// - failures are reported, not cached

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ticker_sentiment::cache::SentimentCache;
use ticker_sentiment::clock::{Clock, ManualClock};
use ticker_sentiment::error::FetchError;
use ticker_sentiment::ingest::types::PageFetcher;
use ticker_sentiment::ingest::NewsFetcher;
use ticker_sentiment::sentiment::{PolarityScorer, VaderScorer};
use ticker_sentiment::sources::SourceRegistry;
use ticker_sentiment::{SentimentReport, SentimentService};

/// Canned pages by URL; everything else behaves like HTTP 500.
#[derive(Default)]
struct StubPages {
    calls: AtomicUsize,
    bodies: HashMap<String, String>,
}

impl StubPages {
    fn with(bodies: &[(&str, &str)]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            bodies: bodies
                .iter()
                .map(|(u, b)| (u.to_string(), b.to_string()))
                .collect(),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubPages {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 500,
        })
    }
}

struct NanScorer;

impl PolarityScorer for NanScorer {
    fn score_text(&self, _text: &str) -> f64 {
        f64::NAN
    }
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 9, 6, 9, 0, 0).unwrap(),
    ))
}

fn service_with(
    pages: Arc<StubPages>,
    scorer: Arc<dyn PolarityScorer>,
    clock: Arc<ManualClock>,
) -> SentimentService {
    let fetcher = NewsFetcher::new(Arc::new(SourceRegistry::default_seed()), pages);
    let cache = Arc::new(SentimentCache::new(3600, clock.clone()));
    SentimentService::new(fetcher, scorer, cache, clock, 10)
}

fn service(pages: Arc<StubPages>, clock: Arc<ManualClock>) -> SentimentService {
    service_with(pages, Arc::new(VaderScorer::new()), clock)
}

#[tokio::test]
async fn unreachable_sources_fall_back_to_simulated() {
    let pages = Arc::new(StubPages::default());
    let svc = service(pages.clone(), clock());

    let report = svc.get_sentiment("ZZZZ").await;
    let s = report.summary().expect("success report");

    assert_eq!(pages.calls(), 5, "one request per registered source");
    assert!(s.is_simulated);
    assert_eq!(s.articles.len(), 10);
    assert!((-1.0..=1.0).contains(&s.overall_sentiment));
    assert!(s.articles.iter().all(|a| a.source.starts_with("Simulated ")));
    assert!(s.articles.iter().all(|a| a.url == "#"));
    assert_eq!(s.distinct_source_count, 5);
}

#[tokio::test]
async fn simulated_report_is_reproducible_across_instances() {
    let a = service(Arc::new(StubPages::default()), clock())
        .get_sentiment("ZZZZ")
        .await;
    let b = service(Arc::new(StubPages::default()), clock())
        .get_sentiment("ZZZZ")
        .await;
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[tokio::test]
async fn second_call_within_ttl_is_served_from_cache() {
    let pages = Arc::new(StubPages::default());
    let clock = clock();
    let svc = service(pages.clone(), clock.clone());

    let first = svc.get_sentiment("MSFT").await;
    assert_eq!(pages.calls(), 5);

    clock.advance(Duration::seconds(3599));
    let second = svc.get_sentiment("MSFT").await;
    assert_eq!(pages.calls(), 5, "cache hit must not refetch");
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );

    clock.advance(Duration::seconds(1));
    let _third = svc.get_sentiment("MSFT").await;
    assert_eq!(pages.calls(), 10, "expired entry must be recomputed");
}

#[tokio::test]
async fn real_articles_are_weighted_and_dated() {
    let pages = Arc::new(StubPages::with(&[
        (
            "https://www.reuters.com/finance/stocks/AAPL",
            r#"<article><h2>Apple posts great quarter, shares surge</h2></article>
               <article><h3>Apple faces lawsuit over terrible battery failures</h3></article>"#,
        ),
        (
            "https://www.marketwatch.com/investing/stock/AAPL",
            r#"<div class="article__headline">Apple holds annual meeting</div>"#,
        ),
    ]));
    let clock = clock();
    let svc = service(pages, clock.clone());

    let report = svc.get_sentiment("AAPL").await;
    let s = report.summary().expect("success report");

    assert!(!s.is_simulated);
    assert_eq!(s.articles.len(), 3);
    assert_eq!(s.distinct_source_count, 2);
    assert_eq!(s.articles[0].source, "Reuters");
    assert_eq!(s.articles[2].source, "MarketWatch");
    assert!(s.articles[0].sentiment_score > 0.0);
    assert!(s.articles[1].sentiment_score < 0.0);

    let today: NaiveDate = clock.today();
    let dates: Vec<_> = s.articles.iter().map(|a| a.date).collect();
    assert_eq!(
        dates,
        vec![
            today,
            today - Duration::days(1),
            today - Duration::days(2)
        ]
    );
}

#[tokio::test]
async fn failures_are_reported_and_not_cached() {
    let pages = Arc::new(StubPages::default());
    let svc = service_with(pages.clone(), Arc::new(NanScorer), clock());

    let report = svc.get_sentiment("FAIL").await;
    match &report {
        SentimentReport::Failure { error } => assert!(error.contains("scoring failed")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(svc.cache().is_empty());

    let _again = svc.get_sentiment("FAIL").await;
    assert_eq!(pages.calls(), 10, "failure must not be served from cache");

    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["success"], false);
    assert!(v["error"].is_string());
}

#[tokio::test]
async fn concurrent_requests_for_same_ticker_agree() {
    let pages = Arc::new(StubPages::default());
    let svc = Arc::new(service(pages.clone(), clock()));

    let (a, b) = tokio::join!(svc.get_sentiment("DUP"), svc.get_sentiment("DUP"));
    assert_eq!(a, b);
    assert_eq!(svc.cache().len(), 1);
    // duplicate work is allowed, never more than one round per request
    assert!(pages.calls() == 5 || pages.calls() == 10);
}

#[tokio::test]
async fn article_cap_applies_to_simulated_fallback() {
    let clock = clock();
    let fetcher = NewsFetcher::new(
        Arc::new(SourceRegistry::default_seed()),
        Arc::new(StubPages::default()),
    );
    let cache = Arc::new(SentimentCache::new(3600, clock.clone()));
    let svc = SentimentService::new(fetcher, Arc::new(VaderScorer::new()), cache, clock, 3);

    let report = svc.get_sentiment("ZZZZ").await;
    let s = report.summary().expect("success report");
    assert!(s.is_simulated);
    assert_eq!(s.articles.len(), 3);
    assert_eq!(s.distinct_source_count, 3);
}

#[tokio::test]
async fn article_cap_keeps_real_articles_when_sources_are_up() {
    let page = r#"<article><h2>Shares steady</h2></article>"#;
    let pages = Arc::new(StubPages::with(&[
        ("https://finance.yahoo.com/quote/IBM/news", page),
        ("https://www.cnbc.com/quotes/IBM/", page),
        ("https://www.reuters.com/finance/stocks/IBM", page),
        ("https://www.bloomberg.com/quote/IBM", page),
        ("https://www.marketwatch.com/investing/stock/IBM", page),
    ]));
    let clock = clock();
    let fetcher = NewsFetcher::new(Arc::new(SourceRegistry::default_seed()), pages);
    let cache = Arc::new(SentimentCache::new(3600, clock.clone()));
    let svc = SentimentService::new(fetcher, Arc::new(VaderScorer::new()), cache, clock, 1);

    let report = svc.get_sentiment("IBM").await;
    let s = report.summary().expect("success report");
    assert!(!s.is_simulated);
    assert_eq!(s.articles.len(), 1);
    assert_eq!(s.articles[0].source, "Yahoo Finance");
}

#[tokio::test]
async fn malformed_ticker_is_rejected_before_fetching() {
    let pages = Arc::new(StubPages::default());
    let svc = service(pages.clone(), clock());

    for bad in ["AAPL/../admin", "MSFT?page=2", "IBM#top"] {
        let report = svc.get_sentiment(bad).await;
        match &report {
            SentimentReport::Failure { error } => assert!(error.contains("invalid ticker")),
            other => panic!("expected failure for {bad}, got {other:?}"),
        }
    }
    assert_eq!(pages.calls(), 0, "no source may be requested");
    assert!(svc.cache().is_empty());
}
