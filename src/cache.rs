//! # Result Cache
//! In-memory, per-ticker cache of successful reports with an absolute TTL.
//!
//! - Lazy expiry: a stale entry is treated as absent on read, never swept.
//! - `put` replaces the whole entry; concurrent writers for the same ticker
//!   simply race and the last write wins.
//! - Clock is injected so tests can assert expiry deterministically.

use chrono::{DateTime, Duration, Utc};
use metrics::{counter, gauge};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::clock::Clock;
use crate::report::SentimentReport;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
struct CacheEntry {
    inserted_at: DateTime<Utc>,
    report: SentimentReport,
}

pub struct SentimentCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl SentimentCache {
    pub fn new(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        gauge!("sentiment_cache_ttl_secs").set(ttl_secs as f64);
        Self {
            ttl: Duration::try_seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX))
                .unwrap_or(Duration::MAX),
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fresh report for `ticker`, or `None` if missing or at least TTL old.
    pub fn get(&self, ticker: &str) -> Option<SentimentReport> {
        let now = self.clock.now();
        let entries = self.entries.read();
        let hit = entries
            .get(ticker)
            .filter(|e| now.signed_duration_since(e.inserted_at) < self.ttl)
            .map(|e| e.report.clone());

        if hit.is_some() {
            counter!("sentiment_cache_hits_total").increment(1);
            debug!(target: "cache", %ticker, "hit");
        } else {
            counter!("sentiment_cache_misses_total").increment(1);
            debug!(target: "cache", %ticker, "miss");
        }
        hit
    }

    /// Store `report`, replacing any previous entry for `ticker`.
    pub fn put(&self, ticker: &str, report: SentimentReport) {
        let entry = CacheEntry {
            inserted_at: self.clock.now(),
            report,
        };
        self.entries.write().insert(ticker.to_string(), entry);
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
