// src/ingest/types.rs
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// A headline attributed to a source. Produced by the fetcher or the
/// simulated generator, consumed once by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    pub source: String,
    pub weight: f64,
    pub url: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Transport seam: GET a page and return its body.
/// Implementations must return `Err` for anything but HTTP 200.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}
