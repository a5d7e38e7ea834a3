// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod ingest;
pub mod telemetry;
pub mod report;
pub mod scoring;
pub mod sentiment;
pub mod service;
pub mod sources;
pub mod synthetic;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::report::{ScoredArticle, SentimentReport, SentimentSummary};
pub use crate::service::SentimentService;
