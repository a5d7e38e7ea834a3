// src/error.rs
//! Domain errors. Per-source fetch failures never leave the fetcher; only
//! `SentimentError` can reach the orchestrator boundary.

use thiserror::Error;

/// Failure of a single page fetch. Absorbed by the fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failures that prevent producing any report at all.
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("scoring failed: {0}")]
    Scoring(String),

    #[error("invalid ticker symbol: {0:?}")]
    InvalidTicker(String),
}

/// Registry/config validation problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("source '{name}': url template must contain exactly one {{ticker}} slot")]
    TemplateSlot { name: String },

    #[error("source '{name}': weight must be finite and > 0 (got {weight})")]
    Weight { name: String, weight: f64 },

    #[error("source entry with empty display name")]
    EmptyName,

    #[error("unsupported sources file format")]
    Format,

    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}
