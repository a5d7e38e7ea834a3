//! # Simulated Articles
//!
//! Deterministic fallback used when no real source produced a headline.
//! Everything is derived from the ticker: a seed in `[0, 100)` from SHA-256,
//! a call-scoped `StdRng`, and a fixed pool of fifteen templates
//! (five positive, five negative, five neutral). Same ticker and same "today"
//! always give the same headlines, dates, and order.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::ingest::types::Article;

/// Prefix carried by every simulated source name.
pub const SIMULATED_MARKER: &str = "Simulated";

/// Below real-source weights: simulated data is low confidence.
pub const SIMULATED_WEIGHT: f64 = 0.8;

const MAX_SIMULATED: usize = 10;
const LOOKBACK_DAYS: i64 = 14;

const SIMULATED_OUTLETS: [&str; 5] = [
    "Yahoo Finance",
    "CNBC",
    "MarketWatch",
    "Reuters",
    "Bloomberg",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Positive,
    Negative,
    Neutral,
}

const TEMPLATES: [(Tone, &str); 15] = [
    (Tone::Positive, "Analysts upgrade {ticker} citing strong growth potential"),
    (Tone::Positive, "{ticker} exceeds quarterly earnings expectations by 15%"),
    (Tone::Positive, "New partnership announced for {ticker}, stock rallies"),
    (Tone::Positive, "{ticker} expands into new markets, investors optimistic"),
    (Tone::Positive, "Why {ticker} could be a top pick for 2023"),
    (Tone::Negative, "Investors concerned about {ticker}'s market position"),
    (Tone::Negative, "{ticker} misses revenue targets, shares drop"),
    (Tone::Negative, "Regulatory challenges ahead for {ticker}, analysts warn"),
    (Tone::Negative, "Competition threatens {ticker}'s core business"),
    (Tone::Negative, "{ticker} cuts guidance, citing economic headwinds"),
    (Tone::Neutral, "{ticker} reports Q2 results in line with expectations"),
    (Tone::Neutral, "Market awaits {ticker}'s upcoming product announcement"),
    (Tone::Neutral, "{ticker} maintains steady performance amid market fluctuations"),
    (Tone::Neutral, "What to watch for in {ticker}'s upcoming earnings"),
    (Tone::Neutral, "{ticker} restructures operations, impact unclear"),
];

/// True for source names produced by this module.
pub fn is_simulated_source(name: &str) -> bool {
    name.starts_with(SIMULATED_MARKER)
}

/// Stable seed in `[0, 100)`.
pub fn ticker_seed(ticker: &str) -> u64 {
    let digest = Sha256::digest(ticker.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head) % 100
}

/// Sampling weight per tone. `bias` in `[-0.5, 0.5)` never makes a weight
/// non-positive.
fn tone_weight(tone: Tone, bias: f64) -> f64 {
    match tone {
        Tone::Positive => 1.0 + bias,
        Tone::Negative => 1.0 - bias,
        Tone::Neutral => 1.0,
    }
}

/// Up to ten simulated articles for `ticker`, newest first.
pub fn generate_articles(ticker: &str, today: NaiveDate) -> Vec<Article> {
    let seed = ticker_seed(ticker);
    let bias = (seed as f64 - 50.0) / 100.0;
    let mut rng = StdRng::seed_from_u64(seed);

    let count = MAX_SIMULATED.min(TEMPLATES.len());
    let picked = match index::sample_weighted(
        &mut rng,
        TEMPLATES.len(),
        |i| tone_weight(TEMPLATES[i].0, bias),
        count,
    ) {
        Ok(iv) => iv.into_vec(),
        Err(_) => index::sample(&mut rng, TEMPLATES.len(), count).into_vec(),
    };

    let mut days_ago: Vec<i64> = (0..picked.len())
        .map(|_| rng.random_range(0..=LOOKBACK_DAYS))
        .collect();
    days_ago.sort_unstable();

    picked
        .into_iter()
        .zip(days_ago)
        .enumerate()
        .map(|(i, (tpl, ago))| Article {
            headline: TEMPLATES[tpl].1.replace("{ticker}", ticker),
            source: format!(
                "{SIMULATED_MARKER} {}",
                SIMULATED_OUTLETS[i % SIMULATED_OUTLETS.len()]
            ),
            weight: SIMULATED_WEIGHT,
            url: "#".to_string(),
            date: Some(today - Duration::days(ago)),
        })
        .collect()
}
