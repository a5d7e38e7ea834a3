//! # Source Registry
//!
//! Static table of news sources queried for every ticker. Each source has a
//! URL template with a single `{ticker}` slot, a display name that ends up in
//! the report, a reliability class, and a positive weight used by the scorer.
//!
//! - Built-in `default_seed()` with the five reference outlets.
//! - Optional override from TOML (`[[sources]]`) or JSON (array) files.
//! - Resolution: `$SENTIMENT_SOURCES_PATH` → `config/sources.toml`
//!   → `config/sources.json` → built-in seed.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const ENV_SOURCES_PATH: &str = "SENTIMENT_SOURCES_PATH";
pub const TICKER_SLOT: &str = "{ticker}";
pub const MAX_TICKER_LEN: usize = 12;

/// Short exchange symbol: ASCII letters/digits plus `.` and `-`
/// (`BRK.B`, `RDS-A`). Anything else could rewrite the request URL.
pub fn is_valid_ticker(ticker: &str) -> bool {
    !ticker.is_empty()
        && ticker.len() <= MAX_TICKER_LEN
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reliability {
    Reliable,
    #[serde(alias = "highly_reliable")]
    HighlyReliable,
}

/// One news outlet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub domain: String,
    pub url_template: String,
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(alias = "class")]
    pub reliability: Reliability,
    pub weight: f64,
}

impl Source {
    /// Request URL for `ticker`.
    pub fn url_for(&self, ticker: &str) -> String {
        self.url_template.replacen(TICKER_SLOT, ticker, 1)
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.display_name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.url_template.matches(TICKER_SLOT).count() != 1 {
            return Err(ConfigError::TemplateSlot {
                name: self.display_name.clone(),
            });
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(ConfigError::Weight {
                name: self.display_name.clone(),
                weight: self.weight,
            });
        }
        Ok(())
    }
}

/// Read-only set of sources, built once at start-up.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    /// Build from an explicit list, validating every entry.
    pub fn new(sources: Vec<Source>) -> Result<Self> {
        for s in &sources {
            s.validate()?;
        }
        Ok(Self { sources })
    }

    pub fn list(&self) -> &[Source] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Load from a TOML or JSON file; the extension picks the parser first.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading sources from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let sources = parse_sources(&content, ext.as_str())
            .with_context(|| format!("parsing sources from {}", path.display()))?;
        Self::new(sources)
    }

    /// Env var first, then `config/` files, then the built-in seed.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_SOURCES_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from_file(&pb);
            }
            return Err(anyhow!("{ENV_SOURCES_PATH} points to non-existent path"));
        }
        for candidate in ["config/sources.toml", "config/sources.json"] {
            let pb = PathBuf::from(candidate);
            if pb.exists() {
                return Self::load_from_file(&pb);
            }
        }
        Ok(Self::default_seed())
    }

    /// Reference outlets. Reuters and Bloomberg carry the higher weight.
    pub fn default_seed() -> Self {
        let sources = [
            (
                "finance.yahoo.com",
                "https://finance.yahoo.com/quote/{ticker}/news",
                "Yahoo Finance",
                Reliability::Reliable,
                1.0,
            ),
            (
                "cnbc.com",
                "https://www.cnbc.com/quotes/{ticker}/",
                "CNBC",
                Reliability::Reliable,
                1.0,
            ),
            (
                "reuters.com",
                "https://www.reuters.com/finance/stocks/{ticker}",
                "Reuters",
                Reliability::HighlyReliable,
                1.2,
            ),
            (
                "bloomberg.com",
                "https://www.bloomberg.com/quote/{ticker}",
                "Bloomberg",
                Reliability::HighlyReliable,
                1.2,
            ),
            (
                "marketwatch.com",
                "https://www.marketwatch.com/investing/stock/{ticker}",
                "MarketWatch",
                Reliability::Reliable,
                1.0,
            ),
        ]
        .into_iter()
        .map(|(domain, tpl, name, reliability, weight)| Source {
            domain: domain.to_string(),
            url_template: tpl.to_string(),
            display_name: name.to_string(),
            reliability,
            weight,
        })
        .collect();

        Self { sources }
    }
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<Vec<Source>> {
    let try_toml = hint_ext == "toml" || s.contains("[[sources]]");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(ConfigError::Format.into())
}

fn parse_toml(s: &str) -> Result<Vec<Source>> {
    #[derive(Deserialize)]
    struct TomlSources {
        sources: Vec<Source>,
    }
    let v: TomlSources = toml::from_str(s)?;
    Ok(v.sources)
}

fn parse_json(s: &str) -> Result<Vec<Source>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum JsonSources {
        List(Vec<Source>),
        Wrapped { sources: Vec<Source> },
    }
    let v: JsonSources = serde_json::from_str(s)?;
    Ok(match v {
        JsonSources::List(v) | JsonSources::Wrapped { sources: v } => v,
    })
}
