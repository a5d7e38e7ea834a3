// src/config.rs
//! Runtime settings from the environment (`.env` is loaded by the binary).

use anyhow::Result;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_TTL_SECS;
use crate::error::ConfigError;
use crate::ingest::http::DEFAULT_FETCH_TIMEOUT;

pub const ENV_HOST: &str = "SENTIMENT_HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_CACHE_TTL_SECS: &str = "SENTIMENT_CACHE_TTL_SECS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "SENTIMENT_FETCH_TIMEOUT_SECS";
pub const ENV_MAX_ARTICLES: &str = "SENTIMENT_MAX_ARTICLES";
pub const ENV_METRICS: &str = "SENTIMENT_METRICS";

pub const DEFAULT_MAX_ARTICLES: usize = 10;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cache_ttl_secs: u64,
    pub fetch_timeout: Duration,
    pub max_articles: usize,
    pub metrics_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::from([0, 0, 0, 0]), DEFAULT_PORT),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_articles: DEFAULT_MAX_ARTICLES,
            metrics_enabled: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any key lookup; missing keys take defaults, malformed ones fail.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = parse_var(&lookup, ENV_HOST, DEFAULT_HOST.parse::<IpAddr>()?)?;
        let port: u16 = parse_var(&lookup, ENV_PORT, DEFAULT_PORT)?;
        let cache_ttl_secs: u64 = parse_var(&lookup, ENV_CACHE_TTL_SECS, DEFAULT_CACHE_TTL_SECS)?;
        let timeout_secs: u64 = parse_var(
            &lookup,
            ENV_FETCH_TIMEOUT_SECS,
            DEFAULT_FETCH_TIMEOUT.as_secs(),
        )?;
        let max_articles: usize = parse_var(&lookup, ENV_MAX_ARTICLES, DEFAULT_MAX_ARTICLES)?;
        let metrics_enabled = match lookup(ENV_METRICS) {
            None => true,
            Some(v) => parse_flag(ENV_METRICS, &v)?,
        };

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnv {
                var: ENV_FETCH_TIMEOUT_SECS,
                value: "0".into(),
            }
            .into());
        }
        if max_articles == 0 {
            return Err(ConfigError::InvalidEnv {
                var: ENV_MAX_ARTICLES,
                value: "0".into(),
            }
            .into());
        }

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            cache_ttl_secs,
            fetch_timeout: Duration::from_secs(timeout_secs),
            max_articles,
            metrics_enabled,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidEnv { var, value: raw }),
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var,
            value: raw.to_string(),
        }),
    }
}
