// src/report.rs
//! Report types returned by the orchestrator and serialized by the API.
//!
//! Wire shape (success):
//! `{"success":true,"data":[{headline,date,source,sentiment_score,url}],
//!   "overall_sentiment":0.12,"is_simulated":false,"source_count":3}`
//!
//! Wire shape (failure): `{"success":false,"error":"..."}`

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Article annotated with its polarity and a concrete date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredArticle {
    pub headline: String,
    pub date: NaiveDate,
    pub source: String,
    /// Rounded to 2 decimals.
    pub sentiment_score: f64,
    pub url: String,
    #[serde(skip)]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSummary {
    pub articles: Vec<ScoredArticle>,
    /// Weighted mean polarity, rounded to 2 decimals.
    pub overall_sentiment: f64,
    pub is_simulated: bool,
    pub distinct_source_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SentimentReport {
    Success(SentimentSummary),
    Failure { error: String },
}

impl SentimentReport {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn summary(&self) -> Option<&SentimentSummary> {
        match self {
            Self::Success(s) => Some(s),
            Self::Failure { .. } => None,
        }
    }
}

impl Serialize for SentimentReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Succeeded<'a> {
            success: bool,
            data: &'a [ScoredArticle],
            overall_sentiment: f64,
            is_simulated: bool,
            source_count: usize,
        }

        #[derive(Serialize)]
        struct Failed<'a> {
            success: bool,
            error: &'a str,
        }

        match self {
            Self::Success(s) => Succeeded {
                success: true,
                data: &s.articles,
                overall_sentiment: s.overall_sentiment,
                is_simulated: s.is_simulated,
                source_count: s.distinct_source_count,
            }
            .serialize(serializer),
            Self::Failure { error } => Failed {
                success: false,
                error,
            }
            .serialize(serializer),
        }
    }
}

/// Round half away from zero to 2 decimals.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
