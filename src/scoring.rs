//! Weighted aggregation of headline polarity.
//!
//! overall = Σ(polarity × weight) / Σ(weight), 0 when Σ(weight) = 0.
//! Full precision internally; the report carries 2-decimal values.

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

use crate::error::SentimentError;
use crate::ingest::types::Article;
use crate::report::{round2, ScoredArticle, SentimentSummary};
use crate::sentiment::PolarityScorer;
use crate::synthetic::is_simulated_source;

/// Score a batch. Undated articles get `today`, `today - 1`, ... in the order
/// they appear among undated articles.
///
/// `is_simulated` needs at least one article: an empty batch has no simulated
/// data to flag and reports `false`, with overall 0.
pub fn score_articles(
    articles: Vec<Article>,
    scorer: &dyn PolarityScorer,
    today: NaiveDate,
) -> Result<SentimentSummary, SentimentError> {
    let mut weighted_sum = 0.0f64;
    let mut total_weight = 0.0f64;
    let mut undated = 0i64;
    let mut sources: HashSet<String> = HashSet::new();
    let mut scored = Vec::with_capacity(articles.len());

    for a in articles {
        if !a.weight.is_finite() || a.weight < 0.0 {
            return Err(SentimentError::Scoring(format!(
                "article from '{}' has invalid weight {}",
                a.source, a.weight
            )));
        }

        let polarity = scorer.score_text(&a.headline);
        if !polarity.is_finite() {
            return Err(SentimentError::Scoring(format!(
                "non-finite polarity for headline from '{}'",
                a.source
            )));
        }
        let polarity = polarity.clamp(-1.0, 1.0);

        weighted_sum += polarity * a.weight;
        total_weight += a.weight;

        let date = match a.date {
            Some(d) => d,
            None => {
                let d = today - Duration::days(undated);
                undated += 1;
                d
            }
        };

        sources.insert(a.source.clone());
        scored.push(ScoredArticle {
            headline: a.headline,
            date,
            source: a.source,
            sentiment_score: round2(polarity),
            url: a.url,
            weight: a.weight,
        });
    }

    let overall = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };

    let is_simulated = !scored.is_empty() && scored.iter().all(|s| is_simulated_source(&s.source));

    Ok(SentimentSummary {
        overall_sentiment: round2(overall).clamp(-1.0, 1.0),
        is_simulated,
        distinct_source_count: sources.len(),
        articles: scored,
    })
}
