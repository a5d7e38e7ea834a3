//! Headline polarity. The scorer only depends on the `PolarityScorer` trait,
//! so the lexicon engine can be swapped without touching the weighting logic.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Maps text to a polarity in `[-1, 1]` (-1 most negative).
pub trait PolarityScorer: Send + Sync {
    fn score_text(&self, text: &str) -> f64;
}

/// VADER compound score: rule/lexicon based, aware of punctuation,
/// capitalization, negation and degree modifiers.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for VaderScorer {
    fn score_text(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }
}
