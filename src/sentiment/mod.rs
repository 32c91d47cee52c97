//! Sentiment scoring
//!
//! Includes:
//! - The [`PolarityScorer`] seam the classifier scores through
//! - A valence lexicon with boosters and negations
//! - A rule-based analyzer producing VADER-style polarity components

mod analyzer;
mod lexicon;

pub use analyzer::{
    normalize, ScoredWord, SentimentResult, ValenceAnalyzer, COMPOUND_ALPHA, NEGATION_SCALAR,
};
pub use lexicon::{
    LexiconStats, SentimentLexicon, ValenceLexicon, BOOSTER_DECREMENT, BOOSTER_INCREMENT,
};

use crate::error::Result;
use crate::models::PolarityScores;

/// Scores the polarity of a single text
///
/// Implementations must be deterministic per text; the classifier calls
/// them once per row, in row order.
pub trait PolarityScorer {
    /// Negative, neutral, positive and compound components for `text`
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores>;

    /// Short name used in log output
    fn name(&self) -> &str {
        "scorer"
    }
}

impl<T: PolarityScorer + ?Sized> PolarityScorer for &T {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
        (**self).polarity_scores(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: PolarityScorer + ?Sized> PolarityScorer for Box<T> {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
        (**self).polarity_scores(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
