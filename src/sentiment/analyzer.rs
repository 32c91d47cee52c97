//! Valence analyzer
//!
//! Rule-based polarity scoring over a [`ValenceLexicon`]:
//! booster words shift the valence of the next sentiment word, negations
//! flip it, and "but" shifts weight to the clause that follows.

use crate::error::Result;
use crate::models::{PolarityScores, SentimentLabel};
use crate::sentiment::lexicon::{SentimentLexicon, ValenceLexicon};
use crate::sentiment::PolarityScorer;
use serde::{Deserialize, Serialize};

/// Normalization constant of the compound score
pub const COMPOUND_ALPHA: f64 = 15.0;

/// Multiplier applied to a valence per preceding negation
pub const NEGATION_SCALAR: f64 = -0.74;

/// How many preceding words can boost or negate a sentiment word
const LOOKBACK: usize = 3;

/// Booster damping by distance (1, 2, 3 words back)
const BOOSTER_DAMPING: [f64; LOOKBACK] = [1.0, 0.95, 0.9];

/// Weight of valences before and after the first "but"
const BEFORE_BUT: f64 = 0.5;
const AFTER_BUT: f64 = 1.5;

/// Valence analyzer
#[derive(Debug, Clone, Default)]
pub struct ValenceAnalyzer {
    lexicon: ValenceLexicon,
}

impl ValenceAnalyzer {
    /// Create an analyzer over the built-in lexicon
    pub fn new() -> Self {
        Self {
            lexicon: ValenceLexicon::new(),
        }
    }

    /// Use a custom lexicon
    pub fn with_lexicon(mut self, lexicon: ValenceLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Analyze text
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let tokens = tokenize(text);
        let valences = self.valences(&tokens);

        let key_words = tokens
            .iter()
            .zip(&valences)
            .filter(|(_, v)| **v != 0.0)
            .map(|(word, v)| ScoredWord {
                word: word.clone(),
                valence: round_to(*v, 3),
            })
            .collect();

        let scores = score_valences(&valences);
        SentimentResult {
            text: text.to_string(),
            label: scores.label(),
            scores,
            key_words,
        }
    }

    /// Per-token valences after booster, negation and "but" rules
    fn valences(&self, tokens: &[String]) -> Vec<f64> {
        let mut valences: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| self.token_valence(tokens, i, token))
            .collect();

        if let Some(but) = tokens.iter().position(|t| t == "but") {
            for (i, valence) in valences.iter_mut().enumerate() {
                if i < but {
                    *valence *= BEFORE_BUT;
                } else if i > but {
                    *valence *= AFTER_BUT;
                }
            }
        }

        valences
    }

    fn token_valence(&self, tokens: &[String], i: usize, token: &str) -> f64 {
        // Boosters only modify their neighbours
        if self.lexicon.booster(token).is_some() {
            return 0.0;
        }
        let Some(mut valence) = self.lexicon.get_score(token) else {
            return 0.0;
        };

        let preceding = (1..=LOOKBACK.min(i)).map(|distance| (distance, tokens[i - distance].as_str()));

        for (distance, word) in preceding.clone() {
            if let Some(booster) = self.lexicon.booster(word) {
                let scalar = booster * BOOSTER_DAMPING[distance - 1];
                valence += if valence < 0.0 { -scalar } else { scalar };
            }
        }
        for (_, word) in preceding {
            if self.lexicon.is_negation(word) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }
}

impl PolarityScorer for ValenceAnalyzer {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
        self.analyze(text).scores.validate()
    }

    fn name(&self) -> &str {
        "valence-lexicon"
    }
}

/// Result of analyzing one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Analyzed text
    pub text: String,
    /// Polarity components
    pub scores: PolarityScores,
    /// Label derived from the compound score
    pub label: SentimentLabel,
    /// Words that carried a valence
    pub key_words: Vec<ScoredWord>,
}

/// Word with its final valence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredWord {
    pub word: String,
    pub valence: f64,
}

/// Lowercase words with surrounding punctuation stripped
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Map summed valence into [-1, 1]
pub fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + COMPOUND_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn score_valences(valences: &[f64]) -> PolarityScores {
    let mut positive_sum = 0.0;
    let mut negative_sum = 0.0;
    let mut neutral_count = 0.0;
    for &v in valences {
        if v > 0.0 {
            positive_sum += v + 1.0;
        } else if v < 0.0 {
            negative_sum += v - 1.0;
        } else {
            neutral_count += 1.0;
        }
    }

    let total = positive_sum + negative_sum.abs() + neutral_count;
    if total == 0.0 {
        return PolarityScores {
            negative: 0.0,
            neutral: 1.0,
            positive: 0.0,
            compound: 0.0,
        };
    }

    PolarityScores {
        negative: round_to((negative_sum / total).abs(), 3),
        neutral: round_to(neutral_count / total, 3),
        positive: round_to(positive_sum / total, 3),
        compound: round_to(normalize(valences.iter().sum()), 4),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_positive_review() {
        let analyzer = ValenceAnalyzer::new();
        let result = analyzer.analyze("this movie was amazing loved it");

        assert_eq!(result.label, SentimentLabel::Positive);
        assert_abs_diff_eq!(result.scores.compound, 0.8271, epsilon = 1e-4);
        assert_eq!(result.key_words.len(), 2);
    }

    #[test]
    fn test_negated_review_leans_negative() {
        let analyzer = ValenceAnalyzer::new();
        let result = analyzer.analyze("it was okay nothing special");

        // okay (0.9) + special negated (1.7 * -0.74)
        assert_abs_diff_eq!(result.scores.compound, -0.092, epsilon = 1e-3);
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_booster_intensifies() {
        let analyzer = ValenceAnalyzer::new();
        let plain = analyzer.analyze("good");
        let boosted = analyzer.analyze("very good");
        let damped = analyzer.analyze("slightly good");

        assert!(boosted.scores.compound > plain.scores.compound);
        assert!(damped.scores.compound < plain.scores.compound);

        let bad = analyzer.analyze("bad");
        let very_bad = analyzer.analyze("very bad");
        assert!(very_bad.scores.compound < bad.scores.compound);
    }

    #[test]
    fn test_negation_flips() {
        let analyzer = ValenceAnalyzer::new();
        let result = analyzer.analyze("not good");

        assert!(result.scores.compound < 0.0);
        assert_eq!(result.key_words[0].word, "good");
    }

    #[test]
    fn test_but_shifts_weight() {
        let analyzer = ValenceAnalyzer::new();
        let result = analyzer.analyze("the acting was good but the plot was terrible");

        // 1.9 * 0.5 - 2.1 * 1.5 < 0
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_empty_and_neutral_text() {
        let analyzer = ValenceAnalyzer::new();

        let empty = analyzer.analyze("");
        assert_eq!(empty.scores.neutral, 1.0);
        assert_eq!(empty.scores.compound, 0.0);
        assert_eq!(empty.label, SentimentLabel::Neutral);

        let plain = analyzer.analyze("the movie has a plot");
        assert_eq!(plain.scores.neutral, 1.0);
        assert_eq!(plain.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_components_sum_to_one() {
        let analyzer = ValenceAnalyzer::new();
        for text in [
            "this movie was amazing loved it",
            "it was okay nothing special",
            "awful boring and a waste but the music was great",
        ] {
            let s = analyzer.analyze(text).scores;
            assert_abs_diff_eq!(s.negative + s.neutral + s.positive, 1.0, epsilon = 2e-3);
        }
    }

    #[test]
    fn test_raw_text_is_tokenized() {
        let analyzer = ValenceAnalyzer::new();
        let raw = analyzer.analyze("Loved it!!! AMAZING.");
        let clean = analyzer.analyze("loved it amazing");

        assert_eq!(raw.scores, clean.scores);
    }

    #[test]
    fn test_compound_bounded() {
        let analyzer = ValenceAnalyzer::new();
        let gushing = "best ".repeat(200);
        let score = analyzer.polarity_scores(&gushing).unwrap();

        assert!(score.compound <= 1.0);
        assert!(score.compound > 0.99);
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = ValenceLexicon::from_valences([("meh", -1.0)]);
        let analyzer = ValenceAnalyzer::new().with_lexicon(lexicon);

        assert_eq!(analyzer.analyze("meh").label, SentimentLabel::Negative);
        assert_eq!(analyzer.analyze("amazing").label, SentimentLabel::Neutral);
    }
}
