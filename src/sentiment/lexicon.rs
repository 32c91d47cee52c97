//! Valence lexicon
//!
//! Word valences on a -4.0..=4.0 scale, booster words and negations.
//! The built-in vocabulary targets movie reviews; a full lexicon in the
//! tab-separated VADER layout (`token<TAB>mean<TAB>...`) can be loaded
//! from disk instead.

use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Valence added (or subtracted, for negative words) by an intensifier
pub const BOOSTER_INCREMENT: f64 = 0.293;

/// Valence removed (or added, for negative words) by a dampener
pub const BOOSTER_DECREMENT: f64 = -0.293;

/// Trait for sentiment lexicons
pub trait SentimentLexicon {
    /// Get the valence of a word
    fn get_score(&self, word: &str) -> Option<f64>;

    /// Number of words with a valence
    fn word_count(&self) -> usize;
}

/// Lexicon of valences, boosters and negations
#[derive(Debug, Clone)]
pub struct ValenceLexicon {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl ValenceLexicon {
    /// Built-in movie review lexicon
    pub fn new() -> Self {
        let strong_positive = [
            ("amazing", 2.8),
            ("awesome", 3.1),
            ("beautiful", 2.9),
            ("best", 3.2),
            ("brilliant", 2.8),
            ("excellent", 2.7),
            ("fantastic", 2.6),
            ("great", 3.1),
            ("incredible", 2.6),
            ("love", 3.2),
            ("loved", 2.9),
            ("loves", 2.7),
            ("lovely", 2.8),
            ("masterpiece", 3.0),
            ("outstanding", 3.0),
            ("perfect", 2.7),
            ("superb", 3.1),
            ("wonderful", 2.7),
            ("stunning", 2.2),
            ("magnificent", 3.1),
            ("phenomenal", 2.9),
            ("breathtaking", 2.4),
            ("genius", 2.5),
            ("masterful", 2.8),
            ("flawless", 2.5),
        ];

        let moderate_positive = [
            ("good", 1.9),
            ("nice", 1.8),
            ("fun", 2.3),
            ("funny", 1.9),
            ("enjoy", 2.2),
            ("enjoyed", 2.3),
            ("enjoyable", 1.9),
            ("like", 2.0),
            ("liked", 1.8),
            ("likes", 1.8),
            ("interesting", 1.7),
            ("entertaining", 1.5),
            ("special", 1.7),
            ("okay", 0.9),
            ("ok", 1.2),
            ("fine", 0.8),
            ("decent", 1.1),
            ("solid", 1.2),
            ("charming", 1.7),
            ("clever", 1.8),
            ("impressive", 2.3),
            ("moving", 1.1),
            ("touching", 1.3),
            ("powerful", 1.8),
            ("recommend", 1.5),
            ("recommended", 1.7),
            ("worth", 0.9),
            ("pleasant", 2.3),
            ("happy", 2.7),
            ("laugh", 2.6),
            ("laughed", 2.0),
            ("exciting", 2.2),
            ("thrilling", 2.0),
            ("well", 1.1),
            ("better", 1.9),
            ("favorite", 2.0),
            ("hilarious", 1.7),
            ("strong", 2.3),
            ("smart", 1.7),
            ("sweet", 2.0),
            ("win", 2.8),
            ("won", 2.7),
            ("classic", 1.2),
            ("engaging", 1.4),
            ("compelling", 1.8),
            ("heartwarming", 2.1),
        ];

        let strong_negative = [
            ("awful", -2.0),
            ("horrible", -2.5),
            ("terrible", -2.1),
            ("worst", -3.1),
            ("hate", -2.7),
            ("hated", -3.2),
            ("disaster", -3.1),
            ("garbage", -2.3),
            ("trash", -1.9),
            ("pathetic", -2.7),
            ("atrocious", -2.5),
            ("disgusting", -2.4),
            ("unwatchable", -2.6),
            ("abysmal", -2.9),
            ("dreadful", -2.7),
            ("crap", -1.6),
            ("stupid", -2.4),
            ("ridiculous", -1.5),
            ("painful", -1.9),
            ("insult", -2.3),
        ];

        let moderate_negative = [
            ("bad", -2.5),
            ("worse", -2.1),
            ("boring", -1.3),
            ("bored", -1.1),
            ("dull", -1.7),
            ("poor", -2.1),
            ("poorly", -1.8),
            ("weak", -1.9),
            ("waste", -1.8),
            ("wasted", -2.2),
            ("mess", -1.5),
            ("messy", -1.5),
            ("disappointing", -2.2),
            ("disappointed", -1.9),
            ("disappointment", -2.3),
            ("predictable", -0.9),
            ("slow", -0.8),
            ("confusing", -0.9),
            ("confused", -1.3),
            ("annoying", -1.7),
            ("lame", -1.8),
            ("silly", -0.1),
            ("sad", -2.1),
            ("cheap", -0.3),
            ("fail", -2.5),
            ("failed", -2.3),
            ("fails", -1.8),
            ("flat", -0.8),
            ("forgettable", -1.4),
            ("mediocre", -1.0),
            ("overrated", -1.2),
            ("pointless", -1.8),
            ("problem", -1.7),
            ("problems", -1.7),
            ("unfortunately", -1.4),
            ("wrong", -2.1),
            ("cliche", -1.0),
            ("lacks", -1.2),
            ("lacking", -1.3),
            ("tedious", -1.7),
        ];

        let mut valences = HashMap::new();
        for (word, valence) in strong_positive
            .iter()
            .chain(moderate_positive.iter())
            .chain(strong_negative.iter())
            .chain(moderate_negative.iter())
        {
            valences.insert(word.to_string(), *valence);
        }

        Self {
            valences,
            boosters: default_boosters(),
            negations: default_negations(),
        }
    }

    /// Lexicon with the given valences and the default boosters/negations
    pub fn from_valences<I, S>(valences: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            valences: valences
                .into_iter()
                .map(|(word, valence)| (word.into().to_lowercase(), valence))
                .collect(),
            boosters: default_boosters(),
            negations: default_negations(),
        }
    }

    /// Load valences from a VADER-format lexicon file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse VADER-format lines: token, mean valence, then ignored columns
    pub fn parse(content: &str) -> Result<Self> {
        let mut valences = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default().trim();
            let mean = fields
                .next()
                .ok_or_else(|| {
                    Error::LexiconError(format!("line {}: missing valence for '{}'", line_no + 1, token))
                })?
                .trim()
                .parse::<f64>()
                .map_err(|e| Error::LexiconError(format!("line {}: {}", line_no + 1, e)))?;
            valences.push((token.to_string(), mean));
        }
        Ok(Self::from_valences(valences))
    }

    /// Booster scalar for the word, if it is an intensifier or dampener
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    /// Check whether the word negates what follows
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    /// Add or replace a word valence
    pub fn add_word(&mut self, word: &str, valence: f64) {
        self.valences.insert(word.to_lowercase(), valence);
    }

    /// Get lexicon statistics
    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            positive_count: self.valences.values().filter(|v| **v > 0.0).count(),
            negative_count: self.valences.values().filter(|v| **v < 0.0).count(),
            booster_count: self.boosters.len(),
            negation_count: self.negations.len(),
        }
    }
}

impl Default for ValenceLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentLexicon for ValenceLexicon {
    fn get_score(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    fn word_count(&self) -> usize {
        self.valences.len()
    }
}

/// Lexicon statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconStats {
    pub positive_count: usize,
    pub negative_count: usize,
    pub booster_count: usize,
    pub negation_count: usize,
}

fn default_boosters() -> HashMap<String, f64> {
    let increments = [
        "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
        "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
        "fabulously", "greatly", "highly", "hugely", "incredibly", "intensely", "majorly",
        "more", "most", "particularly", "purely", "quite", "really", "remarkably", "so",
        "substantially", "thoroughly", "totally", "tremendously", "unbelievably",
        "unusually", "utterly", "very",
    ];
    let decrements = [
        "almost", "barely", "hardly", "kinda", "less", "little", "marginally",
        "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta",
    ];

    increments
        .iter()
        .map(|w| (w.to_string(), BOOSTER_INCREMENT))
        .chain(decrements.iter().map(|w| (w.to_string(), BOOSTER_DECREMENT)))
        .collect()
}

fn default_negations() -> HashSet<String> {
    // Cleaned text has no apostrophes, so contractions appear glued together
    [
        "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont",
        "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "no",
        "none", "nope", "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt",
        "wasnt", "werent", "without", "wont", "wouldnt", "rarely", "seldom", "despite",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
