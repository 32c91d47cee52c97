//! Data types for review records and sentiment results

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Columns every source must provide, in output order
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "reviewer",
    "movie",
    "rating",
    "review_summary",
    "spoiler_tag",
    "review_detail",
];

/// Half-width of the neutral band around zero compound
pub const NEUTRAL_THRESHOLD: f64 = 0.05;

/// Lowest and highest valid rating
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// A single movie review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Reviewer handle
    #[serde(default)]
    pub reviewer: String,
    /// Movie title
    #[serde(default)]
    pub movie: String,
    /// Rating 1-10, missing when malformed
    #[serde(default)]
    pub rating: Option<u8>,
    /// One-line summary
    #[serde(default)]
    pub review_summary: String,
    /// Whether the review discloses plot details
    #[serde(default, with = "spoiler_flag")]
    pub spoiler_tag: Option<bool>,
    /// Free review text
    pub review_detail: String,
}

impl ReviewRecord {
    /// Text of the given column
    pub fn text(&self, column: TextColumn) -> &str {
        match column {
            TextColumn::ReviewDetail => &self.review_detail,
            TextColumn::ReviewSummary => &self.review_summary,
        }
    }
}

/// A projected source row before cleaning; `review_detail` may be missing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceReview {
    pub reviewer: String,
    pub movie: String,
    pub rating: Option<u8>,
    pub review_summary: String,
    pub spoiler_tag: Option<bool>,
    pub review_detail: Option<String>,
}

impl SourceReview {
    /// Record with the given detail text, `None` when the source had none
    pub fn into_review(self) -> Option<ReviewRecord> {
        let review_detail = self.review_detail?;
        Some(ReviewRecord {
            reviewer: self.reviewer,
            movie: self.movie,
            rating: self.rating,
            review_summary: self.review_summary,
            spoiler_tag: self.spoiler_tag,
            review_detail,
        })
    }
}

/// Ordered collection of review records, indexed from zero
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewTable {
    pub records: Vec<ReviewRecord>,
}

impl ReviewTable {
    pub fn new(records: Vec<ReviewRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReviewRecord> {
        self.records.iter()
    }
}

/// Column that feeds the polarity scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextColumn {
    #[default]
    ReviewDetail,
    ReviewSummary,
}

impl FromStr for TextColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "review_detail" => Ok(Self::ReviewDetail),
            "review_summary" => Ok(Self::ReviewSummary),
            other => Err(format!("unknown text column: {other}")),
        }
    }
}

impl fmt::Display for TextColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReviewDetail => write!(f, "review_detail"),
            Self::ReviewSummary => write!(f, "review_summary"),
        }
    }
}

/// Polarity components returned by a scorer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Negative proportion (0.0 - 1.0)
    pub negative: f64,
    /// Neutral proportion (0.0 - 1.0)
    pub neutral: f64,
    /// Positive proportion (0.0 - 1.0)
    pub positive: f64,
    /// Normalized overall polarity (-1.0 - 1.0)
    pub compound: f64,
}

impl PolarityScores {
    /// Reject non-finite components and compound values outside [-1, 1]
    pub fn validate(self) -> crate::Result<Self> {
        let parts = [self.negative, self.neutral, self.positive, self.compound];
        if parts.iter().any(|v| !v.is_finite()) {
            return Err(crate::Error::InvalidScore(format!("non-finite component in {self:?}")));
        }
        if !(-1.0..=1.0).contains(&self.compound) {
            return Err(crate::Error::InvalidScore(format!(
                "compound {} outside [-1, 1]",
                self.compound
            )));
        }
        Ok(self)
    }

    /// Label derived from the compound score
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// All labels in axis order
    pub const ALL: [SentimentLabel; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    /// Closed neutral band: exactly ±0.05 is Neutral
    pub fn from_compound(compound: f64) -> Self {
        if compound < -NEUTRAL_THRESHOLD {
            Self::Negative
        } else if compound > NEUTRAL_THRESHOLD {
            Self::Positive
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review with its polarity scores and label
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRecord {
    pub review: ReviewRecord,
    pub scores: PolarityScores,
    pub sentiment: SentimentLabel,
}

/// Ordered collection of labeled records, row i matching cleaned row i
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledTable {
    pub records: Vec<LabeledRecord>,
}

impl LabeledTable {
    pub fn new(records: Vec<LabeledRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabeledRecord> {
        self.records.iter()
    }

    /// Number of rows carrying `label`
    pub fn count(&self, label: SentimentLabel) -> usize {
        self.records.iter().filter(|r| r.sentiment == label).count()
    }
}

impl fmt::Display for LabeledTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Analyzed: {} reviews ({} positive, {} neutral, {} negative)",
            self.len(),
            self.count(SentimentLabel::Positive),
            self.count(SentimentLabel::Neutral),
            self.count(SentimentLabel::Negative)
        )
    }
}

/// Coerce a raw rating into 1-10, anything else is missing
pub fn coerce_rating(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if raw.fract() != 0.0 {
        return None;
    }
    let lo = f64::from(*RATING_RANGE.start());
    let hi = f64::from(*RATING_RANGE.end());
    if (lo..=hi).contains(&raw) {
        Some(raw as u8)
    } else {
        None
    }
}

/// Coerce a boolean-like spoiler marker
pub fn coerce_spoiler(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64()? {
            x if x == 0.0 => Some(false),
            x if x == 1.0 => Some(true),
            _ => None,
        },
        Value::String(s) => parse_spoiler(s),
        _ => None,
    }
}

fn parse_spoiler(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "0" | "no" | "false" => Some(false),
        "1" | "yes" | "true" => Some(true),
        _ => None,
    }
}

/// Render a scalar as text; `Err` for arrays and objects
pub fn coerce_text(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err("expected a scalar value".to_string()),
    }
}

/// CSV representation of the spoiler flag as 0/1/empty
mod spoiler_flag {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(flag) => serializer.serialize_u8(u8::from(*flag)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_spoiler))
    }
}
