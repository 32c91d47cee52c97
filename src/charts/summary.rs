//! Aggregations behind the charts

use crate::models::{LabeledTable, ReviewRecord, SentimentLabel};
use std::collections::BTreeMap;

/// Review count per rating, missing ratings skipped
pub fn rating_counts<'a, I>(reviews: I) -> BTreeMap<u8, usize>
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let mut counts = BTreeMap::new();
    for rating in reviews.into_iter().filter_map(|r| r.rating) {
        *counts.entry(rating).or_insert(0) += 1;
    }
    counts
}

/// Rating by sentiment contingency table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SentimentCrosstab {
    /// Ratings present in the data, ascending
    pub ratings: Vec<u8>,
    /// Counts per rating row, columns in [`SentimentLabel::ALL`] order
    pub counts: Vec<[usize; 3]>,
}

impl SentimentCrosstab {
    pub fn get(&self, rating: u8, label: SentimentLabel) -> usize {
        self.ratings
            .iter()
            .position(|r| *r == rating)
            .map(|row| self.counts[row][label_column(label)])
            .unwrap_or(0)
    }

    /// Largest cell
    pub fn max(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

fn label_column(label: SentimentLabel) -> usize {
    match label {
        SentimentLabel::Negative => 0,
        SentimentLabel::Neutral => 1,
        SentimentLabel::Positive => 2,
    }
}

/// Count labels per rating; rows without a rating are left out
pub fn sentiment_by_rating(table: &LabeledTable) -> SentimentCrosstab {
    let mut rows: BTreeMap<u8, [usize; 3]> = BTreeMap::new();
    for record in table.iter() {
        if let Some(rating) = record.review.rating {
            rows.entry(rating).or_default()[label_column(record.sentiment)] += 1;
        }
    }

    let (ratings, counts) = rows.into_iter().unzip();
    SentimentCrosstab { ratings, counts }
}

/// Five-number summary of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxStats {
    /// Summary with linearly interpolated quartiles, `None` for an empty sample
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Compound scores of one spoiler group
#[derive(Debug, Clone, PartialEq)]
pub struct SpoilerGroup {
    pub spoiler: bool,
    pub compounds: Vec<f64>,
    pub stats: BoxStats,
}

/// Compound scores split by spoiler tag, non-spoilers first
///
/// Rows with a missing tag are skipped; empty groups are omitted.
pub fn spoiler_groups(table: &LabeledTable) -> Vec<SpoilerGroup> {
    [false, true]
        .into_iter()
        .filter_map(|spoiler| {
            let compounds: Vec<f64> = table
                .iter()
                .filter(|r| r.review.spoiler_tag == Some(spoiler))
                .map(|r| r.scores.compound)
                .collect();
            let stats = BoxStats::from_values(&compounds)?;
            Some(SpoilerGroup {
                spoiler,
                compounds,
                stats,
            })
        })
        .collect()
}

/// Whether any row carries a spoiler tag
pub fn has_spoiler_data(table: &LabeledTable) -> bool {
    table.iter().any(|r| r.review.spoiler_tag.is_some())
}
