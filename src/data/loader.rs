//! Data loading and saving utilities
//!
//! Reads the raw JSON review source and reads/writes the cleaned and
//! labeled tables as CSV.

use crate::error::{Error, Result};
use crate::models::{
    coerce_rating, coerce_spoiler, coerce_text, LabeledRecord, LabeledTable, PolarityScores,
    ReviewRecord, ReviewTable, SentimentLabel, SourceReview, REQUIRED_COLUMNS,
};
use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Data loader for review sources and result tables
pub struct DataLoader;

impl DataLoader {
    /// Load and project review records from a JSON file
    pub fn load_reviews_json<P: AsRef<Path>>(path: P) -> Result<Vec<SourceReview>> {
        let file = File::open(&path)?;
        Self::read_reviews_json(file)
    }

    /// Parse and project review records from any JSON reader
    ///
    /// The root must be an array of objects. Every required column has to
    /// appear in at least one record; records lacking a column get a missing
    /// value for it.
    pub fn read_reviews_json<R: Read>(reader: R) -> Result<Vec<SourceReview>> {
        let root: Value = serde_json::from_reader(reader)?;
        let rows = match root {
            Value::Array(rows) => rows,
            other => {
                return Err(Error::InvalidSource(format!(
                    "expected an array of records, found {}",
                    json_kind(&other)
                )))
            }
        };

        let objects = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| match row {
                Value::Object(map) => Ok(map),
                other => Err(Error::InvalidRecord {
                    index,
                    reason: format!("expected an object, found {}", json_kind(&other)),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        for column in REQUIRED_COLUMNS {
            if !objects.iter().any(|o| o.contains_key(column)) {
                return Err(Error::MissingColumn(column.to_string()));
            }
        }

        objects
            .iter()
            .enumerate()
            .map(|(index, object)| project(index, object))
            .collect()
    }

    /// Save reviews to a CSV file
    pub fn save_reviews<P: AsRef<Path>>(table: &ReviewTable, path: P) -> Result<()> {
        let file = File::create(&path)?;
        Self::write_reviews(table, file)
    }

    /// Write reviews as CSV to any writer
    pub fn write_reviews<W: Write>(table: &ReviewTable, writer: W) -> Result<()> {
        let mut writer = Writer::from_writer(writer);
        if table.is_empty() {
            writer.write_record(REQUIRED_COLUMNS)?;
        }
        for record in table.iter() {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Load reviews from a CSV file written by [`DataLoader::save_reviews`]
    pub fn load_reviews<P: AsRef<Path>>(path: P) -> Result<ReviewTable> {
        let mut reader = Reader::from_path(&path)?;
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<ReviewRecord>, _>>()?;
        Ok(ReviewTable::new(records))
    }

    /// Save labeled records to a CSV file
    pub fn save_labeled<P: AsRef<Path>>(table: &LabeledTable, path: P) -> Result<()> {
        let file = File::create(&path)?;
        Self::write_labeled(table, file)
    }

    /// Write labeled records as CSV to any writer
    pub fn write_labeled<W: Write>(table: &LabeledTable, writer: W) -> Result<()> {
        let mut writer = Writer::from_writer(writer);
        if table.is_empty() {
            writer.write_record(LABELED_COLUMNS)?;
        }
        for record in table.iter() {
            writer.serialize(LabeledRow::from(record))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Load labeled records from a CSV file written by [`DataLoader::save_labeled`]
    pub fn load_labeled<P: AsRef<Path>>(path: P) -> Result<LabeledTable> {
        let mut reader = Reader::from_path(&path)?;
        let records = reader
            .deserialize()
            .map(|row| row.map(|row: LabeledRow| row.into_record()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(LabeledTable::new(records))
    }
}

/// Output columns of the labeled table
pub const LABELED_COLUMNS: [&str; 11] = [
    "reviewer",
    "movie",
    "rating",
    "review_summary",
    "spoiler_tag",
    "review_detail",
    "negative",
    "neutral",
    "positive",
    "compound",
    "sentiment",
];

/// Flat CSV row of the labeled table; csv cannot serialize flattened structs
#[derive(Debug, Serialize, Deserialize)]
struct LabeledRow {
    reviewer: String,
    movie: String,
    rating: Option<u8>,
    review_summary: String,
    spoiler_tag: Option<u8>,
    review_detail: String,
    negative: f64,
    neutral: f64,
    positive: f64,
    compound: f64,
    sentiment: SentimentLabel,
}

impl From<&LabeledRecord> for LabeledRow {
    fn from(record: &LabeledRecord) -> Self {
        let review = &record.review;
        Self {
            reviewer: review.reviewer.clone(),
            movie: review.movie.clone(),
            rating: review.rating,
            review_summary: review.review_summary.clone(),
            spoiler_tag: review.spoiler_tag.map(u8::from),
            review_detail: review.review_detail.clone(),
            negative: record.scores.negative,
            neutral: record.scores.neutral,
            positive: record.scores.positive,
            compound: record.scores.compound,
            sentiment: record.sentiment,
        }
    }
}

impl LabeledRow {
    fn into_record(self) -> LabeledRecord {
        LabeledRecord {
            review: ReviewRecord {
                reviewer: self.reviewer,
                movie: self.movie,
                rating: self.rating,
                review_summary: self.review_summary,
                spoiler_tag: match self.spoiler_tag {
                    Some(0) => Some(false),
                    Some(1) => Some(true),
                    _ => None,
                },
                review_detail: self.review_detail,
            },
            scores: PolarityScores {
                negative: self.negative,
                neutral: self.neutral,
                positive: self.positive,
                compound: self.compound,
            },
            sentiment: self.sentiment,
        }
    }
}

static NULL: Value = Value::Null;

fn project(index: usize, object: &Map<String, Value>) -> Result<SourceReview> {
    let field = |name: &str| object.get(name).unwrap_or(&NULL);
    let text = |name: &str| {
        coerce_text(field(name)).map_err(|reason| Error::InvalidRecord {
            index,
            reason: format!("{name}: {reason}"),
        })
    };

    Ok(SourceReview {
        reviewer: text("reviewer")?.unwrap_or_default(),
        movie: text("movie")?.unwrap_or_default(),
        rating: coerce_rating(field("rating")),
        review_summary: text("review_summary")?.unwrap_or_default(),
        spoiler_tag: coerce_spoiler(field("spoiler_tag")),
        review_detail: text("review_detail")?,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
