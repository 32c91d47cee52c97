//! Data models

mod types;

pub use types::{
    coerce_rating, coerce_spoiler, coerce_text, LabeledRecord, LabeledTable, PolarityScores,
    ReviewRecord, ReviewTable, SentimentLabel, SourceReview, TextColumn, NEUTRAL_THRESHOLD,
    RATING_RANGE, REQUIRED_COLUMNS,
};
