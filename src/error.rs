//! Error types for the review sentiment library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// A required column is absent from every record of the source
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The source is not an array of objects
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// A record holds a value that cannot be coerced into its column
    #[error("Invalid record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The polarity scorer returned an unusable result
    #[error("Invalid polarity score: {0}")]
    InvalidScore(String),

    /// Scored batch and table disagree on row count
    #[error("Score count mismatch: {rows} rows but {scores} scores")]
    ScoreCountMismatch { rows: usize, scores: usize },

    /// Lexicon file could not be parsed
    #[error("Lexicon error: {0}")]
    LexiconError(String),

    /// Chart rendering failed
    #[error("Chart error: {0}")]
    ChartError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Whether the error came from the source data rather than the environment
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::MissingColumn(_)
                | Error::InvalidSource(_)
                | Error::InvalidRecord { .. }
                | Error::JsonError(_)
        )
    }
}
