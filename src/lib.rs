//! # Review Sentiment
//!
//! Library for cleaning movie review dumps, scoring each review's polarity
//! and charting how sentiment relates to rating and spoilers.
//!
//! ## Modules
//!
//! - `data` - JSON source loading, CSV persistence and text preprocessing
//! - `models` - Review records, polarity scores and labels
//! - `pipeline` - The cleaning and classification stages
//! - `sentiment` - Valence lexicon and polarity scoring
//! - `charts` - Rating, heatmap, spoiler and dashboard charts
//! - `menu` - Interactive menu over one session
//! - `utils` - Configuration, logging setup and the progress log
//!
//! ## Example Usage
//!
//! ```no_run
//! use review_sentiment::{PathSettings, ProgressLog, ReviewCleaner, SentimentClassifier, ValenceAnalyzer};
//!
//! fn main() -> review_sentiment::Result<()> {
//!     let paths = PathSettings::default();
//!     let log = ProgressLog::new(paths.progress_log_path());
//!
//!     let cleaned = ReviewCleaner::new(paths.clone(), log.clone()).clean("IMDB_REVIEWS.json")?;
//!     let labeled = SentimentClassifier::new(ValenceAnalyzer::new(), paths, log).classify(&cleaned.table)?;
//!
//!     println!("{}", labeled.table);
//!     Ok(())
//! }
//! ```

pub mod charts;
pub mod data;
pub mod error;
pub mod menu;
pub mod models;
pub mod pipeline;
pub mod sentiment;
pub mod utils;

// Re-exports for convenience
pub use charts::ChartRenderer;
pub use data::{DataLoader, TextPreprocessor};
pub use error::{Error, Result};
pub use menu::{run_menu, MenuChoice, Session};
pub use models::{
    LabeledRecord, LabeledTable, PolarityScores, ReviewRecord, ReviewTable, SentimentLabel,
    TextColumn,
};
pub use pipeline::{ReviewCleaner, SentimentClassifier};
pub use sentiment::{PolarityScorer, ValenceAnalyzer, ValenceLexicon};
pub use utils::{AppConfig, PathSettings, ProgressLog};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
