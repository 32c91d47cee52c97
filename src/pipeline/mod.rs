//! Cleaning and classification stages

mod classifier;
mod cleaner;

pub use classifier::{attach_scores, ClassifyOutput, SentimentClassifier};
pub use cleaner::{CleanOutput, CleanStats, ReviewCleaner};
