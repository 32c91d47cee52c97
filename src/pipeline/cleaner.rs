//! Review cleaner
//!
//! Loads the raw JSON source, drops reviews without text, normalizes and
//! deduplicates the review text and persists the cleaned table.

use crate::data::{DataLoader, TextPreprocessor};
use crate::error::Result;
use crate::models::{ReviewRecord, ReviewTable, SourceReview};
use crate::utils::{PathSettings, ProgressLog};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Row accounting of one cleaning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanStats {
    /// Rows in the source
    pub source_rows: usize,
    /// Rows dropped for missing review text
    pub missing_detail: usize,
    /// Rows dropped as duplicates of an earlier cleaned text
    pub duplicates: usize,
    /// Rows in the cleaned table
    pub kept: usize,
}

impl fmt::Display for CleanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} reviews kept ({} without text, {} duplicates)",
            self.kept, self.source_rows, self.missing_detail, self.duplicates
        )
    }
}

/// Result of a successful cleaning run
#[derive(Debug, Clone)]
pub struct CleanOutput {
    pub table: ReviewTable,
    pub output_path: PathBuf,
    pub stats: CleanStats,
}

/// Review cleaner
#[derive(Debug, Clone)]
pub struct ReviewCleaner {
    preprocessor: TextPreprocessor,
    paths: PathSettings,
    log: ProgressLog,
}

impl ReviewCleaner {
    pub fn new(paths: PathSettings, log: ProgressLog) -> Self {
        Self {
            preprocessor: TextPreprocessor::new(),
            paths,
            log,
        }
    }

    /// Clean `source` and write `preprocessed_<stem>.csv`
    ///
    /// Failures are recorded in the progress log before being returned.
    pub fn clean<P: AsRef<Path>>(&self, source: P) -> Result<CleanOutput> {
        let source = source.as_ref();
        self.try_clean(source).inspect_err(|e| {
            error!("preprocessing {} failed: {}", source.display(), e);
            self.log.log_failure(&format!("Error during preprocessing: {e}"));
        })
    }

    fn try_clean(&self, source: &Path) -> Result<CleanOutput> {
        let rows = DataLoader::load_reviews_json(source)?;
        let (table, stats) = self.clean_records(rows);

        let output_path = self.paths.preprocessed_path(source);
        DataLoader::save_reviews(&table, &output_path)?;

        self.log.log("Pre processing performed")?;
        self.log.log(&format!("file saved as : {}", output_path.display()))?;
        info!("{}", stats);

        Ok(CleanOutput {
            table,
            output_path,
            stats,
        })
    }

    /// Drop rows without text, normalize text, keep the first of each duplicate
    pub fn clean_records(&self, rows: Vec<SourceReview>) -> (ReviewTable, CleanStats) {
        let source_rows = rows.len();
        let reviews: Vec<ReviewRecord> = rows
            .into_iter()
            .filter_map(SourceReview::into_review)
            .collect();
        let missing_detail = source_rows - reviews.len();

        let kept = self
            .preprocessor
            .preprocess_unique(reviews.iter().map(|r| r.review_detail.as_str()));
        let duplicates = reviews.len() - kept.len();

        let mut slots: Vec<Option<ReviewRecord>> = reviews.into_iter().map(Some).collect();
        let records: Vec<ReviewRecord> = kept
            .into_iter()
            .filter_map(|(i, text)| {
                slots[i].take().map(|mut record| {
                    record.review_detail = text;
                    record
                })
            })
            .collect();

        let stats = CleanStats {
            source_rows,
            missing_detail,
            duplicates,
            kept: records.len(),
        };
        (ReviewTable::new(records), stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn source(detail: Option<&str>) -> SourceReview {
        SourceReview {
            reviewer: "r".to_string(),
            movie: "m".to_string(),
            rating: Some(5),
            review_summary: "s".to_string(),
            spoiler_tag: Some(false),
            review_detail: detail.map(String::from),
        }
    }

    fn cleaner() -> ReviewCleaner {
        ReviewCleaner::new(PathSettings::default(), ProgressLog::default())
    }

    #[test]
    fn test_clean_records_accounting() {
        let rows = vec![
            source(Some("Great film!")),
            source(None),
            source(Some("great  FILM")),
            source(Some("<p>Dull.</p>")),
        ];

        let (table, stats) = cleaner().clean_records(rows);

        assert_eq!(stats.source_rows, 4);
        assert_eq!(stats.missing_detail, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.kept, 2);
        assert_eq!(table.records[0].review_detail, "great film");
        assert_eq!(table.records[1].review_detail, " dull ");
    }

    #[test]
    fn test_first_duplicate_wins() {
        let mut first = source(Some("Same text"));
        first.reviewer = "first".to_string();
        let mut second = source(Some("same text!"));
        second.reviewer = "second".to_string();

        let (table, _) = cleaner().clean_records(vec![first, second]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].reviewer, "first");
    }

    #[test]
    fn test_empty_text_is_kept_once() {
        let (table, stats) = cleaner().clean_records(vec![source(Some("")), source(Some("!!!"))]);

        assert_eq!(table.len(), 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(table.records[0].review_detail, "");
    }

    #[test]
    fn test_failure_is_logged() {
        let dir = tempdir().unwrap();
        let paths = PathSettings {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let log = ProgressLog::new(paths.progress_log_path());
        let cleaner = ReviewCleaner::new(paths, log.clone());

        let result = cleaner.clean(dir.path().join("missing.json"));

        assert!(result.is_err());
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.contains(" : Error during preprocessing: IO error"));
    }
}
