//! Sentiment classifier
//!
//! Scores every cleaned review through a [`PolarityScorer`], labels it and
//! persists the labeled table.

use crate::data::DataLoader;
use crate::error::{Error, Result};
use crate::models::{LabeledRecord, LabeledTable, PolarityScores, ReviewTable, TextColumn};
use crate::sentiment::PolarityScorer;
use crate::utils::{PathSettings, ProgressLog};
use std::path::PathBuf;
use tracing::{error, info};

/// Result of a successful classification run
#[derive(Debug, Clone)]
pub struct ClassifyOutput {
    pub table: LabeledTable,
    pub output_path: PathBuf,
}

/// Sentiment classifier over any scorer
#[derive(Debug, Clone)]
pub struct SentimentClassifier<S> {
    scorer: S,
    text_column: TextColumn,
    paths: PathSettings,
    log: ProgressLog,
}

impl<S: PolarityScorer> SentimentClassifier<S> {
    pub fn new(scorer: S, paths: PathSettings, log: ProgressLog) -> Self {
        Self {
            scorer,
            text_column: TextColumn::default(),
            paths,
            log,
        }
    }

    /// Score a different column
    pub fn with_text_column(mut self, column: TextColumn) -> Self {
        self.text_column = column;
        self
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Label `table` and write `sentiment_analysis_results.csv`
    ///
    /// Failures are recorded in the progress log before being returned.
    pub fn classify(&self, table: &ReviewTable) -> Result<ClassifyOutput> {
        self.try_classify(table).inspect_err(|e| {
            error!("sentiment analysis failed: {}", e);
            self.log.log_failure(&format!("Error during sentiment analysis: {e}"));
        })
    }

    fn try_classify(&self, table: &ReviewTable) -> Result<ClassifyOutput> {
        let labeled = self.label(table)?;

        let output_path = self.paths.labeled_path();
        DataLoader::save_labeled(&labeled, &output_path)?;

        self.log.log("Sentiment Analysis performed")?;
        self.log.log(&format!("file saved as : {}", output_path.display()))?;
        info!("{} (scorer: {})", labeled, self.scorer.name());

        Ok(ClassifyOutput {
            table: labeled,
            output_path,
        })
    }

    /// Score and label every row without touching the filesystem
    pub fn label(&self, table: &ReviewTable) -> Result<LabeledTable> {
        let scores = table
            .iter()
            .map(|record| self.scorer.polarity_scores(record.text(self.text_column)))
            .collect::<Result<Vec<_>>>()?;
        attach_scores(table, scores)
    }
}

/// Pair row i with score i and derive each label
///
/// The pairing is positional; a batch of a different length is rejected.
pub fn attach_scores(table: &ReviewTable, scores: Vec<PolarityScores>) -> Result<LabeledTable> {
    if scores.len() != table.len() {
        return Err(Error::ScoreCountMismatch {
            rows: table.len(),
            scores: scores.len(),
        });
    }

    let records = table
        .iter()
        .zip(scores)
        .map(|(review, scores)| {
            let scores = scores.validate()?;
            Ok(LabeledRecord {
                review: review.clone(),
                sentiment: scores.label(),
                scores,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LabeledTable::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReviewRecord, SentimentLabel};
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Scorer returning a fixed compound per text and recording call order
    struct FixedScorer {
        calls: RefCell<Vec<String>>,
    }

    impl PolarityScorer for FixedScorer {
        fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
            self.calls.borrow_mut().push(text.to_string());
            let compound = match text {
                "up" => 0.6,
                "down" => -0.6,
                "edge" => -0.05,
                "broken" => return Err(Error::InvalidScore("oracle failure".into())),
                _ => 0.0,
            };
            Ok(PolarityScores {
                compound,
                neutral: 1.0,
                ..Default::default()
            })
        }
    }

    fn table(texts: &[&str]) -> ReviewTable {
        ReviewTable::new(
            texts
                .iter()
                .map(|t| ReviewRecord {
                    reviewer: String::new(),
                    movie: String::new(),
                    rating: None,
                    review_summary: format!("summary {t}"),
                    spoiler_tag: None,
                    review_detail: t.to_string(),
                })
                .collect(),
        )
    }

    fn classifier(dir: &std::path::Path) -> SentimentClassifier<FixedScorer> {
        let paths = PathSettings {
            output_dir: dir.to_path_buf(),
            ..Default::default()
        };
        let log = ProgressLog::new(paths.progress_log_path());
        SentimentClassifier::new(FixedScorer { calls: RefCell::new(Vec::new()) }, paths, log)
    }

    #[test]
    fn test_labels_follow_row_order() {
        let dir = tempdir().unwrap();
        let classifier = classifier(dir.path());
        let labeled = classifier.label(&table(&["up", "flat", "down", "edge"])).unwrap();

        let labels: Vec<_> = labeled.iter().map(|r| r.sentiment).collect();
        assert_eq!(
            labels,
            vec![
                SentimentLabel::Positive,
                SentimentLabel::Neutral,
                SentimentLabel::Negative,
                SentimentLabel::Neutral
            ]
        );
        assert_eq!(*classifier.scorer().calls.borrow(), vec!["up", "flat", "down", "edge"]);
    }

    #[test]
    fn test_text_column_switch() {
        let dir = tempdir().unwrap();
        let classifier = classifier(dir.path()).with_text_column(TextColumn::ReviewSummary);
        classifier.label(&table(&["up"])).unwrap();

        assert_eq!(*classifier.scorer().calls.borrow(), vec!["summary up"]);
    }

    #[test]
    fn test_scorer_failure_is_logged_and_returned() {
        let dir = tempdir().unwrap();
        let classifier = classifier(dir.path());

        let err = classifier.classify(&table(&["up", "broken"])).unwrap_err();

        assert!(matches!(err, Error::InvalidScore(_)));
        assert!(!dir.path().join("sentiment_analysis_results.csv").exists());
        let log = std::fs::read_to_string(dir.path().join("code_log.txt")).unwrap();
        assert!(log.contains("Error during sentiment analysis: Invalid polarity score: oracle failure"));
    }

    #[test]
    fn test_attach_scores_rejects_length_mismatch() {
        let err = attach_scores(&table(&["a", "b"]), vec![PolarityScores::default()]).unwrap_err();
        assert!(matches!(err, Error::ScoreCountMismatch { rows: 2, scores: 1 }));
    }

    #[test]
    fn test_attach_scores_rejects_out_of_range() {
        let bad = PolarityScores {
            compound: -1.5,
            ..Default::default()
        };
        assert!(attach_scores(&table(&["a"]), vec![bad]).is_err());
    }

    #[test]
    fn test_classify_writes_table_and_log() {
        let dir = tempdir().unwrap();
        let output = classifier(dir.path()).classify(&table(&["up", "down"])).unwrap();

        assert!(output.output_path.ends_with("sentiment_analysis_results.csv"));
        let loaded = DataLoader::load_labeled(&output.output_path).unwrap();
        assert_eq!(loaded, output.table);

        let log = std::fs::read_to_string(dir.path().join("code_log.txt")).unwrap();
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" : Sentiment Analysis performed"));
        assert!(lines[1].contains(" : file saved as : "));
    }
}
