//! Interactive menu
//!
//! A numbered text menu over one analysis session. Input and output are
//! generic so the loop can be driven from a script or a test.

use crate::charts::{has_spoiler_data, ChartRenderer};
use crate::error::Result;
use crate::models::{LabeledTable, ReviewTable};
use crate::pipeline::{ReviewCleaner, SentimentClassifier};
use crate::sentiment::PolarityScorer;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const TITLE: &str = "IMDb Review Sentiment Analysis Tool";

const OPTIONS: [&str; 7] = [
    "Preprocess & Load Data",
    "Perform Sentiment Analysis",
    "Plot Rating Distribution (1-10)",
    "Plot Sentiment vs. Rating Heatmap",
    "Analyze Spoiler Impact on Sentiment",
    "View all figures at Once",
    "Exit",
];

/// One menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Preprocess,
    Analyze,
    RatingDistribution,
    SentimentHeatmap,
    SpoilerImpact,
    Dashboard,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" => Ok(Self::Preprocess),
            "2" => Ok(Self::Analyze),
            "3" => Ok(Self::RatingDistribution),
            "4" => Ok(Self::SentimentHeatmap),
            "5" => Ok(Self::SpoilerImpact),
            "6" => Ok(Self::Dashboard),
            "7" | "exit" => Ok(Self::Exit),
            other => Err(format!("unknown menu choice: {other}")),
        }
    }
}

/// Whether the loop keeps going after a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// State carried between menu choices
pub struct Session<S> {
    source: PathBuf,
    cleaner: ReviewCleaner,
    classifier: SentimentClassifier<S>,
    charts: ChartRenderer,
    cleaned: Option<ReviewTable>,
    labeled: Option<LabeledTable>,
}

impl<S: PolarityScorer> Session<S> {
    pub fn new<P: Into<PathBuf>>(
        source: P,
        cleaner: ReviewCleaner,
        classifier: SentimentClassifier<S>,
        charts: ChartRenderer,
    ) -> Self {
        Self {
            source: source.into(),
            cleaner,
            classifier,
            charts,
            cleaned: None,
            labeled: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn cleaned(&self) -> Option<&ReviewTable> {
        self.cleaned.as_ref()
    }

    pub fn labeled(&self) -> Option<&LabeledTable> {
        self.labeled.as_ref()
    }

    /// Run one choice, printing progress and guard messages to `out`
    pub fn handle<W: Write>(&mut self, choice: MenuChoice, out: &mut W) -> io::Result<Flow> {
        debug!(?choice, "menu choice");

        match choice {
            MenuChoice::Preprocess => {
                writeln!(out, "\nPreprocessing data...")?;
                // labels always belong to the current cleaned table
                self.labeled = None;
                self.cleaned = match self.cleaner.clean(&self.source) {
                    Ok(output) => {
                        writeln!(
                            out,
                            "Preprocessing complete. Saved to '{}'",
                            output.output_path.display()
                        )?;
                        Some(output.table)
                    }
                    Err(e) => {
                        writeln!(out, "Error: {e}")?;
                        None
                    }
                };
            }
            MenuChoice::Analyze => match &self.cleaned {
                None => writeln!(out, "Error: Load data first (Option 1)!")?,
                Some(table) => {
                    writeln!(out, "\nAnalyzing sentiment...")?;
                    self.labeled = match self.classifier.classify(table) {
                        Ok(output) => {
                            writeln!(out, "Saved to {}", output.output_path.display())?;
                            writeln!(out, "{}", output.table)?;
                            Some(output.table)
                        }
                        Err(e) => {
                            writeln!(out, "Error: {e}")?;
                            None
                        }
                    };
                }
            },
            MenuChoice::RatingDistribution => match &self.cleaned {
                None => writeln!(out, "Error: No data loaded!")?,
                Some(table) => report(out, self.charts.plot_rating_distribution(table.iter()))?,
            },
            MenuChoice::SentimentHeatmap => match &self.labeled {
                None => writeln!(out, "{}", AnalysisMissing)?,
                Some(table) => report(out, self.charts.plot_sentiment_heatmap(table))?,
            },
            MenuChoice::SpoilerImpact => match &self.labeled {
                None => writeln!(out, "{}", AnalysisMissing)?,
                Some(table) if !has_spoiler_data(table) => {
                    writeln!(out, "Error: No 'spoiler_tag' column found!")?
                }
                Some(table) => report(out, self.charts.plot_spoiler_impact(table))?,
            },
            MenuChoice::Dashboard => match &self.labeled {
                None => writeln!(out, "{}", AnalysisMissing)?,
                Some(table) => report(out, self.charts.plot_dashboard(table))?,
            },
            MenuChoice::Exit => {
                writeln!(out, "\nExiting...")?;
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }
}

struct AnalysisMissing;

impl fmt::Display for AnalysisMissing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Error: Perform sentiment analysis first (Option 2)!")
    }
}

fn report<W: Write>(out: &mut W, outcome: Result<PathBuf>) -> io::Result<()> {
    match outcome {
        Ok(path) => writeln!(out, "Figure saved as: {}", path.display()),
        Err(e) => writeln!(out, "Error: {e}"),
    }
}

/// Print the menu
pub fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{TITLE}")?;
    for (i, option) in OPTIONS.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, option)?;
    }
    write!(out, "Enter your choice (1-7): ")?;
    out.flush()
}

/// Prompt until the user exits or input ends
pub fn run_menu<S, R, W>(session: &mut Session<S>, input: R, mut out: W) -> io::Result<()>
where
    S: PolarityScorer,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        print_menu(&mut out)?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };

        match line?.parse::<MenuChoice>() {
            Ok(choice) => {
                if session.handle(choice, &mut out)? == Flow::Exit {
                    return Ok(());
                }
            }
            Err(_) => writeln!(out, "Invalid choice! Please enter 1-7.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::ValenceAnalyzer;
    use crate::utils::{ChartSettings, PathSettings, ProgressLog};
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};

    const SOURCE: &str = r#"[
        {"reviewer": "a", "movie": "m", "rating": 8, "review_summary": "s",
         "spoiler_tag": 0, "review_detail": "This movie was AMAZING!!! <br> Loved it."},
        {"reviewer": "b", "movie": "m", "rating": 5, "review_summary": "s",
         "spoiler_tag": 1, "review_detail": "It was okay, nothing special..."}
    ]"#;

    fn session(dir: &TempDir) -> Session<ValenceAnalyzer> {
        let source = dir.path().join("IMDB_REVIEWS.json");
        std::fs::write(&source, SOURCE).unwrap();

        let paths = PathSettings {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let log = ProgressLog::new(paths.progress_log_path());
        Session::new(
            source,
            ReviewCleaner::new(paths.clone(), log.clone()),
            SentimentClassifier::new(ValenceAnalyzer::new(), paths.clone(), log.clone()),
            ChartRenderer::new(ChartSettings::default(), paths, log),
        )
    }

    fn drive(session: &mut Session<ValenceAnalyzer>, input: &str) -> String {
        let mut out = Vec::new();
        run_menu(session, Cursor::new(input.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::Preprocess));
        assert_eq!(" 6 ".parse::<MenuChoice>(), Ok(MenuChoice::Dashboard));
        assert_eq!("7".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert_eq!("EXIT".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert!("8".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn test_guards_before_loading() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);

        let output = drive(&mut session, "2\n3\n4\n5\n6\n7\n");

        assert!(output.contains("Error: Load data first (Option 1)!"));
        assert!(output.contains("Error: No data loaded!"));
        assert_eq!(output.matches("Error: Perform sentiment analysis first (Option 2)!").count(), 3);
        assert!(output.ends_with("\nExiting...\n"));
        assert!(session.cleaned().is_none());
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);

        let output = drive(&mut session, "9\nhello\nexit\n");

        assert_eq!(output.matches("Invalid choice! Please enter 1-7.").count(), 2);
        assert_eq!(output.matches(TITLE).count(), 3);
    }

    #[test]
    fn test_end_of_input_exits() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);

        let output = drive(&mut session, "");
        assert_eq!(output.matches(TITLE).count(), 1);
    }

    #[test]
    fn test_full_session() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);

        let output = drive(&mut session, "1\n2\n3\n4\n5\n6\n7\n");

        assert!(output.contains("Preprocessing complete. Saved to '"));
        assert!(!output.contains("Error"));
        assert_eq!(session.cleaned().map(ReviewTable::len), Some(2));
        assert_eq!(session.labeled().map(LabeledTable::len), Some(2));
        for chart in [
            "reviews_per_rating.svg",
            "Sentiment_vs_rating.svg",
            "spoiler_impact.svg",
            "dashboard.svg",
        ] {
            assert!(dir.path().join(chart).exists(), "{chart} missing");
        }
    }

    #[test]
    fn test_failed_load_clears_state() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        drive(&mut session, "1\n");
        assert!(session.cleaned().is_some());

        std::fs::write(session.source(), "{not json").unwrap();
        let output = drive(&mut session, "1\n2\n");

        assert!(output.contains("Error: JSON error"));
        assert!(output.contains("Error: Load data first (Option 1)!"));
        assert!(session.cleaned().is_none());
    }

    #[test]
    fn test_spoiler_guard() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        std::fs::write(
            session.source(),
            r#"[{"reviewer": "a", "movie": "m", "rating": 3, "review_summary": "s",
                 "spoiler_tag": null, "review_detail": "bad"}]"#,
        )
        .unwrap();

        let output = drive(&mut session, "1\n2\n5\n");
        assert!(output.contains("Error: No 'spoiler_tag' column found!"));
    }

    #[test]
    fn test_reload_drops_stale_labels() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        drive(&mut session, "1\n2\n");
        assert!(session.labeled().is_some());

        let output = drive(&mut session, "1\n4\n");

        assert!(session.cleaned().is_some());
        assert!(session.labeled().is_none());
        assert!(output.contains("Error: Perform sentiment analysis first (Option 2)!"));
    }
}
