//! Chart rendering
//!
//! Rating distribution, rating by sentiment heatmap, spoiler impact and a
//! dashboard combining all three, written as SVG into the output directory.

mod render;
mod summary;

pub use summary::{
    has_spoiler_data, rating_counts, sentiment_by_rating, spoiler_groups, BoxStats,
    SentimentCrosstab, SpoilerGroup,
};

use crate::error::{Error, Result};
use crate::models::{LabeledTable, ReviewRecord};
use crate::utils::{ChartSettings, PathSettings, ProgressLog};
use plotters::coord::Shift;
use plotters::prelude::*;
use render::DrawResult;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const RATING_CHART: &str = "reviews_per_rating.svg";
pub const HEATMAP_CHART: &str = "Sentiment_vs_rating.svg";
pub const SPOILER_CHART: &str = "spoiler_impact.svg";
pub const DASHBOARD_CHART: &str = "dashboard.svg";

const CAPTION_SIZE: u32 = 28;
const PANEL_CAPTION_SIZE: u32 = 20;

/// Chart renderer
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    settings: ChartSettings,
    paths: PathSettings,
    log: ProgressLog,
}

impl ChartRenderer {
    pub fn new(settings: ChartSettings, paths: PathSettings, log: ProgressLog) -> Self {
        Self {
            settings,
            paths,
            log,
        }
    }

    /// Bar chart of reviews per rating
    pub fn plot_rating_distribution<'a, I>(&self, reviews: I) -> Result<PathBuf>
    where
        I: IntoIterator<Item = &'a ReviewRecord>,
    {
        let counts = rating_counts(reviews);
        let path = self.paths.chart_path(RATING_CHART);

        self.render(&path, self.size(), |root| {
            render::draw_rating_distribution(root, &counts, CAPTION_SIZE)
        })?;

        self.log.log("Rating distribution (1-10) plotted")?;
        self.log.log(&format!("Figure saved as: {}", path.display()))?;
        Ok(path)
    }

    /// Heatmap of label counts per rating
    pub fn plot_sentiment_heatmap(&self, table: &LabeledTable) -> Result<PathBuf> {
        let crosstab = sentiment_by_rating(table);
        let path = self.paths.chart_path(HEATMAP_CHART);

        self.render(&path, self.size(), |root| {
            render::draw_sentiment_heatmap(root, &crosstab, CAPTION_SIZE)
        })?;

        self.log.log("Sentiment vs. rating heatmap plotted")?;
        self.log.log(&format!("figure saved as : {}", path.display()))?;
        Ok(path)
    }

    /// Box plot of compound scores by spoiler tag
    pub fn plot_spoiler_impact(&self, table: &LabeledTable) -> Result<PathBuf> {
        let groups = spoiler_groups(table);
        let path = self.paths.chart_path(SPOILER_CHART);

        self.render(&path, self.size(), |root| {
            render::draw_spoiler_impact(root, &groups, CAPTION_SIZE)
        })?;

        self.log.log("Spoiler impact plotted")?;
        self.log.log(&format!("figure saved as : {}", path.display()))?;
        Ok(path)
    }

    /// The three panels on a two by two grid
    pub fn plot_dashboard(&self, table: &LabeledTable) -> Result<PathBuf> {
        let counts = rating_counts(table.iter().map(|r| &r.review));
        let crosstab = sentiment_by_rating(table);
        let groups = spoiler_groups(table);
        let path = self.paths.chart_path(DASHBOARD_CHART);

        let size = (self.settings.width * 2, self.settings.height * 2);
        self.render(&path, size, |root| {
            let panels = root.split_evenly((2, 2));
            render::draw_rating_distribution(&panels[0], &counts, PANEL_CAPTION_SIZE)?;
            render::draw_sentiment_heatmap(&panels[1], &crosstab, PANEL_CAPTION_SIZE)?;
            render::draw_spoiler_impact(&panels[2], &groups, PANEL_CAPTION_SIZE)?;
            Ok(())
        })?;

        self.log.log("displayed dashboard")?;
        info!("dashboard saved to {}", path.display());
        Ok(path)
    }

    fn size(&self) -> (u32, u32) {
        (self.settings.width, self.settings.height)
    }

    fn render<F>(&self, path: &Path, size: (u32, u32), draw: F) -> Result<()>
    where
        F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> DrawResult<()>,
    {
        let outcome = (|| -> DrawResult<()> {
            let root = SVGBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE)?;
            draw(&root)?;
            root.present()?;
            Ok(())
        })();

        outcome.map_err(|e| {
            let err = Error::ChartError(format!("{}: {}", path.display(), e));
            error!("{}", err);
            self.log.log_failure(&format!("Error during plotting: {err}"));
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabeledRecord, PolarityScores};
    use tempfile::tempdir;

    fn record(rating: u8, spoiler: bool, compound: f64) -> LabeledRecord {
        let scores = PolarityScores {
            compound,
            ..Default::default()
        };
        LabeledRecord {
            review: ReviewRecord {
                reviewer: "r".to_string(),
                movie: "m".to_string(),
                rating: Some(rating),
                review_summary: String::new(),
                spoiler_tag: Some(spoiler),
                review_detail: "text".to_string(),
            },
            sentiment: scores.label(),
            scores,
        }
    }

    fn renderer(dir: &Path) -> ChartRenderer {
        let paths = PathSettings {
            output_dir: dir.to_path_buf(),
            ..Default::default()
        };
        let log = ProgressLog::new(paths.progress_log_path());
        ChartRenderer::new(ChartSettings::default(), paths, log)
    }

    fn sample() -> LabeledTable {
        LabeledTable::new(vec![
            record(8, false, 0.83),
            record(5, true, -0.09),
            record(8, true, 0.4),
            record(1, false, -0.6),
        ])
    }

    #[test]
    fn test_all_charts_written() {
        let dir = tempdir().unwrap();
        let renderer = renderer(dir.path());
        let table = sample();

        let paths = [
            renderer.plot_rating_distribution(table.iter().map(|r| &r.review)).unwrap(),
            renderer.plot_sentiment_heatmap(&table).unwrap(),
            renderer.plot_spoiler_impact(&table).unwrap(),
            renderer.plot_dashboard(&table).unwrap(),
        ];

        for path in &paths {
            let svg = std::fs::read_to_string(path).unwrap();
            assert!(svg.contains("<svg"), "{} is not an SVG", path.display());
        }
        assert!(paths[1].ends_with(HEATMAP_CHART));
    }

    #[test]
    fn test_chart_log_lines() {
        let dir = tempdir().unwrap();
        let renderer = renderer(dir.path());
        let table = sample();

        renderer.plot_rating_distribution(table.iter().map(|r| &r.review)).unwrap();
        renderer.plot_dashboard(&table).unwrap();

        let log = std::fs::read_to_string(dir.path().join("code_log.txt")).unwrap();
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(" : Rating distribution (1-10) plotted"));
        assert!(lines[1].contains(" : Figure saved as: "));
        assert!(lines[2].ends_with(" : displayed dashboard"));
    }

    #[test]
    fn test_empty_table_still_renders() {
        let dir = tempdir().unwrap();
        let path = renderer(dir.path())
            .plot_sentiment_heatmap(&LabeledTable::new(Vec::new()))
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_target_is_chart_error() {
        let dir = tempdir().unwrap();
        let renderer = renderer(&dir.path().join("missing"));

        let err = renderer.plot_spoiler_impact(&sample()).unwrap_err();
        assert!(matches!(err, Error::ChartError(_)));
    }
}
