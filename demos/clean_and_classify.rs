//! Example: full pipeline on a small review dump
//!
//! Writes a sample JSON source to a temporary directory, cleans it,
//! classifies it and renders the dashboard.
//!
//! Run:
//! ```bash
//! cargo run --example clean_and_classify
//! ```

use review_sentiment::utils::ChartSettings;
use review_sentiment::{
    ChartRenderer, PathSettings, ProgressLog, ReviewCleaner, SentimentClassifier, SentimentLabel,
    ValenceAnalyzer,
};

const SAMPLE: &str = r#"[
    {"reviewer": "ur1", "movie": "Arrival", "rating": 9, "review_summary": "Moving",
     "spoiler_tag": 0, "review_detail": "Beautiful and <b>brilliant</b>. Loved every minute."},
    {"reviewer": "ur2", "movie": "Arrival", "rating": 4, "review_summary": "Slow",
     "spoiler_tag": 1, "review_detail": "Boring middle act, but the twist was great."},
    {"reviewer": "ur3", "movie": "Cats", "rating": 1, "review_summary": "Why",
     "spoiler_tag": 0, "review_detail": "Terrible. Just terrible."},
    {"reviewer": "ur4", "movie": "Cats", "rating": 2, "review_summary": "Dup",
     "spoiler_tag": 0, "review_detail": "terrible  just TERRIBLE"},
    {"reviewer": "ur5", "movie": "Cats", "rating": null, "review_summary": "Empty",
     "spoiler_tag": null, "review_detail": null}
]"#;

fn main() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join("review_sentiment_demo");
    std::fs::create_dir_all(&dir)?;
    let source = dir.join("sample_reviews.json");
    std::fs::write(&source, SAMPLE)?;

    let paths = PathSettings {
        output_dir: dir.clone(),
        ..Default::default()
    };
    let log = ProgressLog::new(paths.progress_log_path());

    println!("📝 Cleaning {}...", source.display());
    let cleaned = ReviewCleaner::new(paths.clone(), log.clone()).clean(&source)?;
    println!("   {}", cleaned.stats);
    println!("   Saved to {}\n", cleaned.output_path.display());

    println!("📊 Classifying...");
    let classifier = SentimentClassifier::new(ValenceAnalyzer::new(), paths.clone(), log.clone());
    let labeled = classifier.classify(&cleaned.table)?;
    for record in labeled.table.iter() {
        println!(
            "   {:8} {:+.4} {:8} {}",
            record.review.movie,
            record.scores.compound,
            record.sentiment.as_str(),
            record.review.review_detail
        );
    }
    println!("   {}\n", labeled.table);

    let charts = ChartRenderer::new(ChartSettings::default(), paths, log.clone());
    let dashboard = charts.plot_dashboard(&labeled.table)?;
    println!("🎯 Dashboard saved to {}", dashboard.display());

    let positive = labeled.table.count(SentimentLabel::Positive);
    println!("   {positive} of {} reviews are positive", labeled.table.len());
    println!("   Progress log: {}", log.path().display());
    Ok(())
}
