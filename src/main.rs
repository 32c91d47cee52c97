//! Review sentiment CLI
//!
//! Usage:
//! ```bash
//! cargo run -- --help
//! cargo run -- run --input IMDB_REVIEWS.json
//! cargo run -- score --text "Loved it, what a film"
//! cargo run            # interactive menu
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use review_sentiment::{
    menu::{run_menu, Session},
    sentiment::SentimentLexicon,
    utils::{init_logging, load_config_or_default, save_config, AppConfig, SentimentSettings},
    ChartRenderer, DataLoader, ProgressLog, ReviewCleaner, SentimentClassifier, ValenceAnalyzer,
    ValenceLexicon,
};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "review-sentiment")]
#[command(about = "Clean movie reviews, score their sentiment and chart the results")]
#[command(version)]
struct Cli {
    /// Configuration file path (json or toml)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Directory for tables, charts and the progress log
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Log level (overrides the configuration)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Clean a JSON review source into a CSV table
    Clean {
        /// JSON source (defaults to the configured source)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Score and label a cleaned CSV table
    Classify {
        /// Cleaned CSV (defaults to the table derived from the configured source)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Clean, classify and render every chart
    Run {
        /// JSON source (defaults to the configured source)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Render one chart from a persisted table
    Plot {
        /// Chart to render
        #[arg(value_enum)]
        chart: ChartKind,

        /// Cleaned or labeled CSV to read
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Score a single text
    Score {
        /// Text to analyze
        #[arg(short, long)]
        text: String,
    },

    /// Generate sample configuration file
    Config {
        /// Output path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartKind {
    Rating,
    Heatmap,
    Spoiler,
    Dashboard,
}

/// Everything a subcommand needs, built once from the configuration
struct App {
    config: AppConfig,
    log: ProgressLog,
    analyzer: ValenceAnalyzer,
}

impl App {
    fn new(mut config: AppConfig, output_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = output_dir {
            config.paths.output_dir = dir;
        }
        std::fs::create_dir_all(&config.paths.output_dir).with_context(|| {
            format!("creating output directory {}", config.paths.output_dir.display())
        })?;

        let log = ProgressLog::new(config.paths.progress_log_path());
        let analyzer = build_analyzer(&config.sentiment)?;
        Ok(Self {
            config,
            log,
            analyzer,
        })
    }

    fn cleaner(&self) -> ReviewCleaner {
        ReviewCleaner::new(self.config.paths.clone(), self.log.clone())
    }

    fn classifier(&self) -> SentimentClassifier<&ValenceAnalyzer> {
        SentimentClassifier::new(&self.analyzer, self.config.paths.clone(), self.log.clone())
            .with_text_column(self.config.sentiment.text_column)
    }

    fn charts(&self) -> ChartRenderer {
        ChartRenderer::new(
            self.config.charts.clone(),
            self.config.paths.clone(),
            self.log.clone(),
        )
    }

    fn source(&self, input: Option<PathBuf>) -> PathBuf {
        input.unwrap_or_else(|| self.config.paths.source.clone())
    }

    /// Cleaned table derived from the configured source
    fn cleaned_path(&self) -> PathBuf {
        self.config.paths.preprocessed_path(&self.config.paths.source)
    }
}

fn build_analyzer(settings: &SentimentSettings) -> Result<ValenceAnalyzer> {
    let analyzer = ValenceAnalyzer::new();
    let Some(path) = &settings.lexicon_path else {
        return Ok(analyzer);
    };

    let lexicon = ValenceLexicon::from_file(path)
        .with_context(|| format!("loading lexicon {}", path.display()))?;
    let stats = lexicon.stats();
    info!(
        "Loaded lexicon {} ({} words, {} positive, {} negative)",
        path.display(),
        lexicon.word_count(),
        stats.positive_count,
        stats.negative_count
    );
    Ok(analyzer.with_lexicon(lexicon))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config_or_default(&cli.config)
        .with_context(|| format!("loading configuration {}", cli.config.display()))?;

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        cli.log_level.clone().unwrap_or_else(|| config.logging.level.clone())
    };
    init_logging(&level);

    let output_dir = cli.output_dir;
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => menu(&App::new(config, output_dir)?)?,
        Commands::Clean { input } => clean(&App::new(config, output_dir)?, input)?,
        Commands::Classify { input } => classify(&App::new(config, output_dir)?, input)?,
        Commands::Run { input } => run_all(&App::new(config, output_dir)?, input)?,
        Commands::Plot { chart, input } => plot(&App::new(config, output_dir)?, chart, input)?,
        Commands::Score { text } => score_text(&build_analyzer(&config.sentiment)?, &text),
        Commands::Config { output } => {
            save_config(&AppConfig::default(), &output)?;
            println!("Sample configuration written to {}", output.display());
        }
    }

    Ok(())
}

fn menu(app: &App) -> Result<()> {
    let mut session = Session::new(
        app.config.paths.source.clone(),
        app.cleaner(),
        app.classifier(),
        app.charts(),
    );
    run_menu(&mut session, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

fn clean(app: &App, input: Option<PathBuf>) -> Result<()> {
    let source = app.source(input);
    let output = app
        .cleaner()
        .clean(&source)
        .with_context(|| format!("preprocessing {}", source.display()))?;

    println!("Preprocessing complete. Saved to '{}'", output.output_path.display());
    println!("{}", output.stats);
    Ok(())
}

fn classify(app: &App, input: Option<PathBuf>) -> Result<()> {
    let input = input.unwrap_or_else(|| app.cleaned_path());
    let table = DataLoader::load_reviews(&input)
        .with_context(|| format!("reading cleaned table {}", input.display()))?;

    let output = app.classifier().classify(&table)?;
    println!("Saved to {}", output.output_path.display());
    println!("{}", output.table);
    Ok(())
}

fn run_all(app: &App, input: Option<PathBuf>) -> Result<()> {
    let source = app.source(input);

    println!("\nPreprocessing data...");
    let cleaned = app
        .cleaner()
        .clean(&source)
        .with_context(|| format!("preprocessing {}", source.display()))?;
    println!("{}", cleaned.stats);

    println!("\nAnalyzing sentiment...");
    let labeled = app.classifier().classify(&cleaned.table)?;
    println!("{}", labeled.table);

    let charts = app.charts();
    let rendered = [
        charts.plot_rating_distribution(cleaned.table.iter())?,
        charts.plot_sentiment_heatmap(&labeled.table)?,
        charts.plot_spoiler_impact(&labeled.table)?,
        charts.plot_dashboard(&labeled.table)?,
    ];
    for path in &rendered {
        println!("Figure saved as: {}", path.display());
    }
    Ok(())
}

fn plot(app: &App, chart: ChartKind, input: Option<PathBuf>) -> Result<()> {
    let charts = app.charts();

    let path = match chart {
        ChartKind::Rating => {
            let input = input.unwrap_or_else(|| app.cleaned_path());
            let table = DataLoader::load_reviews(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            charts.plot_rating_distribution(table.iter())?
        }
        kind => {
            let input = input.unwrap_or_else(|| app.config.paths.labeled_path());
            let table = DataLoader::load_labeled(&input)
                .with_context(|| format!("reading labeled table {}", input.display()))?;
            match kind {
                ChartKind::Heatmap => charts.plot_sentiment_heatmap(&table)?,
                ChartKind::Spoiler => charts.plot_spoiler_impact(&table)?,
                _ => charts.plot_dashboard(&table)?,
            }
        }
    };

    println!("Figure saved as: {}", path.display());
    Ok(())
}

fn score_text(analyzer: &ValenceAnalyzer, text: &str) {
    let result = analyzer.analyze(text);

    println!("Text: {}", result.text);
    println!("Label: {}", result.label);
    println!(
        "Scores: neg {:.3}  neu {:.3}  pos {:.3}  compound {:.4}",
        result.scores.negative,
        result.scores.neutral,
        result.scores.positive,
        result.scores.compound
    );

    if !result.key_words.is_empty() {
        println!("\nKey words:");
        for word in &result.key_words {
            let sign = if word.valence > 0.0 { "+" } else { "" };
            println!("  • {} ({}{:.2})", word.word, sign, word.valence);
        }
    }
}
