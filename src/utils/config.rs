//! Configuration utilities

use crate::models::TextColumn;
use crate::utils::progress_log::DEFAULT_LOG_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed name of the labeled table
pub const LABELED_FILE: &str = "sentiment_analysis_results.csv";

/// Prefix of the cleaned table name
pub const PREPROCESSED_PREFIX: &str = "preprocessed_";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input and output locations
    pub paths: PathSettings,
    /// Scoring settings
    pub sentiment: SentimentSettings,
    /// Chart settings
    pub charts: ChartSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// File locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Raw JSON review source
    pub source: PathBuf,
    /// Directory receiving tables, charts and the progress log
    pub output_dir: PathBuf,
    /// Progress log file, relative paths resolve against `output_dir`
    pub progress_log: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("IMDB_REVIEWS.json"),
            output_dir: PathBuf::from("."),
            progress_log: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl PathSettings {
    /// `preprocessed_<stem>.csv` in the output directory
    pub fn preprocessed_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir.join(format!("{PREPROCESSED_PREFIX}{stem}.csv"))
    }

    /// The labeled table in the output directory
    pub fn labeled_path(&self) -> PathBuf {
        self.output_dir.join(LABELED_FILE)
    }

    /// Chart file in the output directory
    pub fn chart_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn progress_log_path(&self) -> PathBuf {
        if self.progress_log.is_absolute() {
            self.progress_log.clone()
        } else {
            self.output_dir.join(&self.progress_log)
        }
    }
}

/// Scoring settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentSettings {
    /// Column fed to the scorer
    pub text_column: TextColumn,
    /// Optional VADER-format lexicon replacing the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

/// Chart settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Width of single charts in pixels
    pub width: u32,
    /// Height of single charts in pixels
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 625,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Load configuration from file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::FileError(e.to_string()))?;

    match extension(path.as_ref()) {
        "json" => serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string())),
        "toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string())),
        ext => Err(ConfigError::UnsupportedFormat(ext.to_string())),
    }
}

/// Load configuration, falling back to defaults when the file does not exist
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        tracing::debug!("no config at {}, using defaults", path.as_ref().display());
        Ok(AppConfig::default())
    }
}

/// Save configuration to file
pub fn save_config<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<(), ConfigError> {
    let content = match extension(path.as_ref()) {
        "json" => serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
        "toml" => toml::to_string_pretty(config)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
        ext => return Err(ConfigError::UnsupportedFormat(ext.to_string())),
    };

    std::fs::write(path, content).map_err(|e| ConfigError::FileError(e.to_string()))
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

/// Initialize logging with the specified level; `RUST_LOG` takes precedence
pub fn init_logging(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::filter::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Serialization error
    #[error("Serialize error: {0}")]
    SerializeError(String),
    /// Unsupported format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}
