//! Configuration, logging setup and the progress log

pub mod config;
pub mod progress_log;

pub use config::{
    init_logging, load_config, load_config_or_default, save_config, AppConfig, ChartSettings,
    ConfigError, LoggingSettings, PathSettings, SentimentSettings, LABELED_FILE,
    PREPROCESSED_PREFIX,
};
pub use progress_log::{ProgressLog, DEFAULT_LOG_FILE, TIMESTAMP_FORMAT};
