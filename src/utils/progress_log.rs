//! Append-only progress log
//!
//! One line per event, `<timestamp> : <message>`, appended to a plain text
//! file. The file is opened per write so no handle outlives a call.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Timestamp layout, e.g. `2024-Mar-05-14:07:09`
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "code_log.txt";

/// Progress log service handed to each pipeline stage
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a message stamped with the current local time
    pub fn log(&self, message: &str) -> io::Result<()> {
        self.log_at(&Local::now(), message)
    }

    /// Append a message stamped with the given time
    pub fn log_at<Tz>(&self, at: &DateTime<Tz>, message: &str) -> io::Result<()>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let line = format_line(at, message);
        tracing::debug!(log = %self.path.display(), "{}", line);

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")
    }

    /// Record a failure without letting a log write error mask it
    pub fn log_failure(&self, message: &str) {
        if let Err(e) = self.log(message) {
            tracing::warn!("could not write progress log {}: {}", self.path.display(), e);
        }
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

/// Render one log line; embedded line breaks are flattened to spaces
pub fn format_line<Tz>(at: &DateTime<Tz>, message: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let message = message.trim_end().replace(['\r', '\n'], " ");
    format!("{} : {}", at.format(TIMESTAMP_FORMAT), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    #[test]
    fn test_format_line() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(
            format_line(&at, "Pre processing performed"),
            "2024-Mar-05-14:07:09 : Pre processing performed"
        );
    }

    #[test]
    fn test_multiline_message_stays_on_one_line() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(format_line(&at, "bad\ninput\n"), "2024-Dec-31-23:59:00 : bad input");
    }

    #[test]
    fn test_log_appends() {
        let dir = tempdir().unwrap();
        let log = ProgressLog::new(dir.path().join("code_log.txt"));

        log.log("first").unwrap();
        log.log("second").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" : first"));
        assert!(lines[1].ends_with(" : second"));
    }

    #[test]
    fn test_log_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened for appending
        let log = ProgressLog::new(dir.path());
        log.log_failure("ignored");
        assert!(log.log("fails").is_err());
    }
}
