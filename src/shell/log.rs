//! Append-only command log sink.
//!
//! The file is opened, appended, and closed for every line, and truncated
//! once at session start. Write failures are swallowed (traced at warn
//! level): a broken log sink must never interrupt interactive use.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Sink for timestamped command log lines.
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl Into<PathBuf>) -> LogSink {
        LogSink { path: path.into() }
    }

    /// Empties the log file, creating it if needed.
    pub fn truncate(&self) {
        if let Err(e) = std::fs::write(&self.path, "") {
            tracing::warn!(error = %e, path = %self.path.display(), "cannot truncate log");
        }
    }

    /// Appends one line, followed by a newline.
    pub fn append(&self, line: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", line));

        if let Err(e) = result {
            tracing::warn!(error = %e, path = %self.path.display(), "log write failed");
        }
    }
}
