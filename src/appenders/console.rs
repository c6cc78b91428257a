//! Console appender implementation

use crate::core::{Appender, LogEntry, LogLevel, Result};
use std::io::Write;

/// Writes rendered lines to stdout, routing `error` and above to stderr
pub struct ConsoleAppender {
    split_stderr: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { split_stderr: true }
    }

    /// Send every level to stdout
    #[must_use]
    pub fn stdout_only(mut self) -> Self {
        self.split_stderr = false;
        self
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry, rendered: &[u8]) -> Result<()> {
        if self.split_stderr && entry.level >= LogLevel::Error {
            std::io::stderr().lock().write_all(rendered)?;
        } else {
            std::io::stdout().lock().write_all(rendered)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
