//! In-memory appender, mostly useful for tests and for embedding hosts that
//! ship log lines themselves

use crate::core::{Appender, LogEntry, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects rendered lines (without the trailing newline) in a shared buffer
///
/// # Example
///
/// ```
/// use structured_syslog::appenders::MemoryAppender;
/// use structured_syslog::Logger;
///
/// let appender = MemoryAppender::new();
/// let lines = appender.lines();
///
/// let logger = Logger::builder().appender(appender).build();
/// logger.warn("cache miss");
///
/// assert!(lines.lock()[0].ends_with("cache miss"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the captured lines
    pub fn lines(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.lines)
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, _entry: &LogEntry, rendered: &[u8]) -> Result<()> {
        let line = String::from_utf8_lossy(rendered);
        self.lines
            .lock()
            .push(line.trim_end_matches('\n').to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
