//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A sink for rendered log lines
///
/// `rendered` is the output of the logger's current formatter, newline
/// included; `entry` is passed along for routing decisions such as level.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry, rendered: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
