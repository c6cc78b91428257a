//! Output format configuration for log entries
//!
//! Provides the two rendering strategies for log entries:
//! - Syslog: RFC5424-style line with structured-data elements (default)
//! - Json: one JSON object per line

use super::error::{LoggerError, Result};
use super::formatter::{Formatter, JsonFormatter};
use super::log_entry::LogEntry;
use super::syslog::SyslogFormatter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for log entries
///
/// The text form (`"syslog"` / `"json"`) is what configuration files and
/// environment variables carry; parsing is case-insensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum LogFormat {
    /// RFC5424-style syslog line
    ///
    /// Example: `<14>1 2025-01-08T10:30:45Z h1 [account@1 user="alice"] login`
    #[default]
    Syslog = 1,

    /// JSON format for machine processing
    ///
    /// Example: `{"level":"info","msg":"login","time":"2025-01-08T10:30:45Z","user":"alice"}`
    Json = 2,
}

impl LogFormat {
    /// Canonical text form, the exact inverse of [`FromStr`]
    pub fn text(&self) -> &'static str {
        match self {
            LogFormat::Syslog => "syslog",
            LogFormat::Json => "json",
        }
    }

    /// Render an entry with this format's formatter
    pub fn format(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        match self {
            LogFormat::Syslog => SyslogFormatter.format(entry),
            LogFormat::Json => JsonFormatter.format(entry),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "syslog" => Ok(LogFormat::Syslog),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::invalid_format(s)),
        }
    }
}

impl TryFrom<String> for LogFormat {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LogFormat> for String {
    fn from(format: LogFormat) -> Self {
        format.text().to_string()
    }
}

impl TryFrom<u8> for LogFormat {
    type Error = LoggerError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(LogFormat::Syslog),
            2 => Ok(LogFormat::Json),
            other => Err(LoggerError::invalid_format(other.to_string())),
        }
    }
}
