//! Level and format settings as they arrive from configuration text

use super::log_level::LogLevel;
use super::logger::Logger;
use super::output_format::LogFormat;
use serde::{Deserialize, Serialize};

/// Environment variable holding the level name
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Environment variable holding the format name
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Raw level/format settings
///
/// Values stay as text until [`LoggerConfig::apply`], so a bad value in a
/// config file degrades to a default with a warning instead of failing the
/// load.
///
/// # Example
///
/// ```
/// use structured_syslog::{LogFormat, Logger, LoggerConfig};
///
/// let config: LoggerConfig = serde_json::from_str(r#"{"level":"debug","format":"json"}"#).unwrap();
/// let logger = Logger::new();
/// config.apply(&logger);
///
/// assert_eq!(logger.format(), LogFormat::Json);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info.as_str().to_string(),
            format: LogFormat::Syslog.text().to_string(),
        }
    }
}

impl LoggerConfig {
    /// Read `LOG_LEVEL` and `LOG_FORMAT`, keeping defaults for unset variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoggerConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            level: lookup(LOG_LEVEL_ENV).unwrap_or(defaults.level),
            format: lookup(LOG_FORMAT_ENV).unwrap_or(defaults.format),
        }
    }

    /// Push the settings into `logger` through its permissive setters
    pub fn apply(&self, logger: &Logger) -> (LogLevel, LogFormat) {
        let format = logger.set_format_name(&self.format);
        let level = logger.set_level(&self.level);
        (level, format)
    }
}
