//! Formatter trait and the JSON renderer

use super::error::Result;
use super::log_entry::LogEntry;
use chrono::{DateTime, SecondsFormat, Utc};

/// Key holding the record timestamp in JSON output
pub const JSON_TIME_KEY: &str = "time";
/// Key holding the level name in JSON output
pub const JSON_LEVEL_KEY: &str = "level";
/// Key holding the message in JSON output
pub const JSON_MESSAGE_KEY: &str = "msg";

/// Renders a log entry into its wire representation
pub trait Formatter: Send + Sync {
    fn format(&self, entry: &LogEntry) -> Result<Vec<u8>>;
    fn name(&self) -> &str;
}

/// RFC3339 timestamp in UTC, second precision with a `Z` suffix
pub(crate) fn rfc3339_utc(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// One JSON object per line: attributes plus `time`, `level` and `msg`
///
/// Attributes whose key collides with one of those three are emitted as
/// `fields.<key>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        let mut json_obj = serde_json::Map::new();

        for (key, value) in entry.context.fields() {
            let key = match key.as_str() {
                JSON_TIME_KEY | JSON_LEVEL_KEY | JSON_MESSAGE_KEY => format!("fields.{}", key),
                _ => key.clone(),
            };
            json_obj.insert(key, value.to_json_value());
        }

        json_obj.insert(
            JSON_TIME_KEY.to_string(),
            serde_json::Value::String(rfc3339_utc(&entry.timestamp)),
        );
        json_obj.insert(
            JSON_LEVEL_KEY.to_string(),
            serde_json::Value::String(entry.level.as_str().to_string()),
        );
        json_obj.insert(
            JSON_MESSAGE_KEY.to_string(),
            serde_json::Value::String(entry.message.clone()),
        );

        let mut bytes = serde_json::to_vec(&serde_json::Value::Object(json_obj))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn name(&self) -> &str {
        "json"
    }
}
