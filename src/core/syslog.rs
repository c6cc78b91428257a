//! RFC5424-style syslog renderer
//!
//! Line layout:
//!
//! ```text
//! <priority>1 <timestamp> [priority-fields] [process@1 ...] [<group>@1 ...]* <message>\n
//! ```
//!
//! - `priority` comes from the level's syslog priority number.
//! - Priority fields (`host`, `threadname`, `processid`, `messageid`) are
//!   written bare, each followed by a space.
//! - Line breaks and tabs in the message and in attribute values are written
//!   as `\n`, `\r` and `\t`, so one record is always one line.
//! - The `process@1` element is written only when `transactionid` is present
//!   and non-empty; its other parameters fall back to `""`.
//! - Each attribute group yields one element holding only the keys the entry
//!   carries; groups with no present key are skipped.

use super::attributes::{
    AttributeGroup, ATTRIBUTE_GROUPS, PRIORITY_ATTRIBUTES, PROCESS_ELEMENT_PARAMS,
    TRANSACTION_ID,
};
use super::error::Result;
use super::formatter::{rfc3339_utc, Formatter};
use super::log_entry::LogEntry;
use std::borrow::Cow;

/// Syslog protocol version written after the priority
const SYSLOG_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct SyslogFormatter;

impl SyslogFormatter {
    /// Leading bare segment built from the priority attributes
    fn priority_segment(entry: &LogEntry) -> String {
        let mut segment = String::new();
        for key in PRIORITY_ATTRIBUTES {
            if let Some(value) = entry.attribute(key) {
                segment.push_str(&escape_line_breaks(&value.to_string()));
                segment.push(' ');
            }
        }
        segment
    }

    /// `[process@1 ...]`, present only when the entry has a transaction id
    fn process_element(entry: &LogEntry) -> Option<String> {
        let transaction_id = entry.attribute(TRANSACTION_ID)?;
        if transaction_id.is_empty() {
            return None;
        }

        let params = PROCESS_ELEMENT_PARAMS
            .iter()
            .map(|(param, key)| {
                let value = entry
                    .attribute(key)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                format!("{}=\"{}\"", param, escape_param_value(&value))
            })
            .collect::<Vec<_>>()
            .join(" ");

        Some(format!("[process@1 {}]", params))
    }

    /// `[<group>@1 key="value" ...]` for the keys of `group` the entry carries
    fn group_element(group: &AttributeGroup, entry: &LogEntry) -> Option<String> {
        let params = group
            .keys
            .iter()
            .filter_map(|key| {
                entry.attribute(key).map(|value| {
                    format!("{}=\"{}\"", key, escape_param_value(&value.to_string()))
                })
            })
            .collect::<Vec<_>>();

        if params.is_empty() {
            return None;
        }

        Some(format!("[{} {}]", group.sd_id(), params.join(" ")))
    }
}

impl Formatter for SyslogFormatter {
    fn format(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        let mut line = format!(
            "<{}>{} {}",
            entry.level.syslog_priority(),
            SYSLOG_VERSION,
            rfc3339_utc(&entry.timestamp)
        );

        let segment = Self::priority_segment(entry);
        if !segment.is_empty() {
            line.push(' ');
            line.push_str(&segment);
        }

        if let Some(element) = Self::process_element(entry) {
            line.push(' ');
            line.push_str(&element);
        }

        for group in ATTRIBUTE_GROUPS.iter() {
            if let Some(element) = Self::group_element(group, entry) {
                line.push(' ');
                line.push_str(&element);
            }
        }

        line.truncate(line.trim_end().len());
        line.push(' ');
        line.push_str(&escape_line_breaks(&entry.message));
        line.push('\n');

        Ok(line.into_bytes())
    }

    fn name(&self) -> &str {
        "syslog"
    }
}

/// Replace newlines, carriage returns and tabs with their escape sequences
fn escape_line_breaks(value: &str) -> Cow<'_, str> {
    if !value.contains(['\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }

    Cow::Owned(
        value
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t"),
    )
}

/// Escape an SD-PARAM value: `"`, `\` and `]` get a backslash (RFC5424
/// section 6.3.3), line breaks and tabs become `\n`, `\r`, `\t`
fn escape_param_value(value: &str) -> Cow<'_, str> {
    if !value.contains(['"', '\\', ']', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            '"' | '\\' | ']' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, LogContext, LogLevel};
    use chrono::{DateTime, TimeZone, Utc};

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
    }

    fn render(level: LogLevel, message: &str, context: LogContext) -> String {
        let entry = LogEntry::new(level, message)
            .with_context(context)
            .with_timestamp(fixed_datetime());
        String::from_utf8(SyslogFormatter.format(&entry).unwrap()).unwrap()
    }

    #[test]
    fn test_transaction_with_host() {
        let context = LogContext::new()
            .with_field("transactionid", "T1")
            .with_field("actionname", "Create")
            .with_field("host", "h1");

        let line = render(LogLevel::Error, "failed", context);
        assert_eq!(
            line,
            "<11>1 2025-01-08T10:30:45Z h1  [process@1 processName=\"\" transactionID=\"T1\" \
             actionID=\"\" actionName=\"Create\" threadID=\"\" threadName=\"\"] failed\n"
        );
    }

    #[test]
    fn test_account_group_without_process() {
        let context = LogContext::new()
            .with_field("user", "alice")
            .with_field("roleID", "admin");

        let line = render(LogLevel::Info, "login", context);
        assert!(line.contains("[account@1 user=\"alice\" roleID=\"admin\"]"));
        assert!(!line.contains("process@1"));
        assert!(line.ends_with("] login\n"));
    }

    #[test]
    fn test_no_attributes() {
        let line = render(LogLevel::Warn, "disk almost full", LogContext::new());
        assert_eq!(line, "<12>1 2025-01-08T10:30:45Z disk almost full\n");
    }

    #[test]
    fn test_priority_segment_order() {
        let context = LogContext::new()
            .with_field("messageid", "Create")
            .with_field("processid", 4242)
            .with_field("host", "h1")
            .with_field("threadname", "worker-1");

        let line = render(LogLevel::Debug, "m", context);
        assert_eq!(line, "<15>1 2025-01-08T10:30:45Z h1 worker-1 4242 Create m\n");
    }

    #[test]
    fn test_process_block_requires_transaction_id() {
        let context = LogContext::new()
            .with_field("actionid", "A1")
            .with_field("actionname", "Delete")
            .with_field("threadid", "7")
            .with_field("processname", "billing");

        let line = render(LogLevel::Info, "m", context);
        assert!(!line.contains("process@1"));
    }

    #[test]
    fn test_empty_transaction_id_skips_process_block() {
        let context = LogContext::new()
            .with_field("transactionid", "")
            .with_field("processname", "billing");

        let line = render(LogLevel::Info, "m", context);
        assert!(!line.contains("process@1"));
    }

    #[test]
    fn test_group_contains_only_present_keys() {
        let context = LogContext::new()
            .with_field("resource", "/orders")
            .with_field("responseCode", 201);

        let line = render(LogLevel::Info, "created", context);
        assert!(line.contains(" [request@1 resource=\"/orders\"]"));
        assert!(line.contains(" [response@1 responseCode=\"201\"]"));
        assert!(!line.contains("method="));
        assert!(!line.contains("account@1"));
    }

    #[test]
    fn test_groups_emitted_in_declared_order() {
        let context = LogContext::new()
            .with_field("responseCode", 200)
            .with_field("method", "GET")
            .with_field("user", "bob");

        let line = render(LogLevel::Info, "m", context);
        let account = line.find("[account@1").unwrap();
        let request = line.find("[request@1").unwrap();
        let response = line.find("[response@1").unwrap();
        assert!(account < request && request < response);
    }

    #[test]
    fn test_null_value_renders_empty() {
        let context = LogContext::new()
            .with_field("requestBody", None::<String>)
            .with_field("transactionid", "T9")
            .with_field("actionid", FieldValue::Null);

        let line = render(LogLevel::Info, "m", context);
        assert!(line.contains("[request@1 requestBody=\"\"]"));
        assert!(line.contains("actionID=\"\""));
    }

    #[test]
    fn test_param_values_are_escaped() {
        let context = LogContext::new().with_field("requestBody", r#"{"a":"[1]"} \ end"#);

        let line = render(LogLevel::Info, "m", context);
        assert!(line.contains(r#"requestBody="{\"a\":\"[1\]\"} \\ end""#));
    }

    #[test]
    fn test_attribute_line_breaks_stay_on_one_line() {
        let context = LogContext::new()
            .with_field("host", "h1\n<11>1 fake")
            .with_field("requestBody", "{\n \"a\": 1\n}");

        let line = render(LogLevel::Info, "m", context);
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.starts_with("<14>1 2025-01-08T10:30:45Z h1\\n<11>1 fake  [request@1 "));
        assert!(line.contains(r#"requestBody="{\n \"a\": 1\n}""#));
    }

    #[test]
    fn test_message_line_breaks_are_escaped() {
        let line = render(LogLevel::Info, "line one\nfake <11>1 entry\r\tend", LogContext::new());
        assert_eq!(
            line,
            "<14>1 2025-01-08T10:30:45Z line one\\nfake <11>1 entry\\r\\tend\n"
        );
    }

    #[test]
    fn test_elements_without_priority_fields_use_single_space() {
        let context = LogContext::new()
            .with_field("transactionid", "T2")
            .with_field("user", "alice");

        let line = render(LogLevel::Info, "m", context);
        assert!(line.starts_with("<14>1 2025-01-08T10:30:45Z [process@1 "));
        assert!(line.contains("threadName=\"\"] [account@1 user=\"alice\"] m\n"));
    }

    #[test]
    fn test_escape_borrows_clean_values() {
        assert!(matches!(escape_param_value("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_param_value("a]b"), "a\\]b");
        assert_eq!(escape_param_value("a\nb\t"), "a\\nb\\t");
        assert!(matches!(escape_line_breaks("plain"), Cow::Borrowed(_)));
    }
}
