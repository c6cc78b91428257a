//! Property-based tests for structured_syslog using proptest

use proptest::prelude::*;
use structured_syslog::core::attributes::{ATTRIBUTE_GROUPS, PROCESS_ELEMENT_PARAMS};
use structured_syslog::core::log_level::{severity_priority, SEVERITY_PRIORITIES};
use structured_syslog::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
        Just(LogLevel::Panic),
    ]
}

/// Values without characters that need SD-PARAM escaping
fn plain_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./-]{1,12}"
}

fn render(entry: &LogEntry) -> String {
    String::from_utf8(SyslogFormatter.format(entry).unwrap()).unwrap()
}

// ============================================================================
// LogLevel / priority
// ============================================================================

proptest! {
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.as_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    #[test]
    fn test_level_parse_case_insensitive(level in any_level(), upper in any::<bool>()) {
        let text = if upper { level.as_str().to_uppercase() } else { level.as_str().to_string() };
        prop_assert_eq!(text.parse::<LogLevel>().unwrap(), level);
    }

    #[test]
    fn test_header_priority_matches_table(level in any_level(), message in "[a-z ]{0,20}") {
        let line = render(&LogEntry::new(level, message));
        let expected = SEVERITY_PRIORITIES
            .iter()
            .find(|(name, _)| *name == level.as_str())
            .map(|(_, priority)| *priority)
            .unwrap();
        let header = format!("<{}>1 ", expected);
        prop_assert!(line.starts_with(&header));
    }

    #[test]
    fn test_unknown_severity_is_zero(name in "[a-z]{1,10}") {
        prop_assume!(SEVERITY_PRIORITIES.iter().all(|(known, _)| *known != name));
        prop_assert_eq!(severity_priority(&name), 0);
    }
}

// ============================================================================
// LogFormat
// ============================================================================

proptest! {
    #[test]
    fn test_format_text_roundtrip(format in prop_oneof![Just(LogFormat::Syslog), Just(LogFormat::Json)]) {
        prop_assert_eq!(format.text().parse::<LogFormat>().unwrap(), format);
    }

    #[test]
    fn test_unknown_format_text_fails(text in "[a-z]{1,10}") {
        prop_assume!(text != "syslog" && text != "json");
        let is_invalid_format = matches!(
            text.parse::<LogFormat>(),
            Err(LoggerError::InvalidFormat { .. })
        );
        prop_assert!(is_invalid_format);
    }
}

// ============================================================================
// Structured data elements
// ============================================================================

proptest! {
    /// Without a transaction id there is never a process element
    #[test]
    fn test_no_process_element_without_transaction(
        action_id in proptest::option::of(plain_value()),
        action_name in proptest::option::of(plain_value()),
        thread_name in proptest::option::of(plain_value()),
        process_name in proptest::option::of(plain_value()),
    ) {
        let mut entry = LogEntry::new(LogLevel::Info, "m");
        if let Some(v) = action_id { entry = entry.with_field("actionid", v); }
        if let Some(v) = action_name { entry = entry.with_field("actionname", v); }
        if let Some(v) = thread_name { entry = entry.with_field("threadname", v); }
        if let Some(v) = process_name { entry = entry.with_field("processname", v); }

        prop_assert!(!render(&entry).contains("process@1"));
    }

    /// With a transaction id, every process parameter appears, empty when absent
    #[test]
    fn test_process_element_substitutes_empty(
        transaction_id in plain_value(),
        present in proptest::collection::vec(any::<bool>(), 6),
        value in plain_value(),
    ) {
        let mut entry = LogEntry::new(LogLevel::Info, "m").with_field("transactionid", transaction_id.clone());
        for ((_, key), keep) in PROCESS_ELEMENT_PARAMS.iter().zip(&present) {
            if *keep && *key != "transactionid" {
                entry = entry.with_field(*key, value.clone());
            }
        }

        let line = render(&entry);
        let start = line.find("[process@1 ").unwrap();
        let element = &line[start..start + line[start..].find(']').unwrap() + 1];

        for ((param, key), keep) in PROCESS_ELEMENT_PARAMS.iter().zip(&present) {
            let expected = if *key == "transactionid" {
                format!("{}=\"{}\"", param, transaction_id)
            } else if *keep {
                format!("{}=\"{}\"", param, value)
            } else {
                format!("{}=\"\"", param)
            };
            prop_assert!(element.contains(&expected), "{} missing from {}", expected, element);
        }
    }

    /// A group element appears iff one of its keys is present and holds exactly those keys
    #[test]
    fn test_group_elements_hold_present_keys(
        mask in proptest::collection::vec(any::<bool>(), 6),
        value in plain_value(),
    ) {
        let all_keys: Vec<&str> = ATTRIBUTE_GROUPS.iter().flat_map(|g| g.keys.iter().copied()).collect();
        let mut entry = LogEntry::new(LogLevel::Info, "m");
        for (key, keep) in all_keys.iter().zip(&mask) {
            if *keep {
                entry = entry.with_field(*key, value.clone());
            }
        }

        let line = render(&entry);
        for group in ATTRIBUTE_GROUPS.iter() {
            let present: Vec<String> = group
                .keys
                .iter()
                .filter(|key| entry.attribute(key).is_some())
                .map(|key| format!("{}=\"{}\"", key, value))
                .collect();
            let prefix = format!("[{}@1", group.name);

            if present.is_empty() {
                prop_assert!(!line.contains(&prefix));
            } else {
                let expected = format!("{} {}]", prefix, present.join(" "));
                prop_assert!(line.contains(&expected), "{} missing from {}", expected, line);
            }
        }
        prop_assert!(!line.contains(" ]"));
    }

    /// Every record renders as exactly one newline-terminated line
    #[test]
    fn test_single_line_output(
        message in "\\PC{0,40}",
        level in any_level(),
        host in "[a-z0-9\n\r\t<>]{0,12}",
        transaction_id in "[a-zA-Z0-9\n\r]{0,8}",
        body in "[a-z\"\\]\n\r\t {}]{0,24}",
    ) {
        let entry = LogEntry::new(level, message)
            .with_field("host", host)
            .with_field("transactionid", transaction_id)
            .with_field("requestBody", body);
        let line = render(&entry);
        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);
    }
}
