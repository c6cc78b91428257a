//! Well-known attribute keys and their static groupings

/// Request transaction identifier; gates the `process@1` element
pub const TRANSACTION_ID: &str = "transactionid";
pub const THREAD_ID: &str = "threadid";
pub const THREAD_NAME: &str = "threadname";
pub const ACTION_ID: &str = "actionid";
pub const ACTION_NAME: &str = "actionname";
pub const PROCESS_NAME: &str = "processname";
pub const PROCESS_ID: &str = "processid";
pub const MESSAGE_ID: &str = "messageid";
pub const HOST: &str = "host";

/// Rendered as a bare leading segment, in this order, before any
/// structured-data element.
pub const PRIORITY_ATTRIBUTES: [&str; 4] = [HOST, THREAD_NAME, PROCESS_ID, MESSAGE_ID];

/// Parameters of the `process@1` element: (SD-PARAM name, attribute key)
pub const PROCESS_ELEMENT_PARAMS: [(&str, &str); 6] = [
    ("processName", PROCESS_NAME),
    ("transactionID", TRANSACTION_ID),
    ("actionID", ACTION_ID),
    ("actionName", ACTION_NAME),
    ("threadID", THREAD_ID),
    ("threadName", THREAD_NAME),
];

/// A named set of related attribute keys rendered as one
/// structured-data element `[<name>@1 ...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeGroup {
    pub name: &'static str,
    pub keys: &'static [&'static str],
}

impl AttributeGroup {
    /// SD-ID of the element, e.g. `account@1`
    pub fn sd_id(&self) -> String {
        format!("{}@1", self.name)
    }
}

/// Groups are emitted in this order.
pub const ATTRIBUTE_GROUPS: [AttributeGroup; 3] = [
    AttributeGroup {
        name: "account",
        keys: &["user", "roleID"],
    },
    AttributeGroup {
        name: "request",
        keys: &["method", "resource", "requestBody"],
    },
    AttributeGroup {
        name: "response",
        keys: &["responseCode"],
    },
];

/// Find a declared group by name
pub fn attribute_group(name: &str) -> Option<&'static AttributeGroup> {
    ATTRIBUTE_GROUPS.iter().find(|group| group.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_lookup() {
        let group = attribute_group("request").unwrap();
        assert_eq!(group.keys, &["method", "resource", "requestBody"]);
        assert_eq!(group.sd_id(), "request@1");
        assert!(attribute_group("session").is_none());
    }

    #[test]
    fn test_group_keys_are_disjoint() {
        let mut seen = std::collections::HashSet::new();
        for group in ATTRIBUTE_GROUPS.iter() {
            for key in group.keys {
                assert!(seen.insert(*key), "key {} declared twice", key);
            }
        }
    }
}
