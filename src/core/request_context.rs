//! Request-scoped logging attributes
//!
//! A [`RequestContext`] is an immutable bag of values carried explicitly
//! through a request's call chain. Deriving a context never mutates the
//! original, so a parent handle stays valid after children are created.

use super::attributes::{
    ACTION_ID, ACTION_NAME, MESSAGE_ID, PROCESS_NAME, THREAD_ID, THREAD_NAME, TRANSACTION_ID,
};
use super::log_context::LogContext;
use std::collections::HashMap;
use std::sync::Arc;

/// Thread id attached by [`RequestContext::attach_logging_attributes`]
pub const DEFAULT_THREAD_ID: &str = "0";

/// Keys copied from a request context into a log entry
const CARRIED_KEYS: [&str; 6] = [
    TRANSACTION_ID,
    THREAD_NAME,
    THREAD_ID,
    ACTION_ID,
    ACTION_NAME,
    PROCESS_NAME,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    values: Arc<HashMap<String, String>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context with one more value; `self` is left unchanged
    #[must_use]
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = (*self.values).clone();
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(values),
        }
    }

    /// Derive a context carrying the standard request identity values
    ///
    /// `threadid` is always set to [`DEFAULT_THREAD_ID`].
    #[must_use]
    pub fn attach_logging_attributes(
        &self,
        transaction_id: impl Into<String>,
        thread_name: impl Into<String>,
        action_id: impl Into<String>,
        action_name: impl Into<String>,
        process_name: impl Into<String>,
    ) -> Self {
        let mut values = (*self.values).clone();
        values.insert(TRANSACTION_ID.to_string(), transaction_id.into());
        values.insert(THREAD_NAME.to_string(), thread_name.into());
        values.insert(THREAD_ID.to_string(), DEFAULT_THREAD_ID.to_string());
        values.insert(ACTION_ID.to_string(), action_id.into());
        values.insert(ACTION_NAME.to_string(), action_name.into());
        values.insert(PROCESS_NAME.to_string(), process_name.into());
        Self {
            values: Arc::new(values),
        }
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Structured fields for a log entry derived from this context
    ///
    /// Each carried key is copied only when present; `messageid` mirrors
    /// `actionname`.
    pub fn to_log_context(&self) -> LogContext {
        let mut context = LogContext::new();
        for key in CARRIED_KEYS {
            if let Some(value) = self.value(key) {
                context.add_field(key, value);
            }
        }
        if let Some(action_name) = self.value(ACTION_NAME) {
            context.add_field(MESSAGE_ID, action_name);
        }
        context
    }
}
