//! Core logger types and traits

pub mod appender;
pub mod attributes;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod request_context;
pub mod syslog;

pub use appender::Appender;
pub use attributes::{AttributeGroup, ATTRIBUTE_GROUPS, PRIORITY_ATTRIBUTES};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use formatter::{Formatter, JsonFormatter};
pub use log_context::{ContextGuard, FieldValue, LogContext, LoggerContext};
pub use log_entry::LogEntry;
pub use log_level::{severity_priority, LogLevel};
pub use logger::{AttributedLogger, Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use output_format::LogFormat;
pub use request_context::RequestContext;
pub use syslog::SyslogFormatter;
