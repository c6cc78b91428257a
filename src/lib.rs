//! # Structured Syslog
//!
//! Structured logging that renders entries as RFC5424-style syslog lines or
//! JSON lines, with runtime level/format configuration.
//!
//! ## Features
//!
//! - **Syslog rendering**: priority number from severity, a leading
//!   priority-field segment, a `process@1` element keyed on the transaction
//!   id and one element per attribute group
//! - **JSON rendering**: one object per line with `time`, `level`, `msg`
//! - **Request context**: immutable request-scoped identity fields turned
//!   into pre-attributed log entries
//! - **Thread Safe**: level, format and adornments change through `&self`

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
    pub use crate::core::{
        Appender, AttributedLogger, ContextGuard, FieldValue, Formatter, JsonFormatter,
        LogContext, LogEntry, LogFormat, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerContext, LoggerError, LoggerMetrics, RequestContext, Result, SyslogFormatter,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
pub use crate::core::{
    Appender, AttributedLogger, ContextGuard, FieldValue, Formatter, JsonFormatter, LogContext,
    LogEntry, LogFormat, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerContext,
    LoggerError, LoggerMetrics, RequestContext, Result, SyslogFormatter,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
