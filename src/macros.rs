//! Logging macros for ergonomic log message formatting.
//!
//! These macros work with anything exposing `log(level, message)`: a
//! [`Logger`](crate::Logger) or an [`AttributedLogger`](crate::AttributedLogger).
//!
//! # Examples
//!
//! ```
//! use structured_syslog::prelude::*;
//! use structured_syslog::info;
//!
//! let logger = Logger::new();
//! info!(logger, "Server started");
//!
//! let request = RequestContext::new()
//!     .attach_logging_attributes("T-42", "worker-1", "A-1", "CreateOrder", "orders");
//! let entry = logger.derive_log_entry(&request);
//! info!(entry, "Order {} accepted", 1001);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use structured_syslog::prelude::*;
/// # let logger = Logger::new();
/// use structured_syslog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use structured_syslog::prelude::*;
/// # let logger = Logger::new();
/// use structured_syslog::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use structured_syslog::prelude::*;
/// # let logger = Logger::new();
/// use structured_syslog::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
