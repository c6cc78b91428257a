//! Process-wide logger handle
//!
//! Prefer passing a `Logger` (or `Arc<Logger>`) explicitly; this handle is
//! for call sites that cannot be threaded through.

use crate::appenders::ConsoleAppender;
use crate::core::{Logger, LoggerError, Result};
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

fn default_logger() -> Logger {
    Logger::builder().appender(ConsoleAppender::new()).build()
}

/// Install `logger` as the process-wide logger
///
/// Fails if a logger was already installed or [`logger`] was already called.
pub fn init(logger: Logger) -> Result<()> {
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::config("global logger", "already initialized"))
}

/// The process-wide logger, created with a console appender on first use
pub fn logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(default_logger)
}
