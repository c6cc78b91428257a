//! Main logger implementation

use super::{
    appender::Appender,
    error::Result,
    log_context::{ContextGuard, FieldValue, LogContext, LoggerContext},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::LogFormat,
    request_context::RequestContext,
};
use crossbeam_channel::{bounded, Sender};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit shutdown.
/// For custom timeout control, use the `shutdown()` method instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

type SharedAppenders = Arc<Mutex<Vec<Box<dyn Appender>>>>;

/// An entry rendered on the calling thread, waiting for the async worker
struct Dispatch {
    entry: LogEntry,
    rendered: Vec<u8>,
}

/// Shared logging handle
///
/// Level, format and adornments can be changed through `&self` from any
/// thread while other threads are logging; every call reads the current
/// settings. Share it with `Arc<Logger>` or use [`crate::global::logger`].
pub struct Logger {
    min_level: Arc<RwLock<LogLevel>>,
    format: Arc<RwLock<LogFormat>>,
    context: LoggerContext,
    appenders: SharedAppenders,
    sender: Option<Sender<Dispatch>>,
    async_handle: Option<thread::JoinHandle<()>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Arc::new(RwLock::new(LogLevel::Info)),
            format: Arc::new(RwLock::new(LogFormat::Syslog)),
            context: LoggerContext::new(),
            appenders: Arc::new(Mutex::new(Vec::new())),
            sender: None,
            async_handle: None,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Create a logger whose appenders run on a background worker
    ///
    /// Entries are rendered on the calling thread and queued on a bounded
    /// channel; a full queue blocks the caller, so entries from one thread
    /// reach the appenders in call order.
    #[must_use]
    pub fn with_async(buffer_size: usize) -> Self {
        let (sender, receiver) = bounded::<Dispatch>(buffer_size.max(1));
        let appenders: SharedAppenders = Arc::new(Mutex::new(Vec::new()));
        let appenders_clone = Arc::clone(&appenders);
        let metrics = Arc::new(LoggerMetrics::new());
        let metrics_clone = Arc::clone(&metrics);

        let handle = thread::spawn(move || {
            const BATCH_SIZE: usize = 50;

            let mut batch = Vec::with_capacity(BATCH_SIZE);

            // Blocks until an entry arrives; ends once every sender is dropped
            while let Ok(dispatch) = receiver.recv() {
                batch.push(dispatch);

                while batch.len() < BATCH_SIZE {
                    match receiver.try_recv() {
                        Ok(dispatch) => batch.push(dispatch),
                        Err(_) => break,
                    }
                }

                let mut appenders = appenders_clone.lock();
                for dispatch in batch.drain(..) {
                    Self::process(&mut appenders, &dispatch.entry, &dispatch.rendered, &metrics_clone);
                }
                Self::flush_all(&mut appenders);
            }
        });

        Self {
            min_level: Arc::new(RwLock::new(LogLevel::Info)),
            format: Arc::new(RwLock::new(LogFormat::Syslog)),
            context: LoggerContext::new(),
            appenders,
            sender: Some(sender),
            async_handle: Some(handle),
            metrics,
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Hand one rendered entry to every appender
    ///
    /// Each appender call is isolated with `catch_unwind`, so a failing or
    /// panicking appender does not keep the others from receiving the entry.
    fn process(
        appenders: &mut [Box<dyn Appender>],
        entry: &LogEntry,
        rendered: &[u8],
        metrics: &LoggerMetrics,
    ) {
        let mut has_error = false;

        for appender in appenders.iter_mut() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry, rendered)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender '{}' panicked: {}. \
                         Other appenders continue to function.",
                        appender.name(),
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else {
            metrics.record_logged();
        }
    }

    fn flush_all(appenders: &mut [Box<dyn Appender>]) {
        for appender in appenders.iter_mut() {
            if let Err(e) = appender.flush() {
                eprintln!("[LOGGER ERROR] Appender '{}' flush failed: {}", appender.name(), e);
            }
        }
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.lock().push(appender);
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    /// Set the minimum level from its name (case-insensitive)
    ///
    /// An unrecognized name selects `warn` and logs one warning about the
    /// fallback through this logger. Returns the level now in effect.
    pub fn set_level(&self, name: &str) -> LogLevel {
        match name.parse::<LogLevel>() {
            Ok(level) => {
                self.set_min_level(level);
                level
            }
            Err(_) => {
                self.set_min_level(LogLevel::Warn);
                self.metrics.record_config_fallback();
                self.warn(format!(
                    "Unknown log level '{}', falling back to '{}'",
                    name,
                    LogLevel::Warn
                ));
                LogLevel::Warn
            }
        }
    }

    pub fn set_format(&self, format: LogFormat) {
        *self.format.write() = format;
    }

    pub fn format(&self) -> LogFormat {
        *self.format.read()
    }

    /// Set the output format from its text form (case-insensitive)
    ///
    /// Unrecognized text selects syslog and logs one warning about the
    /// fallback. Returns the format now in effect.
    pub fn set_format_name(&self, name: &str) -> LogFormat {
        match name.parse::<LogFormat>() {
            Ok(format) => {
                self.set_format(format);
                format
            }
            Err(e) => {
                self.set_format(LogFormat::Syslog);
                self.metrics.record_config_fallback();
                self.warn(format!("{}, falling back to '{}'", e, LogFormat::Syslog));
                LogFormat::Syslog
            }
        }
    }

    /// Attach a field to every subsequent entry
    ///
    /// Fields given on the entry itself win over adornments with the same key.
    pub fn adorn<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.set(key, value);
    }

    pub fn remove_adornment(&self, key: &str) {
        self.context.remove(key);
    }

    /// Attach a field until the returned guard is dropped
    #[must_use = "the adornment is removed when the guard is dropped"]
    pub fn adorn_scoped<K, V>(&self, key: K, value: V) -> ContextGuard
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        self.context.set(key.clone(), value);
        ContextGuard::new(self.context.inner_fields(), key)
    }

    pub fn adornments(&self) -> &LoggerContext {
        &self.context
    }

    /// An entry builder pre-populated with the request's identity fields
    ///
    /// `messageid` is set from `actionname`; values missing from the request
    /// context are simply left out.
    pub fn derive_log_entry(&self, request: &RequestContext) -> AttributedLogger<'_> {
        AttributedLogger {
            logger: self,
            context: request.to_log_context(),
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_with_context(level, message, LogContext::new());
    }

    /// Log with structured context fields
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        mut context: LogContext,
    ) {
        if !self.is_enabled(level) {
            return;
        }

        self.context.merge_into(&mut context);
        let entry = LogEntry::new(level, message).with_context(context);
        self.send_entry(entry);
    }

    /// Render with the current format and deliver to the appenders
    fn send_entry(&self, entry: LogEntry) {
        let format = self.format();
        let rendered = match format.format(&entry) {
            Ok(rendered) => rendered,
            Err(e) => {
                eprintln!("[LOGGER ERROR] {} formatter failed: {}", format, e);
                self.metrics.record_dropped();
                return;
            }
        };

        if let Some(ref sender) = self.sender {
            if sender.send(Dispatch { entry, rendered }).is_err() {
                // Worker gone, logger is shutting down
                self.metrics.record_dropped();
            }
        } else {
            let mut appenders = self.appenders.lock();
            Self::process(&mut appenders, &entry, &rendered, &self.metrics);
        }
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.lock();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Log at `panic` level, flush, then panic with the same message
    pub fn panic(&self, message: impl Into<String>) -> ! {
        let message = message.into();
        self.log(LogLevel::Panic, message.clone());
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Flush before panic failed: {}", e);
        }
        panic!("{}", message);
    }

    /// Helper for structured info logging
    pub fn info_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Info, message, context);
    }

    /// Helper for structured error logging
    pub fn error_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Error, message, context);
    }

    /// Gracefully shutdown the logger with a custom timeout
    ///
    /// Drains the async worker (if any) and flushes every appender.
    /// Returns `true` if shutdown completed within `timeout`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use structured_syslog::Logger;
    /// use std::time::Duration;
    ///
    /// let mut logger = Logger::with_async(1000);
    /// logger.info("Important message");
    ///
    /// if !logger.shutdown(Duration::from_secs(10)) {
    ///     eprintln!("Warning: Logger shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        if !self.join_worker(timeout) {
            return false;
        }

        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }

        true
    }

    /// Close the channel and wait for the worker to drain it
    fn join_worker(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());

        let Some(handle) = self.async_handle.take() else {
            return true;
        };

        let start = std::time::Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!(
                        "[LOGGER ERROR] Async worker thread panicked during shutdown: {:?}",
                        e
                    );
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Async worker thread did not finish within {:?} timeout. \
                     Some logs may be lost.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.join_worker(DEFAULT_SHUTDOWN_TIMEOUT);

        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Log entry builder carrying request-scoped fields
///
/// Created by [`Logger::derive_log_entry`]; every message logged through it
/// carries the fields collected so far.
pub struct AttributedLogger<'a> {
    logger: &'a Logger,
    context: LogContext,
}

impl AttributedLogger<'_> {
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.add_field(key, value);
        self
    }

    pub fn fields(&self) -> &LogContext {
        &self.context
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.logger
            .log_with_context(level, message, self.context.clone());
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use structured_syslog::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .format(LogFormat::Json)
///     .adorn("host", "api-01")
///     .appender(ConsoleAppender::new())
///     .async_mode(1000)
///     .build();
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    format: LogFormat,
    appenders: Vec<Box<dyn Appender>>,
    adornments: Vec<(String, FieldValue)>,
    async_buffer: Option<usize>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            format: LogFormat::Syslog,
            appenders: Vec::new(),
            adornments: Vec::new(),
            async_buffer: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Add a field attached to every entry
    #[must_use = "builder methods return a new value"]
    pub fn adorn<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.adornments.push((key.into(), value.into()));
        self
    }

    /// Enable async mode with specified buffer size
    ///
    /// If not called, the logger will use synchronous mode.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size);
        self
    }

    /// Build the logger
    pub fn build(self) -> Logger {
        let logger = match self.async_buffer {
            Some(size) => Logger::with_async(size),
            None => Logger::new(),
        };

        logger.set_min_level(self.min_level);
        logger.set_format(self.format);
        for (key, value) in self.adornments {
            logger.adorn(key, value);
        }
        for appender in self.appenders {
            logger.add_appender(appender);
        }

        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
