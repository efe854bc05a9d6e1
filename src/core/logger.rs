//! Main logger implementation

use super::{
    config::{ConsoleConfig, FileConfig, LoggerConfig},
    error::{LoggerError, Result},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    record::Record,
    sink::AsyncSink,
    styled_text::LogMessage,
};
use crate::sinks::{ConsoleSink, ConsoleWriter, FileSink};
use futures::future::join_all;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Async logger writing every record to a console sink, a file sink and any
/// extra sinks added with [`Logger::add_sink`].
///
/// Each level method awaits all sink writes before returning, so a call
/// either logged (or was filtered) everywhere, or reports the first failure.
///
/// # Example
///
/// ```no_run
/// use styled_logger::prelude::*;
///
/// # async fn example() -> Result<()> {
/// let logger = Logger::new(LoggerConfig::from_json_str(
///     r#"{ "file": { "enabled": true, "flush_every_n_logs": 3 } }"#,
/// )?)?;
///
/// logger.info("service started").await?;
/// logger
///     .warning(StyledText::new("disk", [StyleCode::BOLD]) + " almost full")
///     .await?;
///
/// logger.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct Logger {
    config: LoggerConfig,
    console: Arc<ConsoleSink>,
    file: Arc<FileSink>,
    extra: Vec<Arc<dyn AsyncSink>>,
    metrics: LoggerMetrics,
    closed: AtomicBool,
}

impl Logger {
    /// Validates `config` and builds both sinks; no file is created yet
    pub fn new(config: LoggerConfig) -> Result<Self> {
        let console = ConsoleSink::new(&config.print)?;
        Self::with_console(config, console)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(LoggerConfig::default())
    }

    fn with_console(config: LoggerConfig, console: ConsoleSink) -> Result<Self> {
        config.validate()?;
        let file = FileSink::new(&config.file)?;
        Ok(Self {
            config,
            console: Arc::new(console),
            file: Arc::new(file),
            extra: Vec::new(),
            metrics: LoggerMetrics::new(),
            closed: AtomicBool::new(false),
        })
    }

    pub fn add_sink(&mut self, sink: Arc<dyn AsyncSink>) {
        self.extra.push(sink);
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn console(&self) -> &ConsoleSink {
        &self.console
    }

    pub fn file(&self) -> &FileSink {
        &self.file
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn sinks(&self) -> impl Iterator<Item = &dyn AsyncSink> {
        let console: &dyn AsyncSink = self.console.as_ref();
        let file: &dyn AsyncSink = self.file.as_ref();
        [console, file]
            .into_iter()
            .chain(self.extra.iter().map(|sink| sink.as_ref() as &dyn AsyncSink))
    }

    /// Split per-sink results, keeping the first error
    fn settle<T>(results: Vec<Result<T>>) -> (Vec<T>, Option<LoggerError>) {
        let mut values = Vec::with_capacity(results.len());
        let mut first_error = None;
        for result in results {
            match result {
                Ok(value) => values.push(value),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        (values, first_error)
    }

    pub async fn log(&self, level: LogLevel, message: impl Into<LogMessage>) -> Result<()> {
        if self.is_closed() {
            return Err(LoggerError::LoggerStopped);
        }
        let record = Record::new(level, message);
        self.dispatch(&record).await
    }

    /// Hand an already built record to every sink concurrently
    pub async fn dispatch(&self, record: &Record) -> Result<()> {
        let results = join_all(self.sinks().map(|sink| sink.write(record))).await;
        let (outcomes, error) = Self::settle(results);

        if let Some(e) = error {
            self.metrics.record_failed();
            return Err(e);
        }

        if outcomes.iter().any(|outcome| outcome.accepted()) {
            self.metrics.record_logged();
        } else {
            self.metrics.record_filtered();
        }
        Ok(())
    }

    #[inline]
    pub async fn debug(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Debug, message).await
    }

    #[inline]
    pub async fn info(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Info, message).await
    }

    #[inline]
    pub async fn notice(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Notice, message).await
    }

    #[inline]
    pub async fn warning(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Warning, message).await
    }

    #[inline]
    pub async fn error(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Error, message).await
    }

    #[inline]
    pub async fn critical(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Critical, message).await
    }

    /// Persist every sink's buffered lines
    pub async fn flush(&self) -> Result<()> {
        let results = join_all(self.sinks().map(|sink| sink.flush())).await;
        match Self::settle(results) {
            (_, Some(e)) => Err(e),
            (_, None) => Ok(()),
        }
    }

    /// Flush and close every sink. Later log calls fail with
    /// [`LoggerError::LoggerStopped`]; closing twice is a no-op.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        let results = join_all(self.sinks().map(|sink| sink.close())).await;
        match Self::settle(results) {
            (_, Some(e)) => Err(e),
            (_, None) => Ok(()),
        }
    }

    /// Swap in a new configuration
    ///
    /// The new sinks are built first, so an invalid configuration leaves
    /// the logger untouched. The old file sink is then closed, and the new
    /// one opens its own file on its first record. Requires exclusive
    /// access, so it can never race with in-flight log calls.
    pub async fn reconfigure(&mut self, config: LoggerConfig) -> Result<()> {
        if self.is_closed() {
            return Err(LoggerError::LoggerStopped);
        }
        config.validate()?;
        let console = self.console.reconfigured(&config.print)?;
        let file = FileSink::new(&config.file)?;

        self.console.flush().await?;
        self.file.close().await?;

        self.console = Arc::new(console);
        self.file = Arc::new(file);
        self.config = config;
        Ok(())
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use styled_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .console(ConsoleConfig { colored: false, ..ConsoleConfig::default() })
    ///     .build()
    ///     .unwrap();
    /// assert!(!logger.config().print.colored);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Report any failed records
        let failed = self.metrics.failed_count();
        if failed > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} failed records (failure rate: {:.2}%)",
                failed,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    config: LoggerConfig,
    console_writers: Option<(ConsoleWriter, ConsoleWriter)>,
    sinks: Vec<Arc<dyn AsyncSink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            console_writers: None,
            sinks: Vec::new(),
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, console: ConsoleConfig) -> Self {
        self.config.print = console;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, file: FileConfig) -> Self {
        self.config.file = file;
        self
    }

    /// Send console output to the given streams instead of stdout/stderr
    #[must_use = "builder methods return a new value"]
    pub fn console_writers(mut self, stdout: ConsoleWriter, stderr: ConsoleWriter) -> Self {
        self.console_writers = Some((stdout, stderr));
        self
    }

    /// Add a custom sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: AsyncSink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        let console = match self.console_writers {
            Some((stdout, stderr)) => ConsoleSink::with_writers(&self.config.print, stdout, stderr)?,
            None => ConsoleSink::new(&self.config.print)?,
        };

        let mut logger = Logger::with_console(self.config, console)?;
        for sink in self.sinks {
            logger.add_sink(sink);
        }
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
