//! Console sink implementation

use crate::core::{
    AsyncSink, ConsoleConfig, Formatter, LogLevel, LoggerError, Record, Result, WriteOutcome,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Destination stream of a console sink
pub type ConsoleWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Writes each record immediately, styled when the sink is `colored`
pub struct ConsoleSink {
    enabled: bool,
    log_level: LogLevel,
    stderr_level: LogLevel,
    formatter: Formatter,
    stdout: Arc<Mutex<ConsoleWriter>>,
    stderr: Arc<Mutex<ConsoleWriter>>,
}

impl ConsoleSink {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        Self::with_writers(
            config,
            Box::new(tokio::io::stdout()),
            Box::new(tokio::io::stderr()),
        )
    }

    /// Build a console sink over arbitrary streams
    pub fn with_writers(
        config: &ConsoleConfig,
        stdout: ConsoleWriter,
        stderr: ConsoleWriter,
    ) -> Result<Self> {
        Self::build(
            config,
            Arc::new(Mutex::new(stdout)),
            Arc::new(Mutex::new(stderr)),
        )
    }

    /// A sink with a new configuration writing to the same streams as this one
    pub fn reconfigured(&self, config: &ConsoleConfig) -> Result<Self> {
        Self::build(config, Arc::clone(&self.stdout), Arc::clone(&self.stderr))
    }

    fn build(
        config: &ConsoleConfig,
        stdout: Arc<Mutex<ConsoleWriter>>,
        stderr: Arc<Mutex<ConsoleWriter>>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            enabled: config.enabled,
            log_level: config.log_level,
            stderr_level: config.stderr_level,
            formatter: Formatter::new(config.colored, config.time.clone(), config.level.clone())?,
            stdout,
            stderr,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }
}

#[async_trait]
impl AsyncSink for ConsoleSink {
    async fn write(&self, record: &Record) -> Result<WriteOutcome> {
        if !self.enabled {
            return Ok(WriteOutcome::Disabled);
        }
        if record.level() < self.log_level {
            return Ok(WriteOutcome::Filtered);
        }

        let line = self.formatter.render(record);

        // Route records at or above stderr_level to stderr, others to stdout
        let (stream, name) = if record.level() >= self.stderr_level {
            (&self.stderr, "stderr")
        } else {
            (&self.stdout, "stdout")
        };

        let mut writer = stream.lock().await;
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| LoggerError::io_operation("writing to console", name, e))?;
        writer
            .flush()
            .await
            .map_err(|e| LoggerError::io_operation("flushing console", name, e))?;

        Ok(WriteOutcome::Written)
    }

    async fn flush(&self) -> Result<()> {
        // Flush both streams since we write to both
        self.stdout.lock().await.flush().await?;
        self.stderr.lock().await.flush().await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StyleCode, StyledText};
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl AsyncWrite for SharedBuffer {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            self.0.lock().extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    struct BrokenPipe;

    impl AsyncWrite for BrokenPipe {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn capture(config: &ConsoleConfig) -> (ConsoleSink, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let sink =
            ConsoleSink::with_writers(config, Box::new(out.clone()), Box::new(err.clone())).unwrap();
        (sink, out, err)
    }

    #[tokio::test]
    async fn test_colored_output_keeps_styles() {
        let (sink, out, _) = capture(&ConsoleConfig::default());
        let record = Record::new(LogLevel::Info, StyledText::new("hi", [StyleCode::GREEN]));

        assert_eq!(sink.write(&record).await.unwrap(), WriteOutcome::Written);
        assert!(out.contents().ends_with("I \x1b[32mhi\x1b[0m\n"));
    }

    #[tokio::test]
    async fn test_uncolored_output_is_plain() {
        let config = ConsoleConfig {
            colored: false,
            ..ConsoleConfig::default()
        };
        let (sink, out, _) = capture(&config);
        sink.write(&Record::new(LogLevel::Notice, StyledText::new("hi", [StyleCode::BOLD])))
            .await
            .unwrap();

        let contents = out.contents();
        assert!(!contents.contains('\x1b'));
        assert!(contents.ends_with("] N hi\n"));
    }

    #[tokio::test]
    async fn test_errors_go_to_stderr() {
        let (sink, out, err) = capture(&ConsoleConfig::default());
        sink.write(&Record::new(LogLevel::Warning, "warn")).await.unwrap();
        sink.write(&Record::new(LogLevel::Critical, "crit")).await.unwrap();

        assert!(out.contents().contains("warn"));
        assert!(!out.contents().contains("crit"));
        assert!(err.contents().contains("crit"));
    }

    #[tokio::test]
    async fn test_level_gate_and_disabled() {
        let config = ConsoleConfig {
            log_level: LogLevel::Warning,
            ..ConsoleConfig::default()
        };
        let (sink, out, _) = capture(&config);
        assert_eq!(
            sink.write(&Record::new(LogLevel::Info, "skip")).await.unwrap(),
            WriteOutcome::Filtered
        );
        assert!(out.contents().is_empty());

        let config = ConsoleConfig {
            enabled: false,
            ..ConsoleConfig::default()
        };
        let (sink, out, err) = capture(&config);
        assert_eq!(
            sink.write(&Record::new(LogLevel::Critical, "skip")).await.unwrap(),
            WriteOutcome::Disabled
        );
        assert!(out.contents().is_empty() && err.contents().is_empty());
    }

    #[tokio::test]
    async fn test_reconfigured_sink_shares_streams() {
        let (sink, out, _) = capture(&ConsoleConfig::default());
        let plain = sink
            .reconfigured(&ConsoleConfig {
                colored: false,
                ..ConsoleConfig::default()
            })
            .unwrap();

        plain
            .write(&Record::new(LogLevel::Info, StyledText::new("same", [StyleCode::RED])))
            .await
            .unwrap();
        assert!(out.contents().ends_with("I same\n"));
    }

    #[tokio::test]
    async fn test_broken_pipe_is_reported() {
        let sink = ConsoleSink::with_writers(
            &ConsoleConfig::default(),
            Box::new(BrokenPipe),
            Box::new(BrokenPipe),
        )
        .unwrap();

        let err = sink.write(&Record::new(LogLevel::Info, "x")).await.unwrap_err();
        assert!(err.is_io());
    }
}
