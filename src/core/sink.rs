//! Async sink trait for log output destinations

use super::{error::Result, record::Record};
use async_trait::async_trait;

/// What a sink did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Emitted to the destination
    Written,
    /// Accepted into a pending buffer
    Buffered,
    /// Below the sink's level gate
    Filtered,
    /// Sink is turned off
    Disabled,
}

impl WriteOutcome {
    /// True when the record reached the sink at all
    pub fn accepted(&self) -> bool {
        matches!(self, WriteOutcome::Written | WriteOutcome::Buffered)
    }
}

/// Trait for asynchronous log sinks
///
/// Sinks are shared between concurrent callers, so every method takes
/// `&self` and implementations serialize their own mutable state.
///
/// # Example
///
/// ```no_run
/// use styled_logger::core::{AsyncSink, Record, Result, WriteOutcome};
/// use async_trait::async_trait;
///
/// struct MySink;
///
/// #[async_trait]
/// impl AsyncSink for MySink {
///     async fn write(&self, record: &Record) -> Result<WriteOutcome> {
///         let _ = record.message().plain();
///         Ok(WriteOutcome::Written)
///     }
///
///     async fn flush(&self) -> Result<()> {
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "my_sink"
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncSink: Send + Sync {
    /// Write or buffer one record
    async fn write(&self, record: &Record) -> Result<WriteOutcome>;

    /// Persist anything buffered
    async fn flush(&self) -> Result<()>;

    /// Flush and release the destination
    async fn close(&self) -> Result<()> {
        self.flush().await
    }

    /// Get the sink name
    fn name(&self) -> &str;
}
