//! Sink implementations

pub mod console;
pub mod file;

pub use console::{ConsoleSink, ConsoleWriter};
pub use file::FileSink;

// Re-export the trait next to its implementations
pub use crate::core::{AsyncSink, WriteOutcome};
