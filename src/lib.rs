//! # Styled Logger
//!
//! A lightweight asynchronous logger that writes leveled records to the
//! console and to a buffered log file at the same time.
//!
//! ## Features
//!
//! - **Styled Text**: attach ANSI styles (named, 256-color, RGB) to any part of a message
//! - **Plain Files**: a sink with `colored = false` never receives an escape sequence
//! - **Buffered Writes**: file lines are batched and flushed every `flush_every_n_logs` records
//! - **Partial Configuration**: JSON overrides merged onto documented defaults

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        AsyncSink, ConsoleConfig, FileConfig, LevelConfig, LevelLabel, LogLevel, LogMessage,
        Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Record, Result,
        StyleCode, StyledText, TimeConfig, WriteOutcome,
    };
    pub use crate::sinks::{ConsoleSink, FileSink};
}

pub use crate::core::global;
pub use crate::core::{
    id_color, id_color_bg, make_color_prefix, make_colors_prefix, rgb_color, rgb_color_bg,
    AsyncSink, ConsoleConfig, FileConfig, Formatter, LevelConfig, LevelLabel, LogLevel,
    LogMessage, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Record, Result,
    StyleCode, StyledText, TimeConfig, WriteOutcome, RESET_CODE,
};
pub use sinks::{ConsoleSink, FileSink};
