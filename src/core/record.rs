//! Log record structure

use super::log_level::LogLevel;
use super::styled_text::LogMessage;
use chrono::{DateTime, Local};

/// One log event, built per call and shared read-only by every sink
#[derive(Debug, Clone)]
pub struct Record {
    timestamp: DateTime<Local>,
    level: LogLevel,
    message: LogMessage,
}

impl Record {
    /// Escape line breaks, tabs and ESC so a record always renders as one
    /// line and caller text cannot smuggle in control sequences.
    fn sanitize_text(text: &str) -> String {
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
            .replace('\x1b', "\\x1b")
    }

    pub fn new(level: LogLevel, message: impl Into<LogMessage>) -> Self {
        Self::at(Local::now(), level, message)
    }

    pub fn at(timestamp: DateTime<Local>, level: LogLevel, message: impl Into<LogMessage>) -> Self {
        Self {
            timestamp,
            level,
            message: message.into().map_text(Self::sanitize_text),
        }
    }

    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &LogMessage {
        &self.message
    }
}
