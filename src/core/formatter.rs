//! Per-sink line rendering
//!
//! A [`Formatter`] turns a [`Record`] into one output line:
//!
//! ```text
//! [2025-01-08 10:30:45] WARN disk almost full
//! ```
//!
//! The `colored` flag given at construction is the only thing that decides
//! whether ANSI sequences appear in that line. With `colored = false` every
//! piece (time, label, message) is rendered from its plain text, no matter
//! which styles the configuration or the caller attached.

use super::config::{LevelConfig, TimeConfig, QUOTE_PLACEHOLDER};
use super::error::Result;
use super::record::Record;
use super::styled_text::StyledText;
use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub struct Formatter {
    colored: bool,
    time: TimeConfig,
    level: LevelConfig,
    separator: String,
}

impl Formatter {
    /// Validates the time section eagerly so rendering can never fail
    pub fn new(colored: bool, time: TimeConfig, level: LevelConfig) -> Result<Self> {
        time.validate("formatter")?;
        Ok(Self {
            colored,
            time,
            level,
            separator: " ".to_string(),
        })
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn colored(&self) -> bool {
        self.colored
    }

    /// Render a full line, newline included
    pub fn render(&self, record: &Record) -> String {
        let mut line = String::new();

        if self.time.enabled {
            line.push_str(&self.render_time(record.timestamp()));
            line.push_str(&self.separator);
        }

        if self.level.enabled {
            let label = self.level.label(record.level());
            let label = StyledText::new(label.text.as_str(), label.style.iter().copied());
            line.push_str(&label.render(self.colored));
            line.push_str(&self.separator);
        }

        line.push_str(&record.message().render(self.colored));
        line.push('\n');
        line
    }

    /// Time rendered with `time.format` inside the quote template
    pub fn render_time(&self, timestamp: &DateTime<Local>) -> String {
        let time = StyledText::new(
            timestamp.format(&self.time.format).to_string(),
            self.time.style.iter().copied(),
        );

        let (before, after) = self
            .time
            .quote
            .split_once(QUOTE_PLACEHOLDER)
            .unwrap_or(("", ""));
        let quote_style = self.time.quote_style.iter().copied();

        format!(
            "{}{}{}",
            StyledText::new(before, quote_style.clone()).render(self.colored),
            time.render(self.colored),
            StyledText::new(after, quote_style).render(self.colored)
        )
    }
}
