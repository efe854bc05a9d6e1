//! Logger configuration
//!
//! Every option has a default. A configuration document only needs to name
//! the options it changes: [`LoggerConfig::from_json_value`] merges the
//! document onto the serialized defaults (objects recursively, everything
//! else by replacement), deserializes the result with unknown keys rejected,
//! and validates it before any sink is built.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::style::StyleCode;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Placeholder replaced by the rendered time inside [`TimeConfig::quote`]
pub const QUOTE_PLACEHOLDER: &str = "{}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeConfig {
    pub enabled: bool,
    /// strftime pattern
    pub format: String,
    pub style: Vec<StyleCode>,
    /// Template around the time, e.g. `[{}]`
    pub quote: String,
    pub quote_style: Vec<StyleCode>,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            format: "%Y-%m-%d %H:%M:%S".to_string(),
            style: vec![StyleCode::BRIGHT_BLACK],
            quote: "[{}]".to_string(),
            quote_style: Vec::new(),
        }
    }
}

impl TimeConfig {
    /// Check the strftime pattern and the quote template
    pub fn validate(&self, component: &str) -> Result<()> {
        validate_time_format(&format!("{}.time.format", component), &self.format)?;
        if self.quote.matches(QUOTE_PLACEHOLDER).count() != 1 {
            return Err(LoggerError::config(
                format!("{}.time.quote", component),
                format!("'{}' must contain exactly one '{{}}'", self.quote),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelLabel {
    pub text: String,
    pub style: Vec<StyleCode>,
}

impl LevelLabel {
    pub fn new(text: impl Into<String>, style: impl IntoIterator<Item = StyleCode>) -> Self {
        Self {
            text: text.into(),
            style: style.into_iter().collect(),
        }
    }
}

/// Per-level display labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    pub enabled: bool,
    pub debug: LevelLabel,
    pub info: LevelLabel,
    pub notice: LevelLabel,
    pub warning: LevelLabel,
    pub error: LevelLabel,
    pub critical: LevelLabel,
}

impl LevelConfig {
    fn with_texts(texts: [&str; 6]) -> Self {
        let [debug, info, notice, warning, error, critical] = texts;
        Self {
            enabled: true,
            debug: LevelLabel::new(debug, [StyleCode::BRIGHT_BLACK]),
            info: LevelLabel::new(info, []),
            notice: LevelLabel::new(notice, [StyleCode::BOLD]),
            warning: LevelLabel::new(warning, [StyleCode::YELLOW]),
            error: LevelLabel::new(error, [StyleCode::RED]),
            critical: LevelLabel::new(
                critical,
                [StyleCode::RED, StyleCode::BOLD, StyleCode::BLINK],
            ),
        }
    }

    /// Single-letter labels used on the console
    pub fn compact() -> Self {
        Self::with_texts(["D", "I", "N", "W", "E", "C"])
    }

    /// Word labels used in log files
    pub fn words() -> Self {
        Self::with_texts(["DEBUG", "INFO", "NOTICE", "WARN", "ERROR", "CRIT"])
    }

    pub fn label(&self, level: LogLevel) -> &LevelLabel {
        match level {
            LogLevel::Debug => &self.debug,
            LogLevel::Info => &self.info,
            LogLevel::Notice => &self.notice,
            LogLevel::Warning => &self.warning,
            LogLevel::Error => &self.error,
            LogLevel::Critical => &self.critical,
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::words()
    }
}

/// Console (`print`) section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
    pub log_level: LogLevel,
    /// Records at or above this level go to stderr
    pub stderr_level: LogLevel,
    pub time: TimeConfig,
    pub level: LevelConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
            log_level: LogLevel::Debug,
            stderr_level: LogLevel::Error,
            time: TimeConfig::default(),
            level: LevelConfig::compact(),
        }
    }
}

impl ConsoleConfig {
    pub fn validate(&self) -> Result<()> {
        self.time.validate("print")
    }
}

/// File section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub enabled: bool,
    pub colored: bool,
    pub log_level: LogLevel,
    pub time: TimeConfig,
    pub level: LevelConfig,
    pub log_root_path: PathBuf,
    pub log_name: String,
    pub log_suffix: String,
    /// Append the open time (formatted with `log_time_format`) to the file name
    pub log_append_time: bool,
    pub log_time_format: String,
    pub flush_every_n_logs: usize,
    /// `fsync` file data after every flush
    pub sync_on_flush: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            colored: false,
            log_level: LogLevel::Debug,
            time: TimeConfig::default(),
            level: LevelConfig::words(),
            log_root_path: PathBuf::from("./logs"),
            log_name: "log.".to_string(),
            log_suffix: ".txt".to_string(),
            log_append_time: true,
            log_time_format: "%Y-%m-%d".to_string(),
            flush_every_n_logs: 1,
            sync_on_flush: false,
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        self.time.validate("file")?;
        validate_time_format("file.log_time_format", &self.log_time_format)?;
        if self.flush_every_n_logs == 0 {
            return Err(LoggerError::config(
                "file.flush_every_n_logs",
                "must be at least 1",
            ));
        }
        if self.log_name.is_empty() && self.log_suffix.is_empty() && !self.log_append_time {
            return Err(LoggerError::config("file.log_name", "log file name is empty"));
        }
        Ok(())
    }

    /// `log_name [+ timestamp] + log_suffix`
    pub fn file_name(&self, opened_at: &DateTime<Local>) -> String {
        let stamp = if self.log_append_time {
            opened_at.format(&self.log_time_format).to_string()
        } else {
            String::new()
        };
        format!("{}{}{}", self.log_name, stamp, self.log_suffix)
    }

    pub fn path(&self, opened_at: &DateTime<Local>) -> PathBuf {
        self.log_root_path.join(self.file_name(opened_at))
    }
}

/// Aggregate configuration consumed by [`crate::Logger`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub print: ConsoleConfig,
    pub file: FileConfig,
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<()> {
        self.print.validate()?;
        self.file.validate()
    }

    /// Apply a partial JSON document on top of the defaults
    ///
    /// # Example
    ///
    /// ```
    /// use styled_logger::LoggerConfig;
    ///
    /// let config = LoggerConfig::from_json_str(
    ///     r#"{ "file": { "enabled": true, "flush_every_n_logs": 10 } }"#,
    /// ).unwrap();
    ///
    /// assert!(config.file.enabled);
    /// assert_eq!(config.file.flush_every_n_logs, 10);
    /// assert!(!config.file.colored);
    /// ```
    pub fn from_json_value(overrides: Value) -> Result<Self> {
        Self::default().merged(overrides)
    }

    pub fn from_json_str(document: &str) -> Result<Self> {
        Self::from_json_value(serde_json::from_str(document)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading logger configuration", path.display().to_string(), e)
        })?;
        Self::from_json_str(&document)
    }

    /// A copy of this configuration with `overrides` merged on top
    pub fn merged(&self, overrides: Value) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        merge_json(&mut base, overrides);
        let config: LoggerConfig = serde_json::from_value(base)?;
        config.validate()?;
        Ok(config)
    }
}

/// Recursively merge `overlay` into `base`
pub fn merge_json(base: &mut Value, overlay: Value) {
    if let Value::Object(overlay_map) = overlay {
        if let Value::Object(base_map) = base {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
            return;
        }
        *base = Value::Object(overlay_map);
        return;
    }
    *base = overlay;
}

/// Reject strftime patterns chrono cannot render, and patterns whose output
/// would break a record across lines.
///
/// Some specifiers (`%#z`) are accepted by the parser but cannot be formatted, so the
/// pattern is rendered once against the current time.
pub fn validate_time_format(component: &str, format: &str) -> Result<()> {
    let malformed = || {
        LoggerError::config(component, format!("malformed time format '{}'", format))
    };
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(malformed());
    }

    let mut sample = String::new();
    write!(sample, "{}", Local::now().format(format)).map_err(|_| malformed())?;
    if sample.contains(['\n', '\r']) {
        return Err(LoggerError::config(
            component,
            format!("time format '{}' must render on a single line", format),
        ));
    }
    Ok(())
}
