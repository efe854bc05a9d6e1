//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and evaluate to the
//! logger's future, which the caller awaits. A single non-literal argument
//! is passed through untouched, so styled messages built with [`styled!`]
//! or `+` keep their styles.
//!
//! # Examples
//!
//! ```no_run
//! use styled_logger::prelude::*;
//! use styled_logger::info;
//!
//! # async fn example(logger: Logger) -> Result<()> {
//! // Basic logging
//! info!(logger, "Server started").await?;
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).await?;
//! # Ok(())
//! # }
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```no_run
/// # use styled_logger::prelude::*;
/// # async fn example(logger: Logger) -> Result<()> {
/// use styled_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").await?;
/// log!(logger, LogLevel::Error, "Error code: {}", 500).await?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal, $($arg:tt)+) => {
        $logger.log($level, format!($fmt, $($arg)+))
    };
    ($logger:expr, $level:expr, $fmt:literal $(,)?) => {
        $logger.log($level, format!($fmt))
    };
    ($logger:expr, $level:expr, $message:expr $(,)?) => {
        $logger.log($level, $message)
    };
}

/// Build a [`LogMessage`](crate::LogMessage) from a template, keeping the
/// styles of every argument.
///
/// `format!` only sees plain text, so styled arguments lose their codes.
/// This macro fills each `{}` with an argument converted into a
/// `LogMessage` instead, see [`StyledText::format`](crate::StyledText::format).
///
/// # Examples
///
/// ```
/// use styled_logger::{styled, StyleCode, StyledText};
///
/// let took = StyledText::new("12s", [StyleCode::GREEN]);
/// let message = styled!("deploy finished in {}", took);
/// assert_eq!(message.plain(), "deploy finished in 12s");
/// assert_eq!(message.render(true), "deploy finished in \x1b[32m12s\x1b[0m");
/// ```
#[macro_export]
macro_rules! styled {
    ($template:expr, $($arg:expr),+ $(,)?) => {
        $crate::StyledText::from($template)
            .format([$($crate::LogMessage::from($arg)),+])
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```no_run
/// # use styled_logger::prelude::*;
/// # async fn example(logger: Logger) -> Result<()> {
/// use styled_logger::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5).await?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{ConsoleConfig, FileConfig, LogLevel, Logger, LoggerConfig};
    use tempfile::TempDir;

    fn file_logger(dir: &TempDir) -> Logger {
        Logger::new(LoggerConfig {
            print: ConsoleConfig {
                enabled: false,
                ..ConsoleConfig::default()
            },
            file: FileConfig {
                enabled: true,
                log_root_path: dir.path().to_path_buf(),
                log_name: "macros".to_string(),
                log_suffix: ".log".to_string(),
                log_append_time: false,
                ..FileConfig::default()
            },
        })
        .unwrap()
    }

    #[test]
    fn test_level_macros() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let logger = file_logger(&dir);

        tokio_test::block_on(async {
            log!(logger, LogLevel::Info, "Formatted: {}", 42).await.unwrap();
            debug!(logger, "Count: {}", 5).await.unwrap();
            info!(logger, "Items: {}", 100).await.unwrap();
            notice!(logger, "Notice message").await.unwrap();
            warning!(logger, "Retry {} of {}", 1, 3).await.unwrap();
            error!(logger, "Code: {}", 500).await.unwrap();
            critical!(logger, "Critical failure: {}", "system").await.unwrap();
        });

        let content = std::fs::read_to_string(dir.path().join("macros.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].ends_with("INFO Formatted: 42"));
        assert!(lines[1].ends_with("DEBUG Count: 5"));
        assert!(lines[4].ends_with("WARN Retry 1 of 3"));
        assert!(lines[6].ends_with("CRIT Critical failure: system"));
    }

    #[test]
    fn test_styled_arguments_keep_their_codes() {
        use crate::core::{StyleCode, StyledText};

        let dir = TempDir::new().expect("Failed to create temp dir");
        let logger = Logger::builder()
            .console(ConsoleConfig {
                enabled: false,
                ..ConsoleConfig::default()
            })
            .file(FileConfig {
                enabled: true,
                colored: true,
                log_root_path: dir.path().to_path_buf(),
                log_name: "styled".to_string(),
                log_suffix: ".log".to_string(),
                log_append_time: false,
                ..FileConfig::default()
            })
            .build()
            .unwrap();

        let took = StyledText::new("12s", [StyleCode::GREEN]);
        tokio_test::block_on(async {
            info!(logger, styled!("deploy took {} on {}", took, "web-1")).await.unwrap();
            // format! flattens arguments to plain text
            info!(logger, "plain {}", StyledText::new("x", [StyleCode::RED])).await.unwrap();
        });

        let content = std::fs::read_to_string(dir.path().join("styled.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].ends_with("deploy took \x1b[32m12s\x1b[0m on web-1"));
        assert!(lines[1].ends_with("plain x"));
    }
}
