//! Core logger types and traits

pub mod config;
pub mod error;
pub mod formatter;
pub mod global;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod sink;
pub mod style;
pub mod styled_text;

pub use config::{ConsoleConfig, FileConfig, LevelConfig, LevelLabel, LoggerConfig, TimeConfig};
pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use record::Record;
pub use sink::{AsyncSink, WriteOutcome};
pub use style::{
    id_color, id_color_bg, make_color_prefix, make_colors_prefix, rgb_color, rgb_color_bg,
    StyleCode, RESET_CODE,
};
pub use styled_text::{LogMessage, StyledText};
