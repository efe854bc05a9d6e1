//! Optional process-wide default logger
//!
//! Applications normally own their [`Logger`] and pass it around. For code
//! that cannot, a single logger can be installed here with [`init`] and
//! must be torn down explicitly with [`shutdown`] so buffered lines reach
//! the file.

use super::error::{LoggerError, Result};
use super::logger::Logger;
use parking_lot::RwLock;
use std::sync::Arc;

static DEFAULT_LOGGER: RwLock<Option<Arc<Logger>>> = parking_lot::const_rwlock(None);

/// Install the default logger; fails if one is already installed
pub fn init(logger: Logger) -> Result<Arc<Logger>> {
    let mut slot = DEFAULT_LOGGER.write();
    if slot.is_some() {
        return Err(LoggerError::config(
            "global",
            "a default logger is already installed",
        ));
    }
    let logger = Arc::new(logger);
    *slot = Some(Arc::clone(&logger));
    Ok(logger)
}

/// The installed default logger, if any
pub fn get() -> Option<Arc<Logger>> {
    DEFAULT_LOGGER.read().clone()
}

/// Remove the default logger and close it
pub async fn shutdown() -> Result<()> {
    let logger = DEFAULT_LOGGER.write().take();
    match logger {
        Some(logger) => logger.close().await,
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConsoleConfig, LoggerConfig};

    #[tokio::test]
    async fn test_init_get_shutdown() {
        let config = LoggerConfig {
            print: ConsoleConfig {
                enabled: false,
                ..ConsoleConfig::default()
            },
            ..LoggerConfig::default()
        };

        assert!(get().is_none());
        init(Logger::new(config.clone()).unwrap()).unwrap();
        assert!(init(Logger::new(config).unwrap()).is_err());

        let logger = get().expect("default logger installed");
        logger.info("through the default").await.unwrap();

        shutdown().await.unwrap();
        assert!(get().is_none());
        assert!(logger.is_closed());
        shutdown().await.unwrap();
    }
}
