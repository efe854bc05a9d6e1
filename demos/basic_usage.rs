//! Basic logger usage example
//!
//! Demonstrates console logging with styled message segments at every level.
//!
//! Run with: cargo run --example basic_usage

use styled_logger::prelude::*;
use styled_logger::{id_color, info, rgb_color, styled};

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Styled Logger - Basic Usage Example ===\n");

    // Console only, default styling
    let logger = Logger::with_defaults()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message").await?;
    logger.info("This is an info message").await?;
    logger.notice("This is a notice message").await?;
    logger.warning("This is a warning message").await?;
    logger.error("This is an error message").await?;
    logger.critical("This is a critical message").await?;

    println!("\n2. Styled segments:");
    let message = StyledText::new("deploy", [StyleCode::BOLD])
        + " finished in "
        + StyledText::new("12s", [StyleCode::GREEN, StyleCode::UNDERLINE]);
    logger.notice(message).await?;

    let message = StyledText::new("palette", [id_color(208)?])
        + " and "
        + StyledText::new("true color", [rgb_color(80, 160, 255)?]);
    logger.info(message).await?;

    println!("\n3. Formatting macros:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port).await?;
    let status = StyledText::new("healthy", [StyleCode::GREEN, StyleCode::BOLD]);
    info!(logger, styled!("Backend {} is {}", "db-1", status)).await?;

    println!("\n4. Uncolored console:");
    let plain = Logger::builder()
        .console(ConsoleConfig {
            colored: false,
            level: LevelConfig::words(),
            ..ConsoleConfig::default()
        })
        .build()?;
    plain
        .warning(StyledText::new("styles are dropped here", [StyleCode::RED]))
        .await?;

    logger.close().await?;
    plain.close().await?;

    println!("\n=== Example completed successfully ===");
    Ok(())
}
