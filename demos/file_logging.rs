//! File logging example
//!
//! Demonstrates buffered file output configured from partial JSON.
//!
//! Run with: cargo run --example file_logging

use std::sync::Arc;
use styled_logger::prelude::*;
use styled_logger::global;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Styled Logger - File Logging Example ===\n");

    // Only the overridden keys need to be present
    let config = LoggerConfig::from_json_str(
        r#"{
            "print": { "log_level": "info" },
            "file": {
                "enabled": true,
                "log_root_path": "./demo_logs",
                "log_name": "demo-",
                "log_suffix": ".log",
                "flush_every_n_logs": 10
            }
        }"#,
    )?;

    let logger = global::init(Logger::new(config)?)?;

    println!("1. Logging from concurrent tasks:");
    let handles: Vec<_> = (0..4)
        .map(|task| {
            let logger = Arc::clone(&logger);
            tokio::spawn(async move {
                for i in 0..5 {
                    let message = StyledText::new(format!("task {}", task), [StyleCode::CYAN])
                        + format!(" step {}", i);
                    logger.info(message).await?;
                }
                Ok::<_, LoggerError>(())
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("logging task panicked")?;
    }

    println!("\n2. Debug records reach the file only:");
    logger.debug("visible in the file, hidden on the console").await?;

    logger.flush().await?;
    if let Some(path) = logger.file().path().await {
        println!("   Log file: {}", path.display());
    }

    println!(
        "\n3. Metrics: logged={} filtered={} failed={}",
        logger.metrics().total_logged(),
        logger.metrics().filtered_count(),
        logger.metrics().failed_count()
    );

    global::shutdown().await?;

    println!("\n=== Example completed successfully ===");
    Ok(())
}
