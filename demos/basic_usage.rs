//! Basic logger usage example
//!
//! Demonstrates console output, levels, payload, call context and
//! channel thresholds.
//!
//! Run with: cargo run --example basic_usage

use rust_tagged_logger::prelude::*;
use rust_tagged_logger::{error, info, warn};
use serde_json::json;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Tagged Logger - Basic Usage Example ===\n");

    // Console output for every level, plus a buffer for warnings and errors
    let recent_problems = Arc::new(BufferSink::new(20));
    let logger = Logger::builder()
        .app_id("basic-demo")
        .metadata(json!({"version": env!("CARGO_PKG_VERSION")}))
        .channel(Arc::new(ConsoleSink::new()), None)
        .channel(recent_problems.clone(), Some(LogLevel::Warn))
        .build();

    println!("1. Logging at different levels:");
    logger.debug([LogArg::from("This is a debug message")]);
    logger.info([LogArg::from("This is an info message")]);
    logger.warn([LogArg::from("This is a warning message")]);
    logger.error([LogArg::from("This is an error message")]);

    println!("\n2. Payload and per-call metadata:");
    info!(
        logger,
        "Order placed",
        json!({"orderId": 42, "total": 19.99}),
        LogMeta::bake(json!({"requestId": "req-7"}))
    );

    println!("\n3. Sanitized payload:");
    warn!(
        logger,
        LogContext::new().sanitize(),
        "Login attempt",
        json!({"user": "bob", "password": "hunter2"})
    );

    println!("\n4. Errors with trimmed stacks:");
    let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "cannot open /etc/shadow");
    error!(logger, LogContext::new().trim_stack(3), "Read failed", LogArg::error(&err));

    println!("\n5. Buffered warnings and errors:");
    println!("{}", recent_problems.buffer_to_string());

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
