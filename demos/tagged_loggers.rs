//! Tagged loggers example
//!
//! Demonstrates derived loggers, shared metadata, JSON output, custom
//! translators and instance sharing.
//!
//! Run with: cargo run --example tagged_loggers

use rust_tagged_logger::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Tagged Logger - Tagged Loggers Example ===\n");

    let config = Arc::new(
        Logger::builder()
            .app_id("shop")
            .tags(["backend"])
            .metadata(json!({"region": "eu-west"}))
            .channel(
                Arc::new(ConsoleSink::new().with_output_format(OutputFormat::Json)),
                None,
            )
            .translator(|message: LogMessage| {
                LogMessage::new(message.message.trim().to_string(), message.payload)
            })
            .config(),
    );

    // Same configuration, same logger
    let logger = Logger::create(&config);
    assert!(Arc::ptr_eq(&logger, &Logger::create(&config)));

    println!("1. Derived loggers accumulate tags:");
    let api = logger.tagged(["api"]);
    let orders = api.tagged(["orders"]);
    println!("   api tags:    {:?}", api.tags());
    println!("   orders tags: {:?}", orders.tags());
    orders.info([LogArg::from("  Listing orders  "), LogArg::from(json!({"page": 1}))]);

    println!("\n2. Metadata updates are shared by every logger of the app:");
    api.update_meta(json!({"deployment": "blue"}));
    orders.info([LogArg::from("After metadata update")]);

    println!("\n3. Call tags and stringified payload:");
    orders.warn([
        LogArg::from(LogContext::new().tag("slow").stringify()),
        LogArg::from("Slow query"),
        LogArg::from(json!({"ms": 1250})),
    ]);

    println!("\n4. Synthetic stack on request:");
    orders.debug([
        LogArg::from(LogContext::new().with_stack(true).trim_stack(4)),
        LogArg::from("Where was this called from?"),
    ]);

    println!("\nMetrics: {} logged, {} failed", logger.metrics().total_logged(), logger.metrics().sink_failures());
    logger.flush()?;
    Ok(())
}
