//! # Rust Tagged Logger
//!
//! A structured, leveled application logger. Every entry carries an
//! application id, tags, a payload and shared metadata, passes through a
//! chain of translators and reaches every sink registered for its level.
//!
//! ## Features
//!
//! - **Tagged loggers**: `tagged` derives cheap child loggers that share
//!   metadata and sinks
//! - **Call context**: per-call tags, stack capture, sanitization and
//!   stringification via [`LogContext`]
//! - **Shared metadata**: one store per application id, visible to every
//!   logger using that id
//! - **Per-sink isolation**: a failing or panicking sink never affects the
//!   caller or other sinks
//!
//! ## Example
//!
//! ```
//! use rust_tagged_logger::prelude::*;
//! use rust_tagged_logger::info;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let buffer = Arc::new(BufferSink::default());
//! let logger = Logger::builder()
//!     .app_id("orders")
//!     .channel(buffer.clone(), Some(LogLevel::Info))
//!     .build()
//!     .tagged(["api"]);
//!
//! info!(logger, LogContext::new().tag("checkout"), "Order placed", json!({"id": 7}));
//!
//! let entry = &buffer.entries()[0];
//! assert_eq!(entry.tags, ["api", "checkout"]);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;
pub mod translators;

pub mod prelude {
    pub use crate::core::{
        ErrorPayload, LogArg, LogContext, LogEntry, LogLevel, LogMessage, LogMeta, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputChannel, OutputFormat,
        Payload, Result, Sink, TimestampFormat, Translator,
    };
    pub use crate::sinks::{BufferSink, ConsoleSink};
}

pub use crate::core::{
    create_stack, generate_app_id, sanitize, stringify_error, CallShape, ErrorPayload,
    InstanceRegistry, LogArg, LogContext, LogEntry, LogLevel, LogMessage, LogMeta, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, MetaStore, OutputChannel,
    OutputFormat, OutputRegistry, Payload, Result, Sanitize, SensitiveFields, Sink, StackConfig,
    TimestampFormat, Translator,
};
pub use sinks::{BufferSink, ConsoleSink};
