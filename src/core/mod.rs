//! Core logger types and traits

pub mod config;
pub mod error;
pub mod error_payload;
pub mod instance_registry;
pub mod log_arg;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod log_meta;
pub mod logger;
pub mod meta_store;
pub mod metrics;
pub mod output_format;
pub mod output_registry;
pub mod sanitize;
pub mod sink;
pub mod timestamp;
pub mod translator;

pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use error_payload::{create_stack, stringify_error, ErrorPayload};
pub use instance_registry::InstanceRegistry;
pub use log_arg::{split_payload, CallShape, LogArg, Payload};
pub use log_context::{LogContext, Sanitize};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use log_meta::{LogMeta, MetaFields, META_TAGS_KEY};
pub use logger::{generate_app_id, Logger, LoggerBuilder, SinkFailureCallback, StackConfig};
pub use meta_store::MetaStore;
pub use metrics::LoggerMetrics;
pub use output_format::{format_header, string_node, tags_line, OutputFormat};
pub use output_registry::{OutputRegistry, SinkList};
pub use sanitize::{sanitize, sanitize_with_mask, SensitiveFields, DEFAULT_MASK, DEFAULT_SENSITIVE_FIELDS};
pub use sink::{OutputChannel, Sink};
pub use timestamp::TimestampFormat;
pub use translator::{IdentityTranslator, LogMessage, Translator};
