//! Main logger implementation

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    error_payload::create_stack,
    instance_registry::InstanceRegistry,
    log_arg::{split_payload, CallShape, LogArg},
    log_context::{LogContext, Sanitize},
    log_entry::LogEntry,
    log_level::LogLevel,
    log_meta::LogMeta,
    meta_store::MetaStore,
    metrics::LoggerMetrics,
    output_registry::OutputRegistry,
    sanitize::SensitiveFields,
    sink::{OutputChannel, Sink},
    translator::{IdentityTranslator, LogMessage, Translator},
};
use crate::sinks::ConsoleSink;
use crate::translators::{JsonStringifyTranslator, SanitizeTranslator, StackTranslator};
use chrono::Utc;
use std::collections::BTreeSet;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Called once for every failed sink write.
pub type SinkFailureCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// When error payloads keep their stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackConfig {
    /// Below this level error payloads render as `"{name}: {message}"`
    pub error_stack_level: LogLevel,
    /// Default stack depth; `None` keeps every line
    pub trim_stack: Option<usize>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            error_stack_level: LogLevel::Error,
            trim_stack: None,
        }
    }
}

/// `app{unix_millis}`, e.g. `app1737054910132`
pub fn generate_app_id() -> String {
    format!("app{}", Utc::now().timestamp_millis())
}

/// State shared by a logger and every logger derived from it with `tagged`.
struct LoggerCore {
    app_id: String,
    channels: OutputRegistry,
    translator: Arc<dyn Translator>,
    stack_config: StackConfig,
    sensitive_fields: SensitiveFields,
    meta_store: Arc<MetaStore>,
    metrics: LoggerMetrics,
    on_sink_failure: Option<SinkFailureCallback>,
}

/// Structured, tagged logger
///
/// Cloning is cheap. Clones and loggers derived with [`Logger::tagged`] share
/// the application id, metadata, channels and translator.
///
/// # Example
///
/// ```
/// use rust_tagged_logger::prelude::*;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let buffer = Arc::new(BufferSink::new(10));
/// let logger = Logger::builder()
///     .app_id("docs-example")
///     .channel(buffer.clone(), None)
///     .build();
///
/// logger.info([LogArg::from("Logged in"), LogArg::from(json!({"user": "bob"}))]);
///
/// let entries = buffer.entries();
/// assert_eq!(entries[0].message, "Logged in");
/// ```
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
    tags: Arc<[String]>,
}

impl Logger {
    /// Logger with default configuration: generated app id, console output.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    #[must_use]
    pub fn from_config(config: LoggerConfig) -> Self {
        let app_id = config.app_id.unwrap_or_else(generate_app_id);
        let meta_store = config.meta_store.unwrap_or_else(MetaStore::global);
        meta_store.update(&app_id, config.metadata);

        let channels = config.channels.unwrap_or_else(|| {
            vec![OutputChannel::new(Arc::new(ConsoleSink::new()))]
        });
        let sensitive_fields = config
            .sensitive_fields
            .map(SensitiveFields::new)
            .unwrap_or_default();

        let core = LoggerCore {
            app_id,
            channels: OutputRegistry::from_channels(channels),
            translator: config
                .translator
                .unwrap_or_else(|| Arc::new(IdentityTranslator)),
            stack_config: StackConfig {
                error_stack_level: config.error_stack_level,
                trim_stack: config.trim_stack,
            },
            sensitive_fields,
            meta_store,
            metrics: LoggerMetrics::new(),
            on_sink_failure: config.on_sink_failure,
        };

        Self {
            core: Arc::new(core),
            tags: sorted_unique(config.tags).into(),
        }
    }

    /// Shared logger for a configuration object
    ///
    /// The same `Arc<LoggerConfig>` always yields the same logger while the
    /// configuration is alive. Distinct configurations with equal content
    /// are not guaranteed to share.
    pub fn create(config: &Arc<LoggerConfig>) -> Arc<Logger> {
        InstanceRegistry::global().get_or_create(config)
    }

    pub fn app_id(&self) -> &str {
        &self.core.app_id
    }

    /// Sorted, de-duplicated tags of this logger
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn channels(&self) -> &OutputRegistry {
        &self.core.channels
    }

    pub fn stack_config(&self) -> StackConfig {
        self.core.stack_config
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.core.metrics
    }

    /// Current metadata of this logger's application id
    pub fn metadata(&self) -> LogMeta {
        self.core.meta_store.get(&self.core.app_id)
    }

    /// Merge `fields` into the metadata of this logger's application id
    ///
    /// Visible to every logger sharing the id.
    pub fn update_meta(&self, fields: impl Into<LogMeta>) -> LogMeta {
        self.core.meta_store.update(&self.core.app_id, fields)
    }

    /// True when both handles share the same core.
    pub fn shares_core(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.core, &b.core)
    }

    /// Derived logger with the union of current and new tags
    ///
    /// Tags accumulate along a chain of `tagged` calls.
    #[must_use]
    pub fn tagged<I, S>(&self, tags: I) -> Logger
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = self
            .tags
            .iter()
            .cloned()
            .chain(tags.into_iter().map(Into::into));

        Logger {
            core: Arc::clone(&self.core),
            tags: sorted_unique(next).into(),
        }
    }

    #[inline]
    pub fn debug<I: IntoIterator<Item = LogArg>>(&self, args: I) {
        self.log_message(LogLevel::Debug, args);
    }

    #[inline]
    pub fn info<I: IntoIterator<Item = LogArg>>(&self, args: I) {
        self.log_message(LogLevel::Info, args);
    }

    #[inline]
    pub fn warn<I: IntoIterator<Item = LogArg>>(&self, args: I) {
        self.log_message(LogLevel::Warn, args);
    }

    #[inline]
    pub fn error<I: IntoIterator<Item = LogArg>>(&self, args: I) {
        self.log_message(LogLevel::Error, args);
    }

    #[inline]
    pub fn log<I: IntoIterator<Item = LogArg>>(&self, level: LogLevel, args: I) {
        self.log_message(level, args);
    }

    /// Build an entry from call arguments and dispatch it
    ///
    /// Never panics on argument shape; a missing message is empty.
    pub fn log_message<I: IntoIterator<Item = LogArg>>(&self, level: LogLevel, args: I) {
        let (context, message, rest) = CallShape::parse(args).into_parts();
        let context = context.unwrap_or_default();

        let (call_meta, payload) = split_payload(rest);
        let tags = self.entry_tags(context.tag_list(), &call_meta);
        let meta = LogMeta::merge(&self.metadata(), &call_meta);

        let mut log_message = LogMessage::new(message, payload);

        if context.wants_sanitize() {
            log_message = self.sanitizer(&context).map(log_message);
        }

        let has_error_payload = log_message.has_error_payload();
        if has_error_payload {
            let trim = self.error_stack_trim(level, &context);
            log_message = StackTranslator::new(trim).map(log_message);
        }

        if context.wants_stringify() {
            log_message = JsonStringifyTranslator.map(log_message);
        }

        log_message = self.translate(log_message);

        let stack = if !has_error_payload && context.stack_forced() {
            Some(create_stack(self.requested_trim(&context))).filter(|s| !s.is_empty())
        } else {
            None
        };

        let entry = LogEntry::new(self.core.app_id.as_str(), level, log_message.message)
            .with_tags(tags)
            .with_data(log_message.payload)
            .with_stack(stack)
            .with_meta(meta);

        self.write(&entry);
    }

    /// Deliver `entry` to every sink registered for its level
    ///
    /// **Per-Sink Isolation**: each write is wrapped in `catch_unwind`; an
    /// error or panic is reported to stderr and the failure callback, then the
    /// next sink gets the entry.
    pub fn write(&self, entry: &LogEntry) {
        self.core.metrics.record_logged();

        for sink in self.core.channels.by_level(entry.level).iter() {
            let result = catch_unwind(AssertUnwindSafe(|| sink.write(entry)));

            match result {
                Ok(Ok(())) => {
                    self.core.metrics.record_delivered();
                }
                Ok(Err(e)) => {
                    self.report_failure(LoggerError::sink_write(sink.name(), e.to_string()));
                }
                Err(panic_info) => {
                    let panic_msg = panic_message(panic_info.as_ref());
                    self.report_failure(LoggerError::sink_panicked(sink.name(), panic_msg));
                }
            }
        }
    }

    /// Flush every registered sink
    ///
    /// All sinks are flushed even if one fails; the first error is returned.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;

        for sink in self.core.channels.all().iter() {
            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER WARNING] Failed to flush sink '{}': {}", sink.name(), e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Run the custom translator; if it panics, keep the message it was given.
    fn translate(&self, log_message: LogMessage) -> LogMessage {
        let untranslated = log_message.clone();

        match catch_unwind(AssertUnwindSafe(|| self.core.translator.map(log_message))) {
            Ok(translated) => translated,
            Err(panic_info) => {
                self.core.metrics.record_translator_failure();
                let error = LoggerError::translator_panicked(panic_message(panic_info.as_ref()));
                eprintln!("[LOGGER ERROR] {}. Entry logged untranslated.", error);
                untranslated
            }
        }
    }

    fn report_failure(&self, error: LoggerError) {
        self.core.metrics.record_failure();
        eprintln!("[LOGGER ERROR] {}. Other sinks continue to function.", error);

        if let Some(ref callback) = self.core.on_sink_failure {
            if catch_unwind(AssertUnwindSafe(|| callback(&error))).is_err() {
                eprintln!("[LOGGER CRITICAL] Sink failure callback panicked");
            }
        }
    }

    /// Logger tags, then call tags and call metadata tags not already present.
    fn entry_tags(&self, call_tags: &[String], call_meta: &LogMeta) -> Vec<String> {
        let mut tags: Vec<String> = self.tags.to_vec();
        for tag in call_tags.iter().cloned().chain(call_meta.tags()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    fn sanitizer(&self, context: &LogContext) -> SanitizeTranslator {
        match context.sanitize_request() {
            Some(Sanitize::Fields(fields)) => SanitizeTranslator::new(SensitiveFields::new(fields.iter().cloned())),
            _ => SanitizeTranslator::new(self.core.sensitive_fields.clone()),
        }
    }

    fn requested_trim(&self, context: &LogContext) -> Option<usize> {
        context.trim_limit().or(self.core.stack_config.trim_stack)
    }

    /// `Some(0)` hides error stacks: disabled for the call, or level too low.
    fn error_stack_trim(&self, level: LogLevel, context: &LogContext) -> Option<usize> {
        if context.stack_disabled() || !level.at_least(self.core.stack_config.error_stack_level) {
            Some(0)
        } else {
            self.requested_trim(context)
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("app_id", &self.core.app_id)
            .field("tags", &self.tags)
            .field("channels", &self.core.channels)
            .field("stack_config", &self.core.stack_config)
            .finish()
    }
}

fn sorted_unique<I: IntoIterator<Item = String>>(tags: I) -> Vec<String> {
    tags.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_tagged_logger::prelude::*;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .app_id("checkout")
///     .tags(["payments"])
///     .metadata(json!({"region": "eu"}))
///     .channel(Arc::new(BufferSink::new(100)), Some(LogLevel::Info))
///     .error_stack_level(LogLevel::Warn)
///     .trim_stack(10)
///     .build();
///
/// assert_eq!(logger.tags(), ["payments"]);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
        }
    }

    /// Start from existing settings
    pub fn from_config(config: LoggerConfig) -> Self {
        Self { config }
    }

    #[must_use = "builder methods return a new value"]
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.config.app_id = Some(app_id.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.config.tags.push(tag.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Merge initial metadata; later calls override earlier keys
    #[must_use = "builder methods return a new value"]
    pub fn metadata(mut self, metadata: impl Into<LogMeta>) -> Self {
        let meta = LogMeta::bake(metadata);
        for (key, value) in meta.fields() {
            self.config.metadata.insert(key.clone(), value.clone());
        }
        self
    }

    /// Register a sink; `None` accepts every level
    ///
    /// Without any channel the logger writes to a [`ConsoleSink`].
    #[must_use = "builder methods return a new value"]
    pub fn channel(mut self, sink: Arc<dyn Sink>, min_level: Option<LogLevel>) -> Self {
        self.config
            .channels
            .get_or_insert_with(Vec::new)
            .push(OutputChannel { sink, min_level });
        self
    }

    /// Start without any channel; sinks can be added later via `channels()`
    #[must_use = "builder methods return a new value"]
    pub fn no_channels(mut self) -> Self {
        self.config.channels = Some(Vec::new());
        self
    }

    /// Custom translator run last on every call
    #[must_use = "builder methods return a new value"]
    pub fn translator<T: Translator + 'static>(mut self, translator: T) -> Self {
        self.config.translator = Some(Arc::new(translator));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn error_stack_level(mut self, level: LogLevel) -> Self {
        self.config.error_stack_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn trim_stack(mut self, lines: usize) -> Self {
        self.config.trim_stack = Some(lines);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sensitive_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.sensitive_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Use an explicit metadata store instead of the process-wide one
    #[must_use = "builder methods return a new value"]
    pub fn meta_store(mut self, store: Arc<MetaStore>) -> Self {
        self.config.meta_store = Some(store);
        self
    }

    /// Set a callback for sink failures
    ///
    /// # Example
    ///
    /// ```
    /// use rust_tagged_logger::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder()
    ///     .no_channels()
    ///     .on_sink_failure(Arc::new(|err: &LoggerError| {
    ///         eprintln!("ALERT: {}", err);
    ///     }))
    ///     .build();
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn on_sink_failure(mut self, callback: SinkFailureCallback) -> Self {
        self.config.on_sink_failure = Some(callback);
        self
    }

    /// The collected configuration, e.g. for [`Logger::create`]
    pub fn config(self) -> LoggerConfig {
        self.config
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger::from_config(self.config)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::BufferSink;
    use serde_json::json;

    fn buffered(app_id: &str) -> (Logger, Arc<BufferSink>) {
        let buffer = Arc::new(BufferSink::new(50));
        let logger = Logger::builder()
            .app_id(app_id)
            .meta_store(Arc::new(MetaStore::new()))
            .channel(buffer.clone(), None)
            .build();
        (logger, buffer)
    }

    #[test]
    fn test_builder_basic() {
        let (logger, _) = buffered("builder-basic");
        assert_eq!(logger.app_id(), "builder-basic");
        assert_eq!(logger.channels().len(), 1);
        assert_eq!(logger.stack_config(), StackConfig::default());
    }

    #[test]
    fn test_default_channel_is_console() {
        let logger = Logger::builder().meta_store(Arc::new(MetaStore::new())).build();
        let channels = logger.channels().channels();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].sink.name(), "console");
        assert!(channels[0].min_level.is_none());
    }

    #[test]
    fn test_generated_app_id() {
        let id = generate_app_id();
        assert!(id.starts_with("app"));
        assert!(id[3..].parse::<i64>().is_ok());
    }

    #[test]
    fn test_builder_tags_are_sorted_and_unique() {
        let logger = Logger::builder()
            .no_channels()
            .meta_store(Arc::new(MetaStore::new()))
            .tags(["b", "a", "b"])
            .build();
        assert_eq!(logger.tags(), ["a", "b"]);
    }

    #[test]
    fn test_plain_message() {
        let (logger, buffer) = buffered("plain");
        logger.info([LogArg::from("Hello"), LogArg::from(1)]);

        let entries = buffer.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "Hello");
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[0].app_id, "plain");
        assert_eq!(entries[0].data.len(), 1);
        assert!(entries[0].stack.is_none());
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let (logger, buffer) = buffered("no-message");
        logger.warn([LogArg::from(json!({"a": 1}))]);
        logger.warn(Vec::<LogArg>::new());

        let entries = buffer.entries();
        assert_eq!(entries[0].message, "");
        assert_eq!(entries[0].data.len(), 1);
        assert_eq!(entries[1].message, "");
        assert!(entries[1].data.is_empty());
    }

    #[test]
    fn test_context_tags_are_appended() {
        let (logger, buffer) = buffered("ctx-tags");
        let child = logger.tagged(["root"]);
        child.debug([
            LogArg::from(LogContext::new().tags(["zeta", "root"])),
            LogArg::from("tagged call"),
        ]);

        let entry = &buffer.entries()[0];
        assert_eq!(entry.tags, ["root", "zeta"]);
        assert_eq!(entry.message, "tagged call");
    }

    #[test]
    fn test_meta_tags_extend_entry_tags() {
        let (logger, buffer) = buffered("meta-tags");
        logger.info([
            LogArg::from("hi"),
            LogArg::from(LogMeta::bake(json!({"tags": ["audit"]}))),
        ]);
        assert_eq!(buffer.entries()[0].tags, ["audit"]);
    }

    #[test]
    fn test_error_stack_hidden_below_threshold() {
        let (logger, buffer) = buffered("stack-threshold");
        logger.warn([LogArg::from("failed"), LogArg::from(oops())]);

        let entry = &buffer.entries()[0];
        assert_eq!(entry.data[0].as_str(), Some("Error: Oops"));
    }

    #[test]
    fn test_error_stack_shown_at_threshold() {
        let (logger, buffer) = buffered("stack-shown");
        logger.error([
            LogArg::from(LogContext::new().trim_stack(1)),
            LogArg::from("failed"),
            LogArg::from(oops()),
        ]);

        let entry = &buffer.entries()[0];
        assert_eq!(entry.data[0].as_str(), Some("Error: Oops"));
        assert!(!entry.data[0].is_error());
    }

    #[test]
    fn test_with_stack_false_hides_error_stack() {
        let (logger, buffer) = buffered("stack-off");
        logger.error([
            LogArg::from(LogContext::new().with_stack(false)),
            LogArg::from("failed"),
            LogArg::from(oops()),
        ]);
        assert_eq!(buffer.entries()[0].data[0].as_str(), Some("Error: Oops"));
    }

    #[test]
    fn test_synthetic_stack() {
        let (logger, buffer) = buffered("synthetic");
        logger.debug([LogArg::from(LogContext::new().with_stack(true)), LogArg::from("where am I")]);
        logger.debug([LogArg::from("no stack")]);

        let entries = buffer.entries();
        let stack = entries[0].stack.as_deref().unwrap();
        assert!(stack.starts_with("Stack:"));
        assert!(!stack.contains("rust_tagged_logger::core::logger"));
        assert!(entries[1].stack.is_none());
    }

    #[test]
    fn test_custom_translator_runs_last() {
        let buffer = Arc::new(BufferSink::new(5));
        let logger = Logger::builder()
            .meta_store(Arc::new(MetaStore::new()))
            .channel(buffer.clone(), None)
            .translator(|mut message: LogMessage| {
                message.message = message.message.to_uppercase();
                message.payload.retain(|p| !p.is_error());
                message
            })
            .build();

        logger.info([
            LogArg::from(LogContext::new().stringify()),
            LogArg::from("shout"),
            LogArg::from(json!({"a": 1})),
        ]);

        let entry = &buffer.entries()[0];
        assert_eq!(entry.message, "SHOUT");
        assert_eq!(entry.data[0].as_str(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_panicking_translator_keeps_entry() {
        let buffer = Arc::new(BufferSink::new(5));
        let logger = Logger::builder()
            .meta_store(Arc::new(MetaStore::new()))
            .channel(buffer.clone(), None)
            .translator(|mut message: LogMessage| {
                if message.message == "boom" {
                    panic!("translator exploded");
                }
                message.message = message.message.to_uppercase();
                message
            })
            .build();

        logger.warn([LogArg::from("boom"), LogArg::from(json!({"a": 1}))]);
        logger.info([LogArg::from("calm")]);

        let entries = buffer.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "boom");
        assert_eq!(entries[0].data[0].as_value(), Some(&json!({"a": 1})));
        assert_eq!(entries[1].message, "CALM");
        assert_eq!(logger.metrics().translator_failures(), 1);
        assert_eq!(logger.metrics().sink_failures(), 0);
    }

    #[test]
    fn test_failure_callback_invoked() {
        use std::sync::atomic::{AtomicU64, Ordering};

        struct Broken;
        impl Sink for Broken {
            fn write(&self, _entry: &LogEntry) -> Result<()> {
                Err(LoggerError::other("nope"))
            }
            fn name(&self) -> &str {
                "broken"
            }
        }

        let failures = Arc::new(AtomicU64::new(0));
        let failures_clone = Arc::clone(&failures);
        let logger = Logger::builder()
            .meta_store(Arc::new(MetaStore::new()))
            .channel(Arc::new(Broken), None)
            .on_sink_failure(Arc::new(move |err: &LoggerError| {
                assert!(matches!(err, LoggerError::SinkWrite { .. }));
                failures_clone.fetch_add(1, Ordering::Relaxed);
            }))
            .build();

        logger.info([LogArg::from("one")]);
        logger.info([LogArg::from("two")]);

        assert_eq!(failures.load(Ordering::Relaxed), 2);
        assert_eq!(logger.metrics().sink_failures(), 2);
        assert_eq!(logger.metrics().total_logged(), 2);
    }

    #[test]
    fn test_tagged_shares_core() {
        let (logger, buffer) = buffered("shared-core");
        let child = logger.tagged(["child"]);
        assert!(Logger::shares_core(&logger, &child));

        child.info([LogArg::from("from child")]);
        assert_eq!(buffer.len(), 1);
        assert!(logger.tags().is_empty());
    }

    #[test]
    fn test_update_meta_visible_to_children() {
        let (logger, buffer) = buffered("meta-children");
        let child = logger.tagged(["child"]);
        logger.update_meta(json!({"release": "1.2"}));

        child.info([LogArg::from("after update")]);
        assert_eq!(buffer.entries()[0].meta.get("release"), Some(&json!("1.2")));
    }

    #[test]
    fn test_flush_reaches_every_sink() {
        use std::sync::atomic::{AtomicBool, Ordering};

        struct Unflushable;
        impl Sink for Unflushable {
            fn write(&self, _entry: &LogEntry) -> Result<()> {
                Ok(())
            }
            fn flush(&self) -> Result<()> {
                Err(LoggerError::other("closed"))
            }
            fn name(&self) -> &str {
                "unflushable"
            }
        }

        struct Tracked(AtomicBool);
        impl Sink for Tracked {
            fn write(&self, _entry: &LogEntry) -> Result<()> {
                Ok(())
            }
            fn flush(&self) -> Result<()> {
                self.0.store(true, Ordering::SeqCst);
                Ok(())
            }
            fn name(&self) -> &str {
                "tracked"
            }
        }

        let tracked = Arc::new(Tracked(AtomicBool::new(false)));
        let logger = Logger::builder()
            .meta_store(Arc::new(MetaStore::new()))
            .channel(Arc::new(Unflushable), None)
            .channel(tracked.clone(), None)
            .build();

        assert!(matches!(logger.flush(), Err(LoggerError::Other(_))));
        assert!(tracked.0.load(Ordering::SeqCst));
    }

    fn oops() -> crate::core::ErrorPayload {
        crate::core::ErrorPayload::new("Error", "Oops")
    }
}
