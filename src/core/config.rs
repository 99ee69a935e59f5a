//! Logger configuration
//!
//! Plain settings (`appId`, `tags`, `metadata`, `errorStackLevel`,
//! `trimStack`, `sensitiveFields`) can be read from JSON. Sinks, the custom
//! translator, the metadata store and the failure callback are set in code,
//! usually through [`LoggerBuilder`](super::LoggerBuilder).

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::log_meta::MetaFields;
use super::logger::SinkFailureCallback;
use super::meta_store::MetaStore;
use super::sink::OutputChannel;
use super::translator::Translator;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Key for shared metadata; generated from the clock when absent
    pub app_id: Option<String>,
    pub tags: Vec<String>,
    /// Merged into the metadata stored for `app_id`
    pub metadata: MetaFields,
    /// Error payloads logged below this level lose their stack
    pub error_stack_level: LogLevel,
    /// Default number of stack lines kept; `None` keeps all
    pub trim_stack: Option<usize>,
    /// Patterns masked by `LogContext::sanitize()`; defaults when `None`
    pub sensitive_fields: Option<Vec<String>>,

    /// Initial channels; a console sink for every level when `None`
    #[serde(skip)]
    pub channels: Option<Vec<OutputChannel>>,
    /// Last translator of every call
    #[serde(skip)]
    pub translator: Option<Arc<dyn Translator>>,
    /// Metadata store; the process-wide one when `None`
    #[serde(skip)]
    pub meta_store: Option<Arc<MetaStore>>,
    #[serde(skip)]
    pub on_sink_failure: Option<SinkFailureCallback>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            tags: Vec::new(),
            metadata: MetaFields::new(),
            error_stack_level: LogLevel::Error,
            trim_stack: None,
            sensitive_fields: None,
            channels: None,
            translator: None,
            meta_store: None,
            on_sink_failure: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse plain settings from JSON
    ///
    /// # Example
    ///
    /// ```
    /// use rust_tagged_logger::core::{LoggerConfig, LogLevel};
    ///
    /// let config = LoggerConfig::from_json(r#"{"appId": "billing", "errorStackLevel": "warn"}"#)?;
    /// assert_eq!(config.app_id.as_deref(), Some("billing"));
    /// assert_eq!(config.error_stack_level, LogLevel::Warn);
    /// # Ok::<(), rust_tagged_logger::LoggerError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if matches!(self.app_id.as_deref(), Some(id) if id.trim().is_empty()) {
            return Err(LoggerError::config("LoggerConfig", "appId must not be blank"));
        }
        if self.error_stack_level == LogLevel::Silent {
            return Err(LoggerError::config(
                "LoggerConfig",
                "errorStackLevel must be a real level",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("app_id", &self.app_id)
            .field("tags", &self.tags)
            .field("metadata", &self.metadata)
            .field("error_stack_level", &self.error_stack_level)
            .field("trim_stack", &self.trim_stack)
            .field("sensitive_fields", &self.sensitive_fields)
            .field("channels", &self.channels)
            .field("translator", &self.translator.as_ref().map(|_| "custom"))
            .field("meta_store", &self.meta_store.is_some())
            .field("on_sink_failure", &self.on_sink_failure.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert!(config.app_id.is_none());
        assert_eq!(config.error_stack_level, LogLevel::Error);
        assert!(config.channels.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = LoggerConfig::from_json(
            r#"{
                "appId": "shop",
                "tags": ["web"],
                "metadata": {"region": "eu"},
                "errorStackLevel": "info",
                "trimStack": 4,
                "sensitiveFields": ["pin"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.app_id.as_deref(), Some("shop"));
        assert_eq!(config.tags, ["web"]);
        assert_eq!(config.metadata.get("region"), Some(&json!("eu")));
        assert_eq!(config.error_stack_level, LogLevel::Info);
        assert_eq!(config.trim_stack, Some(4));
        assert_eq!(config.sensitive_fields, Some(vec!["pin".to_string()]));
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config.error_stack_level, LogLevel::Error);
        assert!(config.tags.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            LoggerConfig::from_json("{"),
            Err(LoggerError::JsonError(_))
        ));
        assert!(matches!(
            LoggerConfig::from_json(r#"{"errorStackLevel": "loud"}"#),
            Err(LoggerError::JsonError(_))
        ));
    }

    #[test]
    fn test_blank_app_id_rejected() {
        assert!(matches!(
            LoggerConfig::from_json(r#"{"appId": "  "}"#),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }
}
