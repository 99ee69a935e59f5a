//! Log entry structure

use super::log_arg::Payload;
use super::log_level::LogLevel;
use super::log_meta::LogMeta;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One finished log record.
///
/// Built once per log call and handed to sinks by shared reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub app_id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub data: Vec<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    pub meta: LogMeta,
}

impl LogEntry {
    pub fn new(app_id: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            timestamp: Utc::now(),
            level,
            message: message.into(),
            tags: Vec::new(),
            data: Vec::new(),
            stack: None,
            meta: LogMeta::empty(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_data(mut self, data: Vec<Payload>) -> Self {
        self.data = data;
        self
    }

    pub fn with_stack(mut self, stack: Option<String>) -> Self {
        self.stack = stack;
        self
    }

    pub fn with_meta(mut self, meta: LogMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_json_shape() {
        let entry = LogEntry::new("app1", LogLevel::Warn, "Disk low")
            .with_tags(vec!["infra".to_string()])
            .with_data(vec![Payload::Value(json!({"free": 5}))])
            .with_meta(LogMeta::bake(json!({"host": "node-1"})));

        let parsed: serde_json::Value = serde_json::from_str(&entry.to_json().unwrap()).unwrap();
        assert_eq!(parsed["appId"], "app1");
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["message"], "Disk low");
        assert_eq!(parsed["tags"], json!(["infra"]));
        assert_eq!(parsed["data"], json!([{"free": 5}]));
        assert_eq!(parsed["meta"], json!({"host": "node-1"}));
        assert!(parsed.get("stack").is_none());
    }

    #[test]
    fn test_entry_defaults() {
        let entry = LogEntry::new("app1", LogLevel::Info, "hello");
        assert!(entry.tags.is_empty());
        assert!(entry.data.is_empty());
        assert!(entry.stack.is_none());
        assert!(entry.meta.is_empty());
    }
}
