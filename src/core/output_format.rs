//! Output format configuration for log entries
//!
//! Provides different output formats for log entries:
//! - Text: `[appId][timestamp][level][#tag1,#tag2] message stack` followed by
//!   the payload and an optional `meta:` line
//! - Json: the serialized entry, one object per line

use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde_json::Value;

/// Output format for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[shop][2025-01-08T10:30:45.123Z][info][#web] Request processed {"id":1}`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"appId":"shop","timestamp":"2025-01-08T10:30:45.123Z","level":"info",...}`
    Json,
}

impl OutputFormat {
    /// Format a log entry according to this output format
    pub fn format(&self, entry: &LogEntry, timestamp_format: &TimestampFormat, show_meta: bool) -> String {
        match self {
            OutputFormat::Text => self.format_text(entry, timestamp_format, show_meta),
            OutputFormat::Json => self.format_json(entry, timestamp_format),
        }
    }

    fn format_text(&self, entry: &LogEntry, timestamp_format: &TimestampFormat, show_meta: bool) -> String {
        let mut out = format_header(entry, timestamp_format);

        for item in &entry.data {
            out.push(' ');
            out.push_str(&item.to_string());
        }

        if show_meta && !entry.meta.is_empty() {
            out.push_str("\nmeta: ");
            out.push_str(&entry.meta.to_string());
        }
        out
    }

    fn format_json(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut value = match serde_json::to_value(entry) {
            Ok(value) => value,
            Err(_) => return String::new(),
        };

        if let Value::Object(ref mut fields) = value {
            let timestamp = if timestamp_format.is_numeric() {
                Value::Number(entry.timestamp.timestamp_millis().into())
            } else {
                Value::String(timestamp_format.format(&entry.timestamp))
            };
            fields.insert("timestamp".to_string(), timestamp);
            if entry.meta.is_empty() {
                fields.remove("meta");
            }
        }

        serde_json::to_string(&value).unwrap_or_default()
    }
}

/// `[value]`, or nothing for an empty value
pub fn string_node(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("[{}]", value)
    }
}

/// `[#tag1,#tag2]`, or nothing without tags
pub fn tags_line(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let joined = tags
        .iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(",");
    format!("[{}]", joined)
}

/// First line of a text entry: `[appId][timestamp][level][#tags] message stack`
pub fn format_header(entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
    let header = format!(
        "{}{}{}{} {} {}",
        string_node(&entry.app_id),
        string_node(&timestamp_format.format(&entry.timestamp)),
        string_node(entry.level.to_str()),
        tags_line(&entry.tags),
        entry.message,
        entry.stack.as_deref().unwrap_or_default(),
    );
    header.trim_end().to_string()
}
