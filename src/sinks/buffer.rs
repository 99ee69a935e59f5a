//! In-memory sink keeping the most recent entries

use crate::core::{format_header, LogEntry, Result, Sink, TimestampFormat};
use parking_lot::Mutex;
use std::collections::VecDeque;

pub const DEFAULT_MAX_ENTRIES: usize = 200;

/// Bounded buffer of entries
///
/// When full, the oldest entry is dropped, or with `flush_on_overload` the
/// whole buffer is cleared, before the new entry is stored.
///
/// # Example
///
/// ```
/// use rust_tagged_logger::prelude::*;
///
/// let sink = BufferSink::new(2);
/// for message in ["a", "b", "c"] {
///     sink.write(&LogEntry::new("app", LogLevel::Info, message)).unwrap();
/// }
///
/// let messages: Vec<_> = sink.entries().into_iter().map(|e| e.message).collect();
/// assert_eq!(messages, ["b", "c"]);
/// ```
#[derive(Debug)]
pub struct BufferSink {
    entries: Mutex<VecDeque<LogEntry>>,
    max_entries: usize,
    flush_on_overload: bool,
}

impl BufferSink {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_entries.min(DEFAULT_MAX_ENTRIES))),
            max_entries,
            flush_on_overload: false,
        }
    }

    /// Clear everything instead of dropping the oldest entry when full
    #[must_use]
    pub fn with_flush_on_overload(mut self, enabled: bool) -> Self {
        self.flush_on_overload = enabled;
        self
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Snapshot of the buffered entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// One line per entry: the text header followed by the JSON payload
    pub fn buffer_to_string(&self) -> String {
        self.entries
            .lock()
            .iter()
            .map(|entry| {
                let data = serde_json::to_string(&entry.data).unwrap_or_default();
                format!("{} {}", format_header(entry, &TimestampFormat::Iso8601), data)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl Sink for BufferSink {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        let mut entries = self.entries.lock();
        if entries.len() >= self.max_entries {
            if self.flush_on_overload {
                entries.clear();
            } else {
                entries.pop_front();
            }
        }
        entries.push_back(entry.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "buffer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Payload};
    use serde_json::json;

    fn entry(message: &str) -> LogEntry {
        LogEntry::new("buf", LogLevel::Info, message)
    }

    fn messages(sink: &BufferSink) -> Vec<String> {
        sink.entries().into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(BufferSink::default().max_entries(), 200);
    }

    #[test]
    fn test_drops_oldest_when_full() {
        let sink = BufferSink::new(3);
        for i in 0..5 {
            sink.write(&entry(&i.to_string())).unwrap();
        }
        assert_eq!(messages(&sink), ["2", "3", "4"]);
    }

    #[test]
    fn test_flush_on_overload() {
        let sink = BufferSink::new(2).with_flush_on_overload(true);
        for message in ["a", "b", "c"] {
            sink.write(&entry(message)).unwrap();
        }
        assert_eq!(messages(&sink), ["c"]);
    }

    #[test]
    fn test_clear() {
        let sink = BufferSink::new(2);
        sink.write(&entry("a")).unwrap();
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_buffer_to_string() {
        let sink = BufferSink::new(5);
        sink.write(&entry("first").with_data(vec![Payload::Value(json!({"k": 1}))]))
            .unwrap();
        sink.write(&entry("second").with_tags(vec!["t".to_string()]))
            .unwrap();

        let text = sink.buffer_to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[buf]["));
        assert!(lines[0].ends_with(r#"[info] first [{"k":1}]"#));
        assert!(lines[1].ends_with("[info][#t] second []"));
    }
}
