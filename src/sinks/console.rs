//! Console sink implementation

use crate::core::{LogEntry, LogLevel, OutputFormat, Result, Sink, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes entries to stdout, errors to stderr.
///
/// Text lines look like `[appId][timestamp][level][#tag1,#tag2] message stack`
/// followed by the payload and, when enabled, a `meta: {...}` line.
/// `Silent` entries are ignored.
pub struct ConsoleSink {
    use_colors: bool,
    show_meta: AtomicBool,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
            show_meta: AtomicBool::new(true),
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the output format for this sink
    ///
    /// # Example
    ///
    /// ```
    /// use rust_tagged_logger::sinks::ConsoleSink;
    /// use rust_tagged_logger::OutputFormat;
    ///
    /// let sink = ConsoleSink::new().with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible format string
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_tagged_logger::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::new().with_custom_timestamp("%d/%b/%Y:%H:%M:%S %z");
    /// ```
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    /// Toggle the `meta:` line; takes effect for the next entry.
    pub fn set_show_meta(&self, show: bool) {
        self.show_meta.store(show, Ordering::Relaxed);
    }

    pub fn show_meta(&self) -> bool {
        self.show_meta.load(Ordering::Relaxed)
    }

    /// Rendered line for `entry`, without colors.
    pub fn render(&self, entry: &LogEntry) -> String {
        self.output_format
            .format(entry, &self.timestamp_format, self.show_meta())
    }

    fn render_colored(&self, entry: &LogEntry) -> String {
        let plain = self.render(entry);
        if !self.use_colors || self.output_format != OutputFormat::Text {
            return plain;
        }
        colorize_header(entry, &self.timestamp_format, plain)
    }
}

#[cfg(feature = "console")]
fn colorize_header(entry: &LogEntry, timestamp_format: &TimestampFormat, plain: String) -> String {
    let header = crate::core::format_header(entry, timestamp_format);
    match plain.strip_prefix(header.as_str()) {
        Some(rest) => format!("{}{}", header.color(entry.level.color_code()), rest),
        None => plain,
    }
}

#[cfg(not(feature = "console"))]
fn colorize_header(_entry: &LogEntry, _timestamp_format: &TimestampFormat, plain: String) -> String {
    plain
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        if entry.level == LogLevel::Silent {
            return Ok(());
        }

        let output = self.render_colored(entry);

        // Route Error to stderr, others to stdout
        match entry.level {
            LogLevel::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogMeta;
    use serde_json::json;

    #[test]
    fn test_render_text() {
        let sink = ConsoleSink::with_colors(false);
        let entry = LogEntry::new("svc", LogLevel::Warn, "disk low")
            .with_tags(vec!["io".to_string()])
            .with_meta(LogMeta::bake(json!({"host": "a"})));

        let line = sink.render(&entry);
        assert!(line.starts_with("[svc]["));
        assert!(line.contains("][warn][#io] disk low"));
        assert!(line.ends_with(r#"meta: {"host":"a"}"#));

        sink.set_show_meta(false);
        assert!(!sink.render(&entry).contains("meta:"));
    }

    #[test]
    fn test_render_json() {
        let sink = ConsoleSink::new().with_output_format(OutputFormat::Json);
        let entry = LogEntry::new("svc", LogLevel::Info, "json line");
        let parsed: serde_json::Value = serde_json::from_str(&sink.render(&entry)).unwrap();
        assert_eq!(parsed["message"], "json line");
    }

    #[test]
    fn test_write_all_levels() {
        let sink = ConsoleSink::new();
        for level in LogLevel::ALL {
            assert!(sink.write(&LogEntry::new("svc", level, "message")).is_ok());
        }
        assert!(sink.flush().is_ok());
        assert_eq!(sink.name(), "console");
    }
}
