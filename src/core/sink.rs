//! Sink trait for log output destinations

use super::{error::Result, log_entry::LogEntry, log_level::LogLevel};
use std::fmt;
use std::sync::Arc;

/// Destination for finished log entries.
///
/// Sinks are shared between loggers, so `write` takes `&self`; mutable state
/// lives behind the sink's own lock. Errors and panics are contained by the
/// logger and never reach other sinks.
pub trait Sink: Send + Sync {
    fn write(&self, entry: &LogEntry) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// A sink with an optional minimum level. `None` accepts every level.
#[derive(Clone)]
pub struct OutputChannel {
    pub sink: Arc<dyn Sink>,
    pub min_level: Option<LogLevel>,
}

impl OutputChannel {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink,
            min_level: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    /// True when entries of `level` pass this channel's threshold.
    #[inline]
    pub fn accepts(&self, level: LogLevel) -> bool {
        level.rank() >= LogLevel::severity(self.min_level)
    }
}

impl fmt::Debug for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputChannel")
            .field("sink", &self.sink.name())
            .field("min_level", &self.min_level)
            .finish()
    }
}

/// Identity of a shared sink, ignoring vtable metadata.
#[inline]
pub(crate) fn same_sink(a: &Arc<dyn Sink>, b: &Arc<dyn Sink>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}
