//! Output channel registry
//!
//! Holds `(sink, min_level)` pairs and answers which sinks receive an entry
//! of a given level. Answers are memoized per level; registering a sink
//! clears the memo. Both live behind one lock, so a lookup never sees a new
//! channel together with a stale memo.

use super::log_level::LogLevel;
use super::sink::{same_sink, OutputChannel, Sink};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Sinks matching one level, in registration order.
pub type SinkList = Arc<[Arc<dyn Sink>]>;

#[derive(Default)]
struct RegistryState {
    outputs: Vec<OutputChannel>,
    by_level: HashMap<LogLevel, SinkList>,
}

#[derive(Default)]
pub struct OutputRegistry {
    state: RwLock<RegistryState>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_channels<I: IntoIterator<Item = OutputChannel>>(channels: I) -> Self {
        let registry = Self::new();
        for channel in channels {
            registry.add_channel(channel);
        }
        registry
    }

    /// Register `sink`, or replace the threshold of an already registered one.
    ///
    /// A re-registered sink keeps its original position.
    pub fn add(&self, sink: Arc<dyn Sink>, min_level: Option<LogLevel>) -> &Self {
        let mut state = self.state.write();

        match state.outputs.iter_mut().find(|c| same_sink(&c.sink, &sink)) {
            Some(existing) => existing.min_level = min_level,
            None => state.outputs.push(OutputChannel { sink, min_level }),
        }
        state.by_level.clear();
        self
    }

    pub fn add_channel(&self, channel: OutputChannel) -> &Self {
        self.add(channel.sink, channel.min_level)
    }

    /// Sinks whose threshold is at or below `level`.
    pub fn by_level(&self, level: LogLevel) -> SinkList {
        {
            let state = self.state.read();
            if let Some(cached) = state.by_level.get(&level) {
                return Arc::clone(cached);
            }
        }

        let mut state = self.state.write();
        if let Some(cached) = state.by_level.get(&level) {
            return Arc::clone(cached);
        }

        let sinks: SinkList = state
            .outputs
            .iter()
            .filter(|channel| channel.accepts(level))
            .map(|channel| Arc::clone(&channel.sink))
            .collect();
        state.by_level.insert(level, Arc::clone(&sinks));
        sinks
    }

    /// Sinks accepting the least severe level.
    pub fn all(&self) -> SinkList {
        self.by_level(LogLevel::Debug)
    }

    /// Registered channels, in registration order.
    pub fn channels(&self) -> Vec<OutputChannel> {
        self.state.read().outputs.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().outputs.is_empty()
    }
}

impl fmt::Debug for OutputRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputRegistry")
            .field("outputs", &self.state.read().outputs)
            .finish()
    }
}
