//! Sink implementations

pub mod buffer;
pub mod console;

pub use buffer::{BufferSink, DEFAULT_MAX_ENTRIES};
pub use console::ConsoleSink;

pub use crate::core::Sink;
