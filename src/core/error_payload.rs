//! Error values carried as log payload, and stack text rendering
//!
//! An `ErrorPayload` snapshots an error at the point it is handed to the
//! logger: its short type name, its message, its source chain and a
//! backtrace. Frames that belong to the logger itself are dropped when the
//! stack is rendered.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Frames whose symbol path starts with any of these are logger internals.
const INTERNAL_FRAME_PREFIXES: [&str; 2] = [concat!(env!("CARGO_CRATE_NAME"), "::"), "std::backtrace"];

/// Snapshot of an error passed as a log argument.
///
/// The backtrace is captured unresolved; symbols are only rendered when the
/// full stack is asked for.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub name: String,
    pub message: String,
    /// `"{name}: {message}"` followed by the source chain.
    pub stack: String,
    #[serde(skip)]
    trace: Option<Arc<Backtrace>>,
}

impl ErrorPayload {
    /// Create a payload with an explicit name, capturing the current stack.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let stack = format!("{}: {}", name, message);
        Self {
            name,
            message,
            stack,
            trace: Some(Arc::new(Backtrace::force_capture())),
        }
    }

    /// Snapshot any `std::error::Error`, including its `source()` chain.
    pub fn from_error<E: StdError + ?Sized>(error: &E) -> Self {
        let name = short_type_name(std::any::type_name::<E>());
        let message = error.to_string();

        let mut stack = format!("{}: {}", name, message);
        let mut source = error.source();
        while let Some(cause) = source {
            stack.push_str(&format!("\ncaused by: {}", cause));
            source = cause.source();
        }

        Self {
            name,
            message,
            stack,
            trace: Some(Arc::new(Backtrace::force_capture())),
        }
    }

    /// Payload from already rendered stack text, with no captured frames.
    pub fn with_stack_text(name: impl Into<String>, message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: stack.into(),
            trace: None,
        }
    }

    pub fn has_trace(&self) -> bool {
        self.trace.is_some()
    }

    /// Header, source chain and the rendered frames.
    pub fn full_stack(&self) -> Cow<'_, str> {
        match self.trace {
            Some(ref trace) => Cow::Owned(format!("{}\n{}", self.stack, trace)),
            None => Cow::Borrowed(self.stack.as_str()),
        }
    }
}

impl PartialEq for ErrorPayload {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.message == other.message && self.stack == other.stack
    }
}

impl Eq for ErrorPayload {}

impl Serialize for ErrorPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ErrorPayload", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("stack", self.full_stack().as_ref())?;
        state.end()
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

/// Render an error as text.
///
/// `Some(0)` gives `"{name}: {message}"`. Otherwise the stack without logger
/// frames, cut to `trim` lines when given.
pub fn stringify_error(error: &ErrorPayload, trim: Option<usize>) -> String {
    if trim == Some(0) {
        return error.to_string();
    }
    if let Some(limit) = trim {
        let head = filter_internal_frames(&error.stack);
        if head.len() >= limit {
            return head[..limit].join("\n");
        }
    }
    trim_stack_text(&error.full_stack(), trim)
}

/// Capture a synthetic stack at the caller, headed `Stack:`.
///
/// `Some(0)` gives an empty string.
pub fn create_stack(trim: Option<usize>) -> String {
    if trim == Some(0) {
        return String::new();
    }
    let trace = format!("Stack:\n{}", Backtrace::force_capture());
    trim_stack_text(&trace, trim)
}

fn trim_stack_text(stack: &str, trim: Option<usize>) -> String {
    let lines = filter_internal_frames(stack);
    let limit = trim.unwrap_or(lines.len());
    lines.into_iter().take(limit).collect::<Vec<_>>().join("\n")
}

/// Drop every frame (symbol line and its `at` lines) that belongs to the logger.
fn filter_internal_frames(stack: &str) -> Vec<&str> {
    let mut kept = Vec::new();
    let mut skipping = false;

    for line in stack.lines() {
        if let Some(symbol) = frame_symbol(line) {
            let path = symbol.trim_start_matches('<');
            skipping = INTERNAL_FRAME_PREFIXES
                .iter()
                .any(|prefix| path.starts_with(prefix));
        }
        if !skipping && !line.trim().is_empty() {
            kept.push(line);
        }
    }
    kept
}

/// Symbol of a frame header line such as `  12: symbol::path`.
fn frame_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.trim_start().split_once(':')?;
    if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
        Some(symbol.trim())
    } else {
        None
    }
}

fn short_type_name(full: &str) -> String {
    let base = full.trim_start_matches("dyn ");
    let base = base.split('<').next().unwrap_or(base);
    base.rsplit("::").next().unwrap_or(base).trim().to_string()
}
