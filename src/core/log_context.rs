//! Per-call context
//!
//! A `LogContext` passed as the first call argument tunes how that single
//! call is processed: extra tags, stack behaviour, sanitization and JSON
//! stringification. It is consumed by the logger and never reaches a sink.

use serde::{Deserialize, Serialize};

/// Sanitization request of a single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sanitize {
    /// `true` uses the logger's sensitive field list, `false` disables.
    Enabled(bool),
    /// Explicit sensitive field patterns for this call.
    Fields(Vec<String>),
}

/// Context for a single log call
///
/// # Example
///
/// ```
/// use rust_tagged_logger::core::LogContext;
///
/// let ctx = LogContext::new()
///     .tag("auth")
///     .sanitize_fields(["password", "sessionId"])
///     .trim_stack(5);
///
/// assert!(ctx.wants_sanitize());
/// assert_eq!(ctx.trim_limit(), Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogContext {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    with_stack: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trim_stack: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sanitize: Option<Sanitize>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stringify: bool,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag for this call
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add several tags for this call
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// `true` forces a synthetic stack when no error is logged,
    /// `false` hides error stacks.
    #[must_use]
    pub fn with_stack(mut self, enabled: bool) -> Self {
        self.with_stack = Some(enabled);
        self
    }

    /// Cut stacks to `lines` lines
    #[must_use]
    pub fn trim_stack(mut self, lines: usize) -> Self {
        self.trim_stack = Some(lines);
        self
    }

    /// Mask the logger's configured sensitive fields
    #[must_use]
    pub fn sanitize(mut self) -> Self {
        self.sanitize = Some(Sanitize::Enabled(true));
        self
    }

    /// Mask the given sensitive field patterns
    #[must_use]
    pub fn sanitize_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sanitize = Some(Sanitize::Fields(
            fields.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// JSON-stringify every payload value
    #[must_use]
    pub fn stringify(mut self) -> Self {
        self.stringify = true;
        self
    }

    pub fn tag_list(&self) -> &[String] {
        &self.tags
    }

    pub fn stack_request(&self) -> Option<bool> {
        self.with_stack
    }

    pub fn trim_limit(&self) -> Option<usize> {
        self.trim_stack
    }

    pub fn sanitize_request(&self) -> Option<&Sanitize> {
        self.sanitize.as_ref()
    }

    pub fn wants_sanitize(&self) -> bool {
        match &self.sanitize {
            Some(Sanitize::Enabled(enabled)) => *enabled,
            Some(Sanitize::Fields(_)) => true,
            None => false,
        }
    }

    pub fn wants_stringify(&self) -> bool {
        self.stringify
    }

    /// Stacks were explicitly switched off for this call
    pub fn stack_disabled(&self) -> bool {
        self.stack_request() == Some(false)
    }

    /// A synthetic stack was explicitly requested
    pub fn stack_forced(&self) -> bool {
        self.stack_request() == Some(true)
    }
}
