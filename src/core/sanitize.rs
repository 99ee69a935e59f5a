//! Masking of sensitive fields in payload values

use regex::{Regex, RegexSet, RegexSetBuilder};
use serde_json::Value;
use std::sync::OnceLock;

/// Field patterns masked when a call asks for sanitization.
pub const DEFAULT_SENSITIVE_FIELDS: [&str; 4] = ["password", "token", "secret", "sessionId"];

/// Replacement for masked values.
pub const DEFAULT_MASK: &str = "***";

/// Compiled size limit for the pattern set.
const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Compiled set of sensitive key patterns.
///
/// Patterns are regular expressions matched anywhere in a key, so a plain
/// word matches as a substring. A pattern that is not a valid regex is
/// matched literally. If the set cannot be compiled at all, every pattern
/// is matched as a plain substring.
#[derive(Debug, Clone)]
pub struct SensitiveFields {
    patterns: Vec<String>,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(RegexSet),
    Literal(Vec<String>),
}

impl SensitiveFields {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_size_limit(patterns.into_iter().map(Into::into).collect(), PATTERN_SIZE_LIMIT)
    }

    fn with_size_limit(patterns: Vec<String>, size_limit: usize) -> Self {
        let compiled: Vec<String> = patterns
            .iter()
            .map(|pattern| match Regex::new(pattern) {
                Ok(_) => pattern.clone(),
                Err(_) => regex::escape(pattern),
            })
            .collect();

        let matcher = match RegexSetBuilder::new(&compiled).size_limit(size_limit).build() {
            Ok(set) => Matcher::Regex(set),
            Err(err) => {
                eprintln!(
                    "[LOGGER WARNING] Sensitive field patterns rejected ({}), matching as plain substrings",
                    err
                );
                Matcher::Literal(patterns.clone())
            }
        };

        Self { patterns, matcher }
    }

    /// `password`, `token`, `secret`, `sessionId`
    pub fn defaults() -> Self {
        static DEFAULTS: OnceLock<SensitiveFields> = OnceLock::new();
        DEFAULTS
            .get_or_init(|| SensitiveFields::new(DEFAULT_SENSITIVE_FIELDS))
            .clone()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    #[inline]
    pub fn matches(&self, key: &str) -> bool {
        match self.matcher {
            Matcher::Regex(ref set) => set.is_match(key),
            Matcher::Literal(ref words) => words.iter().any(|word| key.contains(word.as_str())),
        }
    }
}

impl Default for SensitiveFields {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Mask sensitive keys with [`DEFAULT_MASK`], recursing into objects and arrays.
pub fn sanitize(value: &Value, fields: &SensitiveFields) -> Value {
    sanitize_with_mask(value, fields, DEFAULT_MASK)
}

/// Mask sensitive keys with `mask`. Primitives pass through unchanged.
pub fn sanitize_with_mask(value: &Value, fields: &SensitiveFields, mask: &str) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| sanitize_with_mask(item, fields, mask))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, inner)| {
                    let inner = if fields.matches(key) {
                        Value::String(mask.to_string())
                    } else {
                        sanitize_with_mask(inner, fields, mask)
                    };
                    (key.clone(), inner)
                })
                .collect(),
        ),
        primitive => primitive.clone(),
    }
}
