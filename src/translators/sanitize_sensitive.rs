//! Sensitive field sanitization
//!
//! Sanitizing walks every payload value, so it only runs for calls that ask
//! for it.

use crate::core::sanitize::{sanitize_with_mask, SensitiveFields, DEFAULT_MASK};
use crate::core::{LogMessage, Payload, Translator};

/// Masks sensitive fields in every payload value. Errors are left alone.
#[derive(Debug, Clone)]
pub struct SanitizeTranslator {
    fields: SensitiveFields,
    mask: String,
}

impl SanitizeTranslator {
    pub fn new(fields: SensitiveFields) -> Self {
        Self {
            fields,
            mask: DEFAULT_MASK.to_string(),
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = mask.into();
        self
    }
}

impl Default for SanitizeTranslator {
    fn default() -> Self {
        Self::new(SensitiveFields::defaults())
    }
}

impl Translator for SanitizeTranslator {
    fn map(&self, message: LogMessage) -> LogMessage {
        let payload = message
            .payload
            .into_iter()
            .map(|item| match item {
                Payload::Value(value) => Payload::Value(sanitize_with_mask(&value, &self.fields, &self.mask)),
                other => other,
            })
            .collect();

        LogMessage {
            message: message.message,
            payload,
        }
    }
}
