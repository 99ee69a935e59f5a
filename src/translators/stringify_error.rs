//! Error stack stringification

use crate::core::error_payload::stringify_error;
use crate::core::{LogMessage, Payload, Translator};
use serde_json::Value;

/// Replaces every error payload with its text form.
///
/// `trim` of `Some(0)` keeps only `"{name}: {message}"`; `None` keeps the
/// whole filtered stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackTranslator {
    trim: Option<usize>,
}

impl StackTranslator {
    pub fn new(trim: Option<usize>) -> Self {
        Self { trim }
    }
}

impl Translator for StackTranslator {
    fn map(&self, message: LogMessage) -> LogMessage {
        let payload = message
            .payload
            .into_iter()
            .map(|item| match item {
                Payload::Error(error) => Payload::Value(Value::String(stringify_error(&error, self.trim))),
                other => other,
            })
            .collect();

        LogMessage {
            message: message.message,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorPayload;
    use serde_json::json;

    #[test]
    fn test_hidden_stack() {
        let input = LogMessage::new(
            "failed",
            vec![Payload::Value(json!(1)), Payload::Error(ErrorPayload::new("Error", "Oops"))],
        );

        let output = StackTranslator::new(Some(0)).map(input);
        assert_eq!(
            output.payload,
            vec![Payload::Value(json!(1)), Payload::Value(json!("Error: Oops"))]
        );
        assert!(!output.has_error_payload());
    }

    #[test]
    fn test_trimmed_stack() {
        let input = LogMessage::new("", vec![Payload::Error(ErrorPayload::new("TypeError", "bad"))]);
        let output = StackTranslator::new(Some(1)).map(input);
        assert_eq!(output.payload[0].as_str(), Some("TypeError: bad"));
    }
}
