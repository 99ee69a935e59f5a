//! JSON stringification of payload values

use crate::core::error_payload::stringify_error;
use crate::core::{LogMessage, Payload, Translator};
use serde_json::Value;

/// Turns every payload value into its JSON text.
///
/// Errors are rendered with their full filtered stack first, so they do not
/// collapse to `{}`. A value that cannot be serialized becomes `Undefined`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStringifyTranslator;

impl JsonStringifyTranslator {
    fn stringify(item: Payload) -> Payload {
        let json = match item {
            Payload::Error(error) => serde_json::to_string(&stringify_error(&error, None)),
            Payload::Value(value) => serde_json::to_string(&value),
            Payload::Undefined => return Payload::Undefined,
        };
        json.map(|text| Payload::Value(Value::String(text)))
            .unwrap_or(Payload::Undefined)
    }
}

impl Translator for JsonStringifyTranslator {
    fn map(&self, message: LogMessage) -> LogMessage {
        LogMessage {
            message: message.message,
            payload: message.payload.into_iter().map(Self::stringify).collect(),
        }
    }
}
