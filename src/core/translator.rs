//! Translator trait for message/payload transformations

use super::log_arg::Payload;

/// Message text and payload as they travel through the translators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogMessage {
    pub message: String,
    pub payload: Vec<Payload>,
}

impl LogMessage {
    pub fn new(message: impl Into<String>, payload: Vec<Payload>) -> Self {
        Self {
            message: message.into(),
            payload,
        }
    }

    pub fn has_error_payload(&self) -> bool {
        self.payload.iter().any(Payload::is_error)
    }
}

/// Mapping layer applied before an entry is built.
///
/// Translators carry their own parameters (sensitive fields, stack depth)
/// and must be pure: the same input gives the same output.
pub trait Translator: Send + Sync {
    fn map(&self, message: LogMessage) -> LogMessage;
}

impl<F> Translator for F
where
    F: Fn(LogMessage) -> LogMessage + Send + Sync,
{
    fn map(&self, message: LogMessage) -> LogMessage {
        self(message)
    }
}

/// Leaves messages untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn map(&self, message: LogMessage) -> LogMessage {
        message
    }
}
