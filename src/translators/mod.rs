//! Translator implementations

pub mod json_stringify;
pub mod sanitize_sensitive;
pub mod stringify_error;

pub use json_stringify::JsonStringifyTranslator;
pub use sanitize_sensitive::SanitizeTranslator;
pub use stringify_error::StackTranslator;

pub use crate::core::{IdentityTranslator, LogMessage, Translator};
