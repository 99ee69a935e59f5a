//! Log call arguments
//!
//! Log methods accept a sequence of [`LogArg`]s. The first argument decides
//! the call shape ([`CallShape`]): a text argument is the message, a
//! [`LogContext`] is consumed as call configuration and the message follows
//! it. Whatever remains is payload, except signed metadata ([`LogMeta`]),
//! which is pulled out and merged into the entry metadata.

use super::error_payload::ErrorPayload;
use super::log_context::LogContext;
use super::log_meta::LogMeta;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt;

/// One argument of a log call.
#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    Text(String),
    Context(LogContext),
    Meta(LogMeta),
    Error(ErrorPayload),
    Value(Value),
    /// A value that could not be represented
    Undefined,
}

impl LogArg {
    /// Capture an error as an argument.
    pub fn error<E: StdError + ?Sized>(error: &E) -> Self {
        LogArg::Error(ErrorPayload::from_error(error))
    }

    /// Serialize arbitrary data; unrepresentable data becomes `Undefined`.
    pub fn json<T: Serialize + ?Sized>(data: &T) -> Self {
        serde_json::to_value(data)
            .map(LogArg::Value)
            .unwrap_or(LogArg::Undefined)
    }

    /// True for signed metadata.
    #[inline]
    pub fn is_signed(&self) -> bool {
        matches!(self, LogArg::Meta(_))
    }
}

impl From<&str> for LogArg {
    fn from(text: &str) -> Self {
        LogArg::Text(text.to_string())
    }
}

impl From<String> for LogArg {
    fn from(text: String) -> Self {
        LogArg::Text(text)
    }
}

impl From<&String> for LogArg {
    fn from(text: &String) -> Self {
        LogArg::Text(text.clone())
    }
}

impl From<LogContext> for LogArg {
    fn from(context: LogContext) -> Self {
        LogArg::Context(context)
    }
}

impl From<LogMeta> for LogArg {
    fn from(meta: LogMeta) -> Self {
        LogArg::Meta(meta)
    }
}

impl From<ErrorPayload> for LogArg {
    fn from(error: ErrorPayload) -> Self {
        LogArg::Error(error)
    }
}

impl From<Value> for LogArg {
    fn from(value: Value) -> Self {
        LogArg::Value(value)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogArg {
                fn from(value: $ty) -> Self {
                    LogArg::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i32, i64, u32, u64, usize, f64);

/// Payload element of a log entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Error(ErrorPayload),
    Value(Value),
    /// Serializes as `null`
    Undefined,
}

impl Payload {
    pub fn is_error(&self) -> bool {
        matches!(self, Payload::Error(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Payload::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }
}

impl From<LogArg> for Payload {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::Text(text) => Payload::Value(Value::String(text)),
            LogArg::Value(value) => Payload::Value(value),
            LogArg::Error(error) => Payload::Error(error),
            LogArg::Context(context) => serde_json::to_value(context)
                .map(Payload::Value)
                .unwrap_or(Payload::Undefined),
            LogArg::Meta(meta) => Payload::Value(Value::Object(meta.fields().clone())),
            LogArg::Undefined => Payload::Undefined,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Value(value)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Value(Value::String(text)) => f.write_str(text),
            Payload::Value(value) => write!(f, "{}", value),
            Payload::Error(error) => write!(f, "{}", error),
            Payload::Undefined => f.write_str("undefined"),
        }
    }
}

/// Shape of a log call, decided by its first argument.
#[derive(Debug, Clone, PartialEq)]
pub enum CallShape {
    Plain {
        message: String,
        rest: Vec<LogArg>,
    },
    Contextual {
        context: LogContext,
        message: String,
        rest: Vec<LogArg>,
    },
}

impl CallShape {
    /// Classify call arguments.
    ///
    /// Never fails: a missing message is the empty string.
    pub fn parse<I: IntoIterator<Item = LogArg>>(args: I) -> Self {
        let mut args: VecDeque<LogArg> = args.into_iter().collect();

        match args.pop_front() {
            Some(LogArg::Text(message)) => CallShape::Plain {
                message,
                rest: args.into(),
            },
            Some(LogArg::Context(context)) => {
                let message = take_message(&mut args);
                CallShape::Contextual {
                    context,
                    message,
                    rest: args.into(),
                }
            }
            Some(other) => {
                args.push_front(other);
                CallShape::Plain {
                    message: String::new(),
                    rest: args.into(),
                }
            }
            None => CallShape::Plain {
                message: String::new(),
                rest: Vec::new(),
            },
        }
    }

    pub fn context(&self) -> Option<&LogContext> {
        match self {
            CallShape::Plain { .. } => None,
            CallShape::Contextual { context, .. } => Some(context),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CallShape::Plain { message, .. } | CallShape::Contextual { message, .. } => message,
        }
    }

    pub fn into_parts(self) -> (Option<LogContext>, String, Vec<LogArg>) {
        match self {
            CallShape::Plain { message, rest } => (None, message, rest),
            CallShape::Contextual {
                context,
                message,
                rest,
            } => (Some(context), message, rest),
        }
    }
}

fn take_message(args: &mut VecDeque<LogArg>) -> String {
    if let Some(LogArg::Text(_)) = args.front() {
        if let Some(LogArg::Text(message)) = args.pop_front() {
            return message;
        }
    }
    String::new()
}

/// Split residual arguments into merged call metadata and ordered payload.
///
/// Every signed metadata argument is removed; they merge left to right.
pub fn split_payload(rest: Vec<LogArg>) -> (LogMeta, Vec<Payload>) {
    let mut meta = LogMeta::empty();
    let mut payload = Vec::with_capacity(rest.len());

    for arg in rest {
        match arg {
            LogArg::Meta(call_meta) => meta = LogMeta::merge(&meta, &call_meta),
            other => payload.push(Payload::from(other)),
        }
    }
    (meta, payload)
}
