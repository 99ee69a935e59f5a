//! Logging macros for ergonomic log calls.
//!
//! Each argument is converted with `LogArg::from`, so strings, contexts,
//! metadata, errors and JSON values can be mixed freely.
//!
//! # Examples
//!
//! ```
//! use rust_tagged_logger::prelude::*;
//! use rust_tagged_logger::{info, error};
//! use serde_json::json;
//!
//! let logger = Logger::builder().no_channels().build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With payload
//! info!(logger, "Listening", json!({"port": 8080}));
//!
//! // With call context
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! error!(logger, LogContext::new().trim_stack(3), "Write failed", LogArg::error(&err));
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_tagged_logger::prelude::*;
/// # let logger = Logger::builder().no_channels().build();
/// use rust_tagged_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        {
            let args: ::std::vec::Vec<$crate::LogArg> = ::std::vec![$($crate::LogArg::from($arg)),*];
            $logger.log($level, args)
        }
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_tagged_logger::prelude::*;
/// # let logger = Logger::builder().no_channels().build();
/// use rust_tagged_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug $(, $arg)*)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_tagged_logger::prelude::*;
/// # let logger = Logger::builder().no_channels().build();
/// use rust_tagged_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info $(, $arg)*)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_tagged_logger::prelude::*;
/// # let logger = Logger::builder().no_channels().build();
/// use rust_tagged_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt", 3);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn $(, $arg)*)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_tagged_logger::prelude::*;
/// # let logger = Logger::builder().no_channels().build();
/// use rust_tagged_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error $(, $arg)*)
    };
}
