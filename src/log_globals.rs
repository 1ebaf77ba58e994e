//! Global log streams, one per execution context.
//!
//! Each context is the only producer on its stream; the log drain task is the
//! only consumer of both.

use crate::logging::LogStream;

/// Console context (core 1): dispatcher, channel traffic, configuration changes.
pub static CONSOLE_LOG_STREAM: LogStream = LogStream::new();

/// Hardware context (core 0): requests served and their results.
pub static HW_LOG_STREAM: LogStream = LogStream::new();
