//! Crash-proof diagnostic logging for safelog
//!
//! This crate provides:
//! - Sink: Injected output capability (console, tracing, in-memory)
//! - Render: Seam for the value renderer (the serializer by default)
//! - SafeLogger: `log` / `error_log` adapters that never fail
//! - safe_log / safe_error_log: Console shortcuts with default options

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod logger;
pub mod sink;

pub use logger::{Render, SafeLogger};
pub use sink::{Channel, ConsoleSink, MemorySink, Record, Sink, TracingSink};

use safelog_core::Value;

/// Write `prefix` and `value` to standard output
pub fn safe_log(prefix: &str, value: &Value) {
    SafeLogger::console().log(prefix, value);
}

/// Write `prefix` and `value` to standard error
pub fn safe_error_log(prefix: &str, value: &Value) {
    SafeLogger::console().error_log(prefix, value);
}
