//! Output sinks
//!
//! A sink accepts one finished line per call. Sinks never fail: a write the
//! channel cannot take is dropped.

use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Diagnostic channel a record is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Standard output / informational
    Standard,
    /// Standard error / error
    Error,
}

/// Destination for log records
pub trait Sink: Send + Sync {
    /// Write one line to `channel`
    fn emit(&self, channel: Channel, line: &str);
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn emit(&self, channel: Channel, line: &str) {
        (**self).emit(channel, line)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn emit(&self, channel: Channel, line: &str) {
        (**self).emit(channel, line)
    }
}

impl<S: Sink + ?Sized> Sink for &S {
    fn emit(&self, channel: Channel, line: &str) {
        (**self).emit(channel, line)
    }
}

/// Writes `Standard` to stdout and `Error` to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn emit(&self, channel: Channel, line: &str) {
        // The channel is assumed available; a failed write is dropped
        let _ = match channel {
            Channel::Standard => writeln!(std::io::stdout().lock(), "{}", line),
            Channel::Error => writeln!(std::io::stderr().lock(), "{}", line),
        };
    }
}

/// Forwards records as `tracing` events under target `safelog`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&self, channel: Channel, line: &str) {
        match channel {
            Channel::Standard => tracing::info!(target: "safelog", "{}", line),
            Channel::Error => tracing::error!(target: "safelog", "{}", line),
        }
    }
}

/// A captured record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Channel written to
    pub channel: Channel,
    /// Full line, prefix included
    pub line: String,
}

/// Keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all records so far
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Lines written to `channel`
    pub fn lines(&self, channel: Channel) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.channel == channel)
            .map(|r| r.line.clone())
            .collect()
    }

    /// Drain and return all records
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl Sink for MemorySink {
    fn emit(&self, channel: Channel, line: &str) {
        self.records.lock().push(Record {
            channel,
            line: line.to_string(),
        });
    }
}
