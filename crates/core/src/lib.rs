//! Core types for safelog
//!
//! This crate defines the foundational types shared by the serializer and the
//! logger adapters:
//! - Value: Dynamic, possibly self-referential value graph
//! - HostValue: Trait for caller-defined values with fallible accessors
//! - Identity: Reference identity of a composite value
//! - Fault: Serialization-time fault taxonomy (always absorbed)
//! - Error: Configuration error type
//! - StringifyOptions / SafeLogConfig: Tunables and the `safelog.toml` file

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod options;
pub mod value;

pub use config::{SafeLogConfig, SinkKind, CONFIG_FILE_NAME};
pub use error::{Error, Fault, Result};
pub use options::{
    CyclePolicy, StringifyOptions, CIRCULAR_SENTINEL, DEFAULT_INDENT, DEFAULT_MAX_DEPTH,
    MAX_INDENT, UNKNOWN_ERROR_SENTINEL, UNKNOWN_OBJECT_SENTINEL, UNSERIALIZABLE_SENTINEL,
};
pub use value::{Array, ErrorObject, HostRef, HostValue, Identity, Object, Value};
