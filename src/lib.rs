//! safelog - cycle-safe serialization and crash-proof diagnostic logging
//!
//! safelog renders arbitrary, possibly self-referential value graphs to text
//! and logs them without ever failing.
//!
//! # Quick Start
//!
//! ```
//! use safelog::{safe_stringify_with_indent, Object, Value};
//!
//! let fine = Object::from_entries([("plate", "KA-01"), ("amount", "150")]);
//! fine.set("self", fine.clone());
//!
//! let text = safe_stringify_with_indent(&Value::Object(fine.clone()), 0);
//! assert_eq!(
//!     text,
//!     r#"{"plate":"KA-01","amount":"150","self":"[Circular Reference]"}"#
//! );
//! fine.clear();
//! ```
//!
//! # Architecture
//!
//! - `safelog-core`: value model, faults, options and `safelog.toml`
//! - `safelog-stringify`: the three-tier serializer
//! - `safelog-logging`: sinks and the `SafeLogger` adapters

pub use safelog_core::*;
pub use safelog_logging::{
    safe_error_log, safe_log, Channel, ConsoleSink, MemorySink, Record, Render, SafeLogger, Sink,
    TracingSink,
};
pub use safelog_stringify::{
    coerce, safe_stringify, safe_stringify_with_indent, Outcome, Rendering, Stringifier,
};
