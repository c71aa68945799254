//! Cycle-safe serializer for safelog
//!
//! Renders any [`Value`] graph to text. Rendering always terminates and never
//! fails:
//! - Structural JSON, with `"[Circular Reference]"` substituted for any
//!   composite already visited in the current pass
//! - Generic textual coercion when the structural walk faults
//! - `"[Unserializable Object]"` when coercion faults too
//!
//! # Example
//!
//! ```
//! use safelog_core::{Object, Value};
//! use safelog_stringify::safe_stringify_with_indent;
//!
//! let user = Object::from_entries([("name", "Ada")]);
//! user.set("self", user.clone());
//!
//! let text = safe_stringify_with_indent(&Value::Object(user.clone()), 0);
//! assert_eq!(text, r#"{"name":"Ada","self":"[Circular Reference]"}"#);
//! user.clear();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coerce;
pub mod stringifier;
pub mod structural;
pub mod visited;

pub use coerce::{coerce, format_number};
pub use stringifier::{catch_fault, is_quiet, Outcome, Rendering, Stringifier};
pub use visited::VisitedSet;

use safelog_core::Value;

/// Remaining stack below which a walk continues on a fresh segment
pub(crate) const RED_ZONE: usize = 64 * 1024;

/// Size of each fresh stack segment
pub(crate) const STACK_SEGMENT: usize = 1024 * 1024;

/// Render `value` with two-space indentation
pub fn safe_stringify(value: &Value) -> String {
    Stringifier::default().stringify(value)
}

/// Render `value` with `indent` spaces per level (0 = compact, max 10)
pub fn safe_stringify_with_indent(value: &Value, indent: usize) -> String {
    Stringifier::with_indent(indent).stringify(value)
}
