//! Coercion tier: generic textual conversion
//!
//! Used when the structural tier faults. Only arrays are walked; an array that
//! is already being joined contributes an empty string, so cyclic arrays
//! terminate. Every other composite prints a fixed form.

use safelog_core::{Array, Fault, Identity, Value};

use crate::{RED_ZONE, STACK_SEGMENT};

/// Coerce `value` to text.
///
/// # Errors
///
/// Faults when a host's `coerce` fails or arrays nest deeper than
/// `max_depth`.
pub fn coerce(value: &Value, max_depth: usize) -> Result<String, Fault> {
    Coercer {
        max_depth,
        joining: Vec::new(),
    }
    .coerce(value)
}

/// Format a float the way the coercion tier prints numbers
pub fn format_number(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if f == 0.0 {
        // Covers -0.0
        "0".to_string()
    } else {
        f.to_string()
    }
}

struct Coercer {
    max_depth: usize,
    joining: Vec<Identity>,
}

impl Coercer {
    fn coerce(&mut self, value: &Value) -> Result<String, Fault> {
        Ok(match value {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_number(*f),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            Value::Array(a) => return self.join(a),
            Value::Object(_) => "[object Object]".to_string(),
            Value::Error(e) if e.message().is_empty() => e.name().to_string(),
            Value::Error(e) => format!("{}: {}", e.name(), e.message()),
            Value::Host(h) => return h.get().coerce(),
        })
    }

    fn join(&mut self, array: &Array) -> Result<String, Fault> {
        let id = array.identity();
        if self.joining.contains(&id) {
            return Ok(String::new());
        }
        if self.joining.len() >= self.max_depth {
            return Err(Fault::DepthExceeded {
                limit: self.max_depth,
            });
        }

        self.joining.push(id);
        let joined = stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || self.join_items(array));
        self.joining.pop();
        joined
    }

    fn join_items(&mut self, array: &Array) -> Result<String, Fault> {
        let items = array.read();
        let mut parts = Vec::with_capacity(items.len());
        for item in items.iter() {
            match item {
                Value::Undefined | Value::Null => parts.push(String::new()),
                other => parts.push(self.coerce(other)?),
            }
        }
        Ok(parts.join(","))
    }
}
