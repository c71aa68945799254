//! Structural tier: value graph -> JSON text
//!
//! The walk projects the graph onto `serde_json::Value`, substituting the
//! circular sentinel for repeated identities, then prints it with the
//! requested indentation. Any fault aborts the whole pass.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Number, Value as Json};

use safelog_core::{Array, ErrorObject, Fault, HostRef, Object, StringifyOptions, Value};

use crate::visited::VisitedSet;
use crate::{RED_ZONE, STACK_SEGMENT};

/// Text returned when the root itself is absent
pub const UNDEFINED_TEXT: &str = "undefined";

/// Trees up to this depth are printed on the caller's stack
const SHALLOW_DEPTH: usize = 256;

/// Stack reserved per level when printing deeper trees
const PRINT_FRAME: usize = 2 * 1024;

/// Render `value` as JSON text.
///
/// A root of [`Value::Undefined`] renders as `undefined`.
///
/// # Errors
///
/// Returns the first fault met during the walk.
pub fn render(value: &Value, options: &StringifyOptions) -> Result<String, Fault> {
    let mut walker = Walker::new(options);
    let Some(json) = walker.project(value)? else {
        return Ok(UNDEFINED_TEXT.to_string());
    };

    let indent = options.effective_indent();
    let text = if walker.peak <= SHALLOW_DEPTH {
        write_json(&json, indent)
    } else {
        let stack = STACK_SEGMENT.saturating_add(walker.peak.saturating_mul(PRINT_FRAME));
        stacker::grow(stack, || write_json(&json, indent))
    };
    dispose(json);
    text
}

/// Project `value` onto a JSON tree. `None` means the root is absent.
///
/// # Errors
///
/// Returns the first fault met during the walk.
pub fn project(value: &Value, options: &StringifyOptions) -> Result<Option<Json>, Fault> {
    Walker::new(options).project(value)
}

/// Print a JSON tree; `indent == 0` gives compact output
fn write_json(json: &Json, indent: usize) -> Result<String, Fault> {
    if indent == 0 {
        return Ok(serde_json::to_string(json)?);
    }
    let pad = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&pad));
    json.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| Fault::Encoding(e.to_string()))
}

/// Drop a JSON tree iteratively, whatever its depth
fn dispose(json: Json) {
    let mut pending = vec![json];
    while let Some(node) = pending.pop() {
        match node {
            Json::Array(items) => pending.extend(items),
            Json::Object(map) => pending.extend(map.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}

struct Walker<'a> {
    options: &'a StringifyOptions,
    visited: VisitedSet,
    depth: usize,
    /// Deepest level entered so far
    peak: usize,
    /// Host projections; kept until the pass ends so no visited address is
    /// freed and handed to another composite
    held: Vec<Value>,
}

impl<'a> Walker<'a> {
    fn new(options: &'a StringifyOptions) -> Self {
        Self {
            options,
            visited: VisitedSet::new(options.cycle_policy),
            depth: 0,
            peak: 0,
            held: Vec::new(),
        }
    }

    fn project(&mut self, value: &Value) -> Result<Option<Json>, Fault> {
        let json = match value {
            Value::Undefined => return Ok(None),
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => self.float(*f)?,
            Value::String(s) => Json::String(s.clone()),
            Value::Bytes(b) => Json::String(BASE64.encode(b)),
            Value::Array(_) | Value::Object(_) | Value::Error(_) | Value::Host(_) => {
                return self.composite(value)
            }
        };
        Ok(Some(json))
    }

    fn float(&self, f: f64) -> Result<Json, Fault> {
        match Number::from_f64(f) {
            Some(n) => Ok(Json::Number(n)),
            None if self.options.non_finite_as_null => Ok(Json::Null),
            None => Err(Fault::NonFinite(f)),
        }
    }

    fn composite(&mut self, value: &Value) -> Result<Option<Json>, Fault> {
        let Some(id) = value.identity() else {
            return self.project(value);
        };
        if !self.visited.enter(id) {
            return Ok(Some(Json::String(self.options.circular_sentinel.clone())));
        }
        if self.depth >= self.options.max_depth {
            return Err(Fault::DepthExceeded {
                limit: self.options.max_depth,
            });
        }

        self.depth += 1;
        self.peak = self.peak.max(self.depth);
        let result = stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || self.children(value));
        self.depth -= 1;
        self.visited.leave(id);
        result
    }

    fn children(&mut self, value: &Value) -> Result<Option<Json>, Fault> {
        match value {
            Value::Array(a) => self.array(a).map(Some),
            Value::Object(o) => self.object(o).map(|m| Some(Json::Object(m))),
            Value::Error(e) => self.error(e).map(|m| Some(Json::Object(m))),
            Value::Host(h) => self.host(h),
            _ => self.project(value),
        }
    }

    fn array(&mut self, array: &Array) -> Result<Json, Fault> {
        let items = array.read();
        let mut out = Vec::with_capacity(items.len());
        for item in items.iter() {
            match self.project(item) {
                // Absent elements keep their slot as null
                Ok(json) => out.push(json.unwrap_or(Json::Null)),
                Err(fault) => {
                    dispose(Json::Array(out));
                    return Err(fault);
                }
            }
        }
        Ok(Json::Array(out))
    }

    fn object(&mut self, object: &Object) -> Result<Map<String, Json>, Fault> {
        let entries = object.read();
        let mut map = Map::with_capacity(entries.len());
        self.entries_into(&entries, &mut map)?;
        Ok(map)
    }

    fn error(&mut self, error: &ErrorObject) -> Result<Map<String, Json>, Fault> {
        let mut map = Map::new();
        map.insert("name".to_string(), Json::String(error.name().to_string()));
        map.insert(
            "message".to_string(),
            Json::String(error.message().to_string()),
        );
        if let Some(stack) = error.stack() {
            map.insert("stack".to_string(), Json::String(stack.to_string()));
        }
        let fields = error.fields().read();
        self.entries_into(&fields, &mut map)?;
        Ok(map)
    }

    fn host(&mut self, host: &HostRef) -> Result<Option<Json>, Fault> {
        let projected = host.get().to_value()?;
        self.held.push(projected.clone());
        self.project(&projected)
    }

    fn entries_into(
        &mut self,
        entries: &[(String, Value)],
        map: &mut Map<String, Json>,
    ) -> Result<(), Fault> {
        for (key, value) in entries {
            match self.project(value) {
                Ok(Some(json)) => {
                    map.insert(key.clone(), json);
                }
                // Absent values drop their key
                Ok(None) => {}
                Err(fault) => {
                    dispose(Json::Object(std::mem::take(map)));
                    return Err(fault);
                }
            }
        }
        Ok(())
    }
}
