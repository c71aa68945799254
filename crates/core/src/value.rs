//! Value graph for safelog
//!
//! This module defines:
//! - Value: Sum type over scalars, sequences, keyed mappings, errors and host values
//! - Array / Object: Shared, mutable composites that may reference themselves
//! - ErrorObject: Error-shaped composite (name, message, stack, enumerable fields)
//! - HostValue / HostRef: Caller-defined values whose accessors may fail
//! - Identity: Reference identity of a composite
//!
//! ## Reference semantics
//!
//! Composite handles are `Arc`-backed. Cloning a `Value::Object` clones the
//! handle, not the mapping, so `obj.set("self", obj.clone().into())` builds a
//! genuine cycle. Such cycles are not reclaimed until broken with `clear()`.
//!
//! ## Equality
//!
//! Scalars compare by value with the same rules as JSON data: `Int(1) !=
//! Float(1.0)`, `NaN != NaN`. Composites compare by identity. Two objects with
//! the same contents are different values.

use parking_lot::{RwLock, RwLockReadGuard};
use std::fmt;
use std::sync::Arc;

use crate::error::Fault;

/// Reference identity of a composite value (its allocation address)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    /// Identity of the allocation behind an `Arc`
    pub fn of<T: ?Sized>(arc: &Arc<T>) -> Self {
        Identity(Arc::as_ptr(arc) as *const () as usize)
    }

    /// Raw address
    pub fn addr(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

// ============================================================================
// Array
// ============================================================================

/// Shared, ordered sequence of values
#[derive(Clone, Default)]
pub struct Array(Arc<RwLock<Vec<Value>>>);

impl Array {
    /// Create an empty array
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an array holding `items`
    pub fn from_vec(items: Vec<Value>) -> Self {
        Array(Arc::new(RwLock::new(items)))
    }

    /// Reference identity
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    /// True if both handles point at the same array
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Append a value
    pub fn push(&self, value: impl Into<Value>) {
        self.0.write().push(value.into());
    }

    /// Element at `index` (a handle clone for composites)
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    /// Replace the element at `index`. Returns false if out of bounds.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> bool {
        match self.0.write().get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    /// True if the array has no elements
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Drop every element (breaks cycles through this array)
    pub fn clear(&self) {
        self.0.write().clear();
    }

    /// Read guard over the elements
    pub fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.0.read()
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Some(items) => write!(f, "Array({}, len={})", self.identity(), items.len()),
            None => write!(f, "Array({}, locked)", self.identity()),
        }
    }
}

// ============================================================================
// Object
// ============================================================================

/// Shared mapping from string keys to values, in insertion order
#[derive(Clone, Default)]
pub struct Object(Arc<RwLock<Vec<(String, Value)>>>);

impl Object {
    /// Create an empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an object from `(key, value)` pairs; later duplicates replace
    /// earlier ones in place
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let obj = Object::new();
        for (k, v) in entries {
            obj.set(k, v);
        }
        obj
    }

    /// Reference identity
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    /// True if both handles point at the same object
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Insert or replace `key`. Replacing keeps the key's original position.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.0.write();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => entries.push((key, value)),
        }
    }

    /// Value under `key` (a handle clone for composites)
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0
            .read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Remove `key`, returning its value
    pub fn remove(&self, key: &str) -> Option<Value> {
        let mut entries = self.0.write();
        let pos = entries.iter().position(|(k, _)| k == key)?;
        Some(entries.remove(pos).1)
    }

    /// True if `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().iter().any(|(k, _)| k == key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.0.read().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    /// True if the object has no entries
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Drop every entry (breaks cycles through this object)
    pub fn clear(&self) {
        self.0.write().clear();
    }

    /// Read guard over the entries
    pub fn read(&self) -> RwLockReadGuard<'_, Vec<(String, Value)>> {
        self.0.read()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Some(entries) => write!(f, "Object({}, len={})", self.identity(), entries.len()),
            None => write!(f, "Object({}, locked)", self.identity()),
        }
    }
}

// ============================================================================
// ErrorObject
// ============================================================================

struct ErrorData {
    name: String,
    message: String,
    stack: Option<String>,
    fields: Object,
}

/// Error-shaped value
///
/// `name`, `message` and `stack` are fixed at construction. `fields` holds
/// extra enumerable properties (for example `cause` or `code`) and may be
/// mutated, including to point back at the error itself.
#[derive(Clone)]
pub struct ErrorObject(Arc<ErrorData>);

impl ErrorObject {
    /// Error with the given name and message
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_stack(name, message, None)
    }

    /// Error with an explicit stack trace
    pub fn with_stack(
        name: impl Into<String>,
        message: impl Into<String>,
        stack: Option<String>,
    ) -> Self {
        ErrorObject(Arc::new(ErrorData {
            name: name.into(),
            message: message.into(),
            stack,
            fields: Object::new(),
        }))
    }

    /// Convert a Rust error. Each `source()` becomes a nested `cause` field.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let obj = ErrorObject::new("Error", err.to_string());
        if let Some(source) = err.source() {
            obj.fields()
                .set("cause", Value::Error(ErrorObject::from_error(source)));
        }
        obj
    }

    /// Reference identity
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    /// Error name, e.g. `TypeError`
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Error message (may be empty)
    pub fn message(&self) -> &str {
        &self.0.message
    }

    /// Stack trace, if captured
    pub fn stack(&self) -> Option<&str> {
        self.0.stack.as_deref()
    }

    /// Extra enumerable properties
    pub fn fields(&self) -> &Object {
        &self.0.fields
    }
}

impl fmt::Debug for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorObject({}: {:?})", self.0.name, self.0.message)
    }
}

// ============================================================================
// Host values
// ============================================================================

/// A caller-defined value that is not plain data
///
/// Any accessor may fail (return a [`Fault`]) or panic; the serializer treats
/// both the same way and falls back to the next tier.
pub trait HostValue: Send + Sync {
    /// Type name used by the default coercion
    fn type_name(&self) -> &str {
        "Object"
    }

    /// Structural projection of this value
    fn to_value(&self) -> Result<Value, Fault>;

    /// Generic textual coercion
    fn coerce(&self) -> Result<String, Fault> {
        Ok(format!("[object {}]", self.type_name()))
    }

    /// Descriptive message, if the value carries one
    fn message(&self) -> Option<String> {
        None
    }
}

/// Shared handle to a [`HostValue`]
#[derive(Clone)]
pub struct HostRef(Arc<dyn HostValue>);

impl HostRef {
    /// Wrap a host value
    pub fn new<H: HostValue + 'static>(host: H) -> Self {
        HostRef(Arc::new(host))
    }

    /// Reference identity
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    /// Borrow the host value
    pub fn get(&self) -> &dyn HostValue {
        &*self.0
    }
}

impl fmt::Debug for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Host({}, {})", self.0.type_name(), self.identity())
    }
}

// ============================================================================
// Value
// ============================================================================

/// Dynamic value supplied by the caller
#[derive(Debug, Clone)]
pub enum Value {
    /// Absence marker
    Undefined,
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Ordered sequence
    Array(Array),
    /// Keyed mapping
    Object(Object),
    /// Error-shaped value
    Error(ErrorObject),
    /// Caller-defined value
    Host(HostRef),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Error(a), Value::Error(b)) => a.identity() == b.identity(),
            (Value::Host(a), Value::Host(b)) => a.identity() == b.identity(),
            _ => false,
        }
    }
}

impl Value {
    /// Fresh empty object
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// Fresh empty array
    pub fn array() -> Self {
        Value::Array(Array::new())
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Error(_) => "Error",
            Value::Host(_) => "Host",
        }
    }

    /// Identity of a composite; `None` for scalars
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Array(a) => Some(a.identity()),
            Value::Object(o) => Some(o.identity()),
            Value::Error(e) => Some(e.identity()),
            Value::Host(h) => Some(h.identity()),
            _ => None,
        }
    }

    /// True for values tracked by identity during traversal
    pub fn is_composite(&self) -> bool {
        self.identity().is_some()
    }

    /// Check if this is the absence marker
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the array handle if this is an Array value
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get the object handle if this is an Object value
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get the error handle if this is an Error value
    pub fn as_error(&self) -> Option<&ErrorObject> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Descriptive message field, if the value has one
    ///
    /// - `Error`: its message, when non-empty
    /// - `Host`: [`HostValue::message`]
    /// - `Object`: a string-valued `message` key
    pub fn message(&self) -> Option<String> {
        match self {
            Value::Error(e) if !e.message().is_empty() => Some(e.message().to_string()),
            Value::Host(h) => h.get().message(),
            Value::Object(o) => match o.get("message") {
                Some(Value::String(s)) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(Array::from_vec(a))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<ErrorObject> for Value {
    fn from(e: ErrorObject) -> Self {
        Value::Error(e)
    }
}

impl From<HostRef> for Value {
    fn from(h: HostRef) -> Self {
        Value::Host(h)
    }
}

impl From<&(dyn std::error::Error + 'static)> for Value {
    fn from(err: &(dyn std::error::Error + 'static)) -> Self {
        Value::Error(ErrorObject::from_error(err))
    }
}

// ============================================================================
// serde_json interop for ergonomic JSON construction
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64 range degrades to float
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(Array::from_vec(arr.into_iter().map(Value::from).collect()))
            }
            serde_json::Value::Object(obj) => Value::Object(Object::from_entries(
                obj.into_iter().map(|(k, v)| (k, Value::from(v))),
            )),
        }
    }
}
