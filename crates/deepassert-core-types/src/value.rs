//! Comparable value model
//!
//! `Value` is a closed enum over everything the comparators understand:
//! primitives, ordered sequences (arrays and numeric buffers) and keyed
//! structures. Structures keep their fields in a `BTreeMap`, so declaration
//! order never influences a comparison.

use crate::buffer::NumericBuffer;
use crate::path::is_identifier;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Any comparable datum
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Array(Vec<Value>),
    Buffer(NumericBuffer),
    Struct(Structure),
}

impl Value {
    /// Strict equality
    ///
    /// Primitives compare by value (`NaN` is never strictly equal to
    /// anything, `0.0` equals `-0.0`). Containers are strictly equal only
    /// when they are the same instance.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => std::ptr::eq(self, other),
        }
    }

    /// Identity check used to short-circuit deep comparison
    ///
    /// True when both operands are the same instance or strictly equal.
    pub fn is_identical(&self, other: &Value) -> bool {
        std::ptr::eq(self, other) || self.strict_equals(other)
    }

    /// Length of an array or numeric buffer, `None` for everything else
    pub fn sequence_len(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.len()),
            Value::Buffer(buffer) => Some(buffer.len()),
            _ => None,
        }
    }

    /// Element of an array (borrowed) or numeric buffer (materialised)
    pub fn element(&self, index: usize) -> Option<Cow<'_, Value>> {
        match self {
            Value::Array(items) => items.get(index).map(Cow::Borrowed),
            Value::Buffer(buffer) => buffer.get(index).map(Cow::Owned),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Structure> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }
}

/// Keyed structure with an optional type name
///
/// A structure without a type name is a plain keyed structure. Two
/// structures share a type only when their type names match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    type_name: Option<String>,
    fields: BTreeMap<String, Value>,
}

impl Structure {
    /// Create an empty plain structure
    pub fn plain() -> Self {
        Self::default()
    }

    /// Create an empty structure of a named type
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            fields: BTreeMap::new(),
        }
    }

    /// Add a field (builder style)
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Type name, `None` for plain structures
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Own keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Structure {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            type_name: None,
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Render a number the way diagnostic messages expect
///
/// Integral values print without a fractional part, very small and very
/// large magnitudes use exponent notation (`1e-15`, `1e+21`), and the
/// non-finite values print as `NaN`, `Infinity` and `-Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let rendered = format!("{:e}", n);
        return match rendered.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => rendered,
        };
    }
    format!("{}", n)
}

fn quote(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n");
    format!("'{}'", escaped)
}

fn write_items<I, T>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    let rendered: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    if rendered.is_empty() {
        write!(f, "[]")
    } else {
        write!(f, "[ {} ]", rendered.join(", "))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::BigInt(n) => write!(f, "{}n", n),
            Value::String(s) => write!(f, "{}", quote(s)),
            Value::Array(items) => write_items(f, items),
            Value::Buffer(buffer) => {
                write!(f, "{}({}) ", buffer.kind(), buffer.len())?;
                write_items(f, buffer.iter())
            }
            Value::Struct(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.type_name {
            write!(f, "{} ", name)?;
        }
        if self.fields.is_empty() {
            return write!(f, "{{}}");
        }
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| {
                if is_identifier(k) {
                    format!("{}: {}", k, v)
                } else {
                    format!("{}: {}", quote(k), v)
                }
            })
            .collect();
        write!(f, "{{ {} }}", fields.join(", "))
    }
}

// ========== Conversions ==========

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::BigInt(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

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

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<NumericBuffer> for Value {
    fn from(buffer: NumericBuffer) -> Self {
        Value::Buffer(buffer)
    }
}

impl From<Structure> for Value {
    fn from(s: Structure) -> Self {
        Value::Struct(s)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Struct(map.into_iter().collect()),
        }
    }
}
