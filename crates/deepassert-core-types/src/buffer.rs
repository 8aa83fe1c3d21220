//! Fixed-width numeric buffers
//!
//! A `NumericBuffer` is an ordered sequence whose elements all share one
//! machine representation. The comparison engine treats it like an array,
//! reading elements back as [`Value`]s one index at a time.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Element representation of a numeric buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
}

impl BufferKind {
    /// Display name of the buffer type, used as its type tag
    pub fn name(&self) -> &'static str {
        match self {
            BufferKind::Int8 => "Int8Array",
            BufferKind::Uint8 => "Uint8Array",
            BufferKind::Uint8Clamped => "Uint8ClampedArray",
            BufferKind::Int16 => "Int16Array",
            BufferKind::Uint16 => "Uint16Array",
            BufferKind::Int32 => "Int32Array",
            BufferKind::Uint32 => "Uint32Array",
            BufferKind::Float32 => "Float32Array",
            BufferKind::Float64 => "Float64Array",
            BufferKind::BigInt64 => "BigInt64Array",
            BufferKind::BigUint64 => "BigUint64Array",
        }
    }

    /// Whether elements read back as `Value::BigInt` rather than `Value::Number`
    pub fn is_bigint(&self) -> bool {
        matches!(self, BufferKind::BigInt64 | BufferKind::BigUint64)
    }
}

impl std::fmt::Display for BufferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-width numeric sequence
#[derive(Debug, Clone, PartialEq)]
pub enum NumericBuffer {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    BigInt64(Vec<i64>),
    BigUint64(Vec<u64>),
}

impl NumericBuffer {
    /// Element representation of this buffer
    pub fn kind(&self) -> BufferKind {
        match self {
            NumericBuffer::Int8(_) => BufferKind::Int8,
            NumericBuffer::Uint8(_) => BufferKind::Uint8,
            NumericBuffer::Uint8Clamped(_) => BufferKind::Uint8Clamped,
            NumericBuffer::Int16(_) => BufferKind::Int16,
            NumericBuffer::Uint16(_) => BufferKind::Uint16,
            NumericBuffer::Int32(_) => BufferKind::Int32,
            NumericBuffer::Uint32(_) => BufferKind::Uint32,
            NumericBuffer::Float32(_) => BufferKind::Float32,
            NumericBuffer::Float64(_) => BufferKind::Float64,
            NumericBuffer::BigInt64(_) => BufferKind::BigInt64,
            NumericBuffer::BigUint64(_) => BufferKind::BigUint64,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            NumericBuffer::Int8(v) => v.len(),
            NumericBuffer::Uint8(v) | NumericBuffer::Uint8Clamped(v) => v.len(),
            NumericBuffer::Int16(v) => v.len(),
            NumericBuffer::Uint16(v) => v.len(),
            NumericBuffer::Int32(v) => v.len(),
            NumericBuffer::Uint32(v) => v.len(),
            NumericBuffer::Float32(v) => v.len(),
            NumericBuffer::Float64(v) => v.len(),
            NumericBuffer::BigInt64(v) => v.len(),
            NumericBuffer::BigUint64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the element at `index` as a scalar value
    ///
    /// 64-bit integer kinds produce `Value::BigInt`; every other kind
    /// produces `Value::Number`.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            NumericBuffer::Int8(v) => v.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Uint8(v) | NumericBuffer::Uint8Clamped(v) => {
                v.get(index).map(|n| Value::Number(f64::from(*n)))
            }
            NumericBuffer::Int16(v) => v.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Uint16(v) => v.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Int32(v) => v.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Uint32(v) => v.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Float32(v) => v.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Float64(v) => v.get(index).map(|n| Value::Number(*n)),
            NumericBuffer::BigInt64(v) => v.get(index).map(|n| Value::BigInt(i128::from(*n))),
            NumericBuffer::BigUint64(v) => v.get(index).map(|n| Value::BigInt(i128::from(*n))),
        }
    }

    /// Iterate over all elements as scalar values
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }
}

impl From<Vec<i8>> for NumericBuffer {
    fn from(v: Vec<i8>) -> Self {
        NumericBuffer::Int8(v)
    }
}

impl From<Vec<u8>> for NumericBuffer {
    fn from(v: Vec<u8>) -> Self {
        NumericBuffer::Uint8(v)
    }
}

impl From<Vec<i16>> for NumericBuffer {
    fn from(v: Vec<i16>) -> Self {
        NumericBuffer::Int16(v)
    }
}

impl From<Vec<u16>> for NumericBuffer {
    fn from(v: Vec<u16>) -> Self {
        NumericBuffer::Uint16(v)
    }
}

impl From<Vec<i32>> for NumericBuffer {
    fn from(v: Vec<i32>) -> Self {
        NumericBuffer::Int32(v)
    }
}

impl From<Vec<u32>> for NumericBuffer {
    fn from(v: Vec<u32>) -> Self {
        NumericBuffer::Uint32(v)
    }
}

impl From<Vec<f32>> for NumericBuffer {
    fn from(v: Vec<f32>) -> Self {
        NumericBuffer::Float32(v)
    }
}

impl From<Vec<f64>> for NumericBuffer {
    fn from(v: Vec<f64>) -> Self {
        NumericBuffer::Float64(v)
    }
}

impl From<Vec<i64>> for NumericBuffer {
    fn from(v: Vec<i64>) -> Self {
        NumericBuffer::BigInt64(v)
    }
}

impl From<Vec<u64>> for NumericBuffer {
    fn from(v: Vec<u64>) -> Self {
        NumericBuffer::BigUint64(v)
    }
}
