//! Type tags
//!
//! The classification result for a [`crate::Value`]. Two values are the
//! same type iff their tags are equal.

use crate::buffer::BufferKind;
use std::fmt;

/// Type name reported for plain keyed structures
pub const PLAIN_STRUCT_NAME: &str = "Object";

/// Primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    String,
}

impl PrimitiveKind {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Number => "number",
            PrimitiveKind::BigInt => "bigint",
            PrimitiveKind::String => "string",
        }
    }
}

/// Classification of a value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Array,
    Buffer(BufferKind),
    /// Structure identified by its type name (`Object` when plain)
    Struct(String),
    Primitive(PrimitiveKind),
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Array => f.write_str("array"),
            TypeTag::Buffer(kind) => f.write_str(kind.name()),
            TypeTag::Struct(name) => f.write_str(name),
            TypeTag::Primitive(kind) => f.write_str(kind.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(TypeTag::Array.to_string(), "array");
        assert_eq!(TypeTag::Buffer(BufferKind::Float64).to_string(), "Float64Array");
        assert_eq!(TypeTag::Struct(PLAIN_STRUCT_NAME.into()).to_string(), "Object");
        assert_eq!(TypeTag::Primitive(PrimitiveKind::BigInt).to_string(), "bigint");
    }
}
