//! Type classifier
//!
//! Maps every value onto a closed [`TypeTag`] so traversal and diagnostics
//! can dispatch with a `match` instead of inspecting values ad hoc.

use deepassert_core_types::{PrimitiveKind, TypeTag, Value, PLAIN_STRUCT_NAME};

/// Classify a value
///
/// Arrays classify as `array`, numeric buffers by their kind, structures by
/// their type name (`Object` when plain) and everything else by primitive
/// kind. Never fails.
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Array(_) => TypeTag::Array,
        Value::Buffer(buffer) => TypeTag::Buffer(buffer.kind()),
        Value::Struct(s) => {
            TypeTag::Struct(s.type_name().unwrap_or(PLAIN_STRUCT_NAME).to_string())
        }
        Value::Undefined => TypeTag::Primitive(PrimitiveKind::Undefined),
        Value::Null => TypeTag::Primitive(PrimitiveKind::Null),
        Value::Bool(_) => TypeTag::Primitive(PrimitiveKind::Boolean),
        Value::Number(_) => TypeTag::Primitive(PrimitiveKind::Number),
        Value::BigInt(_) => TypeTag::Primitive(PrimitiveKind::BigInt),
        Value::String(_) => TypeTag::Primitive(PrimitiveKind::String),
    }
}
