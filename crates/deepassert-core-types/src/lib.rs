//! Core types shared across deepassert facilities
//!
//! This crate provides the foundational types used by the comparison engine,
//! the error facility and the logging facility:
//!
//! - **Value model**: `Value`, `Structure`, `NumericBuffer`, `BufferKind`
//! - **Classification**: `TypeTag`, `PrimitiveKind`
//! - **Failure paths**: `PathKey` and path-suffix rendering
//! - **Schema constants**: Canonical field keys and event names

pub mod buffer;
pub mod path;
pub mod schema;
pub mod type_tag;
pub mod value;

pub use buffer::{BufferKind, NumericBuffer};
pub use path::{is_identifier, render_path, PathKey};
pub use type_tag::{PrimitiveKind, TypeTag, PLAIN_STRUCT_NAME};
pub use value::{format_number, Structure, Value};
