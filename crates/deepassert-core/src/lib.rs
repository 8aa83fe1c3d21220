//! deepassert core - structural comparison assertions
//!
//! This crate provides:
//! - A deep comparator factory ([`deeply`]) that lifts a scalar leaf
//!   comparator to arrays, numeric buffers and keyed structures
//! - Numeric tolerance comparison ([`close_to`], [`deep_close_to`])
//! - Type and length assertions ([`same_type`], [`same_length`])
//! - Failures that carry the path to the mismatch and a trace cleaned of
//!   comparator internals
//!
//! ```
//! use deepassert_core::{deep_close_to, FailureKind, PathKey, Value};
//! use serde_json::json;
//!
//! let actual = Value::from(json!({"a": [1, 2, {"b": 3}]}));
//! let expected = Value::from(json!({"a": [1, 2, {"b": 9}]}));
//! let failure = deep_close_to(&actual, &expected, None, None).unwrap_err();
//! assert_eq!(failure.kind(), FailureKind::ToleranceExceeded);
//! assert_eq!(failure.path(), &[PathKey::from("a"), PathKey::Index(2), PathKey::from("b")]);
//! assert!(failure.message().ends_with("(path: .a[2].b)"));
//! ```

pub mod annotate;
pub mod assert;
mod assert_macros;
pub mod classify;
pub mod config;
pub mod deeply;
pub mod derived;
pub mod errors;
pub mod leaf;
pub mod logging_facility;
pub mod trace;

pub use deepassert_core_types as types;

// Re-export commonly used types
pub use annotate::annotate;
pub use classify::classify;
pub use config::CompareOptions;
pub use deeply::{deeply, leaf_fn, DeepComparator, LeafComparator};
pub use derived::{deep_close_to, deep_close_to_with};
pub use errors::{AssertionError, ConfigError, FailureKind, Mismatch, Result};
pub use leaf::{
    close_to, same_length, same_type, CloseTo, CloseToArgs, SameType, DEFAULT_EPSILON,
};
pub use trace::{clean, Frame, Trace};
pub use types::{NumericBuffer, PathKey, Structure, TypeTag, Value};
