//! Deep comparator factory
//!
//! [`deeply`] wraps a [`LeafComparator`] into a [`DeepComparator`] that walks
//! arrays, numeric buffers and keyed structures in lockstep and applies the
//! leaf comparator only at scalar leaves.
//!
//! ## Traversal
//!
//! 1. Identical operands (same instance, or strictly equal primitives) pass,
//!    at the root even when the leaf arguments are invalid.
//! 2. `same_type` must hold; a failure here carries no path of its own.
//! 3. Sequences: `same_length`, then every index in order.
//! 4. Structures: sorted key sets must agree, then every key in order. The
//!    recursive call receives `(expected[key], actual[key])`, i.e. the
//!    operands are swapped relative to sequences. Leaf comparators whose
//!    messages depend on operand order report them swapped below keys.
//! 5. Anything else goes to the leaf comparator.
//!
//! Failures gain one path segment per level on the way out. The outermost
//! call records the caller's frame and strips every internal frame.

use crate::annotate::annotate;
use crate::errors::{AssertionError, Mismatch, Result};
use crate::leaf::{same_length, same_type};
use crate::trace::{clean, Frame};
use crate::{log_op_end, log_op_error, log_op_start};
use deepassert_core_types::schema::OP_DEEP_COMPARE;
use deepassert_core_types::{PathKey, Value};
use std::marker::PhantomData;
use std::panic::Location;
use std::time::Instant;

/// Frame name of the outermost comparator call
pub const ENTRY_FRAME: &str = "DeepComparator::compare";
/// Frame name of each recursive traversal level
pub const WALK_FRAME: &str = "DeepComparator::walk";

/// Comparator applied at scalar leaves
pub trait LeafComparator {
    /// Extra arguments forwarded unchanged to every leaf
    type Args;

    /// Frame name used for this comparator in failure traces
    fn name(&self) -> &'static str;

    fn compare(&self, actual: &Value, expected: &Value, args: &Self::Args) -> Result<()>;

    /// Validate the extra arguments once, before traversal starts
    fn check_args(&self, _args: &Self::Args) -> Result<()> {
        Ok(())
    }
}

/// Leaf comparator backed by a closure
pub struct FnLeaf<F, A> {
    name: &'static str,
    compare: F,
    _args: PhantomData<fn(&A)>,
}

/// Build a leaf comparator from a closure
pub fn leaf_fn<F, A>(name: &'static str, compare: F) -> FnLeaf<F, A>
where
    F: Fn(&Value, &Value, &A) -> Result<()>,
{
    FnLeaf {
        name,
        compare,
        _args: PhantomData,
    }
}

impl<F, A> LeafComparator for FnLeaf<F, A>
where
    F: Fn(&Value, &Value, &A) -> Result<()>,
{
    type Args = A;

    fn name(&self) -> &'static str {
        self.name
    }

    fn compare(&self, actual: &Value, expected: &Value, args: &A) -> Result<()> {
        (self.compare)(actual, expected, args)
    }
}

/// Recursive structural comparator produced by [`deeply`]
#[derive(Debug, Clone)]
pub struct DeepComparator<L> {
    leaf: L,
    max_depth: Option<usize>,
}

/// Wrap a leaf comparator into a deep comparator
pub const fn deeply<L>(leaf: L) -> DeepComparator<L> {
    DeepComparator {
        leaf,
        max_depth: None,
    }
}

fn internal(failure: AssertionError) -> AssertionError {
    failure.internalized().through(Frame::internal(WALK_FRAME))
}

fn nested(failure: AssertionError, key: PathKey) -> AssertionError {
    annotate(failure, key).through(Frame::internal(WALK_FRAME))
}

impl<L: LeafComparator> DeepComparator<L> {
    /// Limit how many container levels may be traversed
    ///
    /// The root container is level one. Entering a container beyond the
    /// limit fails with `DepthExceeded` at that container's path.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn leaf(&self) -> &L {
        &self.leaf
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Compare `actual` against `expected`
    ///
    /// # Errors
    ///
    /// The first mismatch found in depth-first order, annotated with its
    /// path and with internal frames removed from its trace.
    #[track_caller]
    pub fn compare(&self, actual: &Value, expected: &Value, args: &L::Args) -> Result<()> {
        let caller = Location::caller();
        let started = Instant::now();
        log_op_start!(
            OP_DEEP_COMPARE,
            leaf = self.leaf.name(),
            max_depth = ?self.max_depth
        );

        // Identical operands pass before the arguments are looked at
        let outcome = if actual.is_identical(expected) {
            Ok(())
        } else {
            self.leaf
                .check_args(args)
                .map_err(internal)
                .and_then(|()| self.walk(actual, expected, args, 0))
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => {
                log_op_end!(
                    OP_DEEP_COMPARE,
                    duration_ms = duration_ms,
                    leaf = self.leaf.name()
                );
                Ok(())
            }
            Err(failure) => {
                let failure = clean(
                    failure
                        .through(Frame::internal(ENTRY_FRAME))
                        .through(Frame::at(caller)),
                    &[ENTRY_FRAME, WALK_FRAME, self.leaf.name()],
                );
                log_op_error!(
                    OP_DEEP_COMPARE,
                    failure,
                    duration_ms = duration_ms,
                    leaf = self.leaf.name()
                );
                Err(failure)
            }
        }
    }

    fn enter(&self, depth: usize) -> Result<()> {
        match self.max_depth {
            Some(limit) if depth >= limit => {
                Err(internal(Mismatch::DepthExceeded { limit }.raise(None)))
            }
            _ => Ok(()),
        }
    }

    fn walk(&self, actual: &Value, expected: &Value, args: &L::Args, depth: usize) -> Result<()> {
        if actual.is_identical(expected) {
            return Ok(());
        }
        same_type(actual, expected, None).map_err(internal)?;

        match (actual, expected) {
            (_, Value::Array(_) | Value::Buffer(_)) => {
                self.enter(depth)?;
                same_length(actual, expected, None).map_err(internal)?;
                let len = expected.sequence_len().unwrap_or(0);
                for index in 0..len {
                    if let (Some(a), Some(e)) = (actual.element(index), expected.element(index)) {
                        self.walk(&a, &e, args, depth + 1)
                            .map_err(|failure| nested(failure, PathKey::Index(index)))?;
                    }
                }
                Ok(())
            }
            (Value::Struct(actual_struct), Value::Struct(expected_struct)) => {
                self.enter(depth)?;
                let expected_keys: Vec<&str> = expected_struct.keys().collect();
                let actual_keys: Vec<&str> = actual_struct.keys().collect();
                let key_set_mismatch = || {
                    internal(
                        Mismatch::KeySetMismatch {
                            expected: expected_keys.iter().map(|k| k.to_string()).collect(),
                            actual: actual_keys.iter().map(|k| k.to_string()).collect(),
                        }
                        .raise(None),
                    )
                };
                if expected_keys.len() != actual_keys.len() {
                    return Err(key_set_mismatch());
                }
                for (index, key) in expected_keys.iter().enumerate() {
                    if actual_keys[index] != *key {
                        return Err(key_set_mismatch());
                    }
                    if let (Some(e), Some(a)) = (expected_struct.get(key), actual_struct.get(key)) {
                        // Operands swapped at structure keys
                        self.walk(e, a, args, depth + 1)
                            .map_err(|failure| nested(failure, PathKey::from(*key)))?;
                    }
                }
                Ok(())
            }
            // Frames a leaf records for its own helpers stay visible
            _ => self.leaf.compare(actual, expected, args).map_err(|failure| {
                failure
                    .internalized_origin()
                    .through(Frame::named(self.leaf.name()))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;
    use crate::leaf::{CloseTo, CloseToArgs, SameType};
    use deepassert_core_types::{NumericBuffer, Structure};
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_identity_short_circuits() {
        let value = v(json!({"a": [1, 2, {"b": null}]}));
        let comparator = deeply(CloseTo);
        assert!(comparator
            .compare(&value, &value, &CloseToArgs::default())
            .is_ok());
    }

    #[test]
    fn test_root_type_mismatch_has_no_path() {
        let failure = deeply(CloseTo)
            .compare(&v(json!([1])), &v(json!({"0": 1})), &CloseToArgs::default())
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::TypeMismatch);
        assert!(failure.path().is_empty());
        assert_eq!(failure.message(), "Expected a Object, got a array instead");
    }

    #[test]
    fn test_length_checked_before_elements() {
        let failure = deeply(CloseTo)
            .compare(&v(json!([9, 2])), &v(json!([1, 2, 3])), &CloseToArgs::default())
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::LengthMismatch);
        assert_eq!(failure.message(), "Expected length 3, got 2 instead");
    }

    #[test]
    fn test_key_set_mismatch_lists_sorted_keys() {
        let failure = deeply(CloseTo)
            .compare(
                &v(json!({"b": 1, "a": 1})),
                &v(json!({"c": 1, "a": 1, "b": 1})),
                &CloseToArgs::default(),
            )
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::KeySetMismatch);
        assert_eq!(failure.message(), "Expected { a, b, c }, got { a, b }");
    }

    #[test]
    fn test_keys_compared_in_sorted_order_before_later_key_names() {
        // `a` is reached before the key names diverge at index 1
        let failure = deeply(CloseTo)
            .compare(
                &v(json!({"a": 2, "b": 1})),
                &v(json!({"a": 1, "c": 1})),
                &CloseToArgs::default(),
            )
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ToleranceExceeded);
        assert_eq!(failure.path(), &[PathKey::from("a")]);
    }

    #[test]
    fn test_buffers_compare_elementwise() {
        let actual = Value::from(NumericBuffer::from(vec![1.0f64, 2.0]));
        let expected = Value::from(NumericBuffer::from(vec![1.0f64, 2.5]));
        let failure = deeply(CloseTo)
            .compare(&actual, &expected, &CloseToArgs::new(0.1))
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ToleranceExceeded);
        assert_eq!(failure.path(), &[PathKey::Index(1)]);
        assert!(deeply(CloseTo)
            .compare(&actual, &expected, &CloseToArgs::new(0.5))
            .is_ok());
    }

    #[test]
    fn test_buffer_kinds_must_match() {
        let failure = deeply(CloseTo)
            .compare(
                &Value::from(NumericBuffer::from(vec![1.0f32])),
                &Value::from(NumericBuffer::from(vec![1.0f64])),
                &CloseToArgs::default(),
            )
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::TypeMismatch);
        assert_eq!(
            failure.message(),
            "Expected a Float64Array, got a Float32Array instead"
        );
    }

    #[test]
    fn test_named_structures_must_share_type_name() {
        let failure = deeply(CloseTo)
            .compare(
                &Value::from(Structure::named("Vec2").with_field("x", 1)),
                &Value::from(Structure::named("Point").with_field("x", 1)),
                &CloseToArgs::default(),
            )
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::TypeMismatch);
    }

    #[test]
    fn test_same_type_leaf_compares_shape_only() {
        let comparator = deeply(SameType);
        assert!(comparator
            .compare(&v(json!({"a": [1, "x"]})), &v(json!({"a": [2, "y"]})), &None)
            .is_ok());
        let failure = comparator
            .compare(&v(json!({"a": [1, "x"]})), &v(json!({"a": [2, 3]})), &None)
            .unwrap_err();
        assert_eq!(failure.path(), &[PathKey::from("a"), PathKey::Index(1)]);
    }

    #[test]
    fn test_depth_limit() {
        let value = v(json!({"a": {"b": {"c": 1}}}));
        let other = v(json!({"a": {"b": {"c": 1}}}));
        let comparator = deeply(CloseTo).with_max_depth(2);
        let failure = comparator
            .compare(&value, &other, &CloseToArgs::default())
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::DepthExceeded);
        assert_eq!(
            failure.message(),
            "Maximum comparison depth of 2 exceeded (path: .a.b)"
        );
        assert!(deeply(CloseTo)
            .with_max_depth(3)
            .compare(&value, &other, &CloseToArgs::default())
            .is_ok());
    }

    #[test]
    fn test_invalid_epsilon_fails_before_traversal() {
        let failure = deeply(CloseTo)
            .compare(&v(json!([1])), &v(json!([1])), &CloseToArgs::new(-1.0))
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::InvalidTolerance);
        assert_eq!(failure.trace().len(), 1);
    }

    #[test]
    fn test_identity_ignores_invalid_epsilon() {
        let value = v(json!({"a": [1.5]}));
        let comparator = deeply(CloseTo);
        assert!(comparator
            .compare(&value, &value, &CloseToArgs::new(-1.0))
            .is_ok());
        assert!(comparator
            .compare(&v(json!(2)), &v(json!(2)), &CloseToArgs::new(f64::NAN))
            .is_ok());
    }

    #[test]
    fn test_closure_leaf() {
        let exact = leaf_fn("exact", |a: &Value, e: &Value, _: &()| {
            crate::assert::equal(a, e, None)
        });
        let failure = deeply(exact)
            .compare(&v(json!([0.1])), &v(json!([0.2])), &())
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ValueMismatch);
        assert_eq!(failure.message(), "0.1 == 0.2 (path: [0])");
    }
}
