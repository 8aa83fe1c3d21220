//! Leaf comparators
//!
//! Scalar-level assertions. `same_type` and `close_to` are also available as
//! [`LeafComparator`] implementations ([`SameType`], [`CloseTo`]) so the deep
//! comparator factory can wrap them.

use crate::assert;
use crate::classify::classify;
use crate::deeply::LeafComparator;
use crate::errors::{AssertionError, Mismatch, Result};
use deepassert_core_types::Value;

/// Tolerance used by `close_to` when none is supplied
pub const DEFAULT_EPSILON: f64 = 1e-15;

/// Fail with `TypeMismatch` unless both operands classify to the same tag
#[track_caller]
pub fn same_type(actual: &Value, expected: &Value, message: Option<&str>) -> Result<()> {
    let actual_tag = classify(actual);
    let expected_tag = classify(expected);
    if actual_tag == expected_tag {
        return Ok(());
    }
    Err(Mismatch::TypeMismatch {
        expected: expected_tag,
        actual: actual_tag,
    }
    .raise(message))
}

#[track_caller]
fn not_a_sequence(value: &Value, message: Option<&str>) -> AssertionError {
    Mismatch::NotASequence {
        actual: classify(value),
    }
    .raise(message)
}

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        _ => value.sequence_len(),
    }
}

/// Fail with `LengthMismatch` unless both operands have the same length
///
/// Arrays, numeric buffers and strings have a length. Any other operand
/// fails with `TypeMismatch`.
#[track_caller]
pub fn same_length(actual: &Value, expected: &Value, message: Option<&str>) -> Result<()> {
    let (actual_len, expected_len) = match (length_of(actual), length_of(expected)) {
        (Some(a), Some(e)) => (a, e),
        (None, _) => return Err(not_a_sequence(actual, message)),
        (_, None) => return Err(not_a_sequence(expected, message)),
    };
    if actual_len == expected_len {
        return Ok(());
    }
    Err(Mismatch::LengthMismatch {
        expected: expected_len,
        actual: actual_len,
    }
    .raise(message))
}

/// Fail with `InvalidTolerance` for a negative or NaN epsilon
#[track_caller]
pub fn check_epsilon(epsilon: f64) -> Result<()> {
    if epsilon >= 0.0 {
        return Ok(());
    }
    Err(Mismatch::InvalidTolerance { epsilon }.raise(None))
}

/// Numbers within a tolerance, anything else exactly equal
///
/// Requires `same_type` first. Two numbers pass when they are equal or
/// `|actual - expected| <= epsilon` (a zero epsilon therefore means exact
/// equality); otherwise `ToleranceExceeded`. Other operands must be equal in
/// the sense of [`assert::equal`], otherwise `ValueMismatch`. `epsilon`
/// defaults to [`DEFAULT_EPSILON`].
#[track_caller]
pub fn close_to(
    actual: &Value,
    expected: &Value,
    epsilon: Option<f64>,
    message: Option<&str>,
) -> Result<()> {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    check_epsilon(epsilon)?;
    same_type(actual, expected, None)?;
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(e)) => {
            if a == e || (a - e).abs() <= epsilon {
                return Ok(());
            }
            Err(Mismatch::ToleranceExceeded {
                actual: a,
                expected: e,
                epsilon,
            }
            .raise(message))
        }
        _ => assert::equal(actual, expected, message),
    }
}

/// `same_type` as a leaf comparator; the argument is an optional message
#[derive(Debug, Clone, Copy, Default)]
pub struct SameType;

impl LeafComparator for SameType {
    type Args = Option<String>;

    fn name(&self) -> &'static str {
        "same_type"
    }

    fn compare(&self, actual: &Value, expected: &Value, message: &Option<String>) -> Result<()> {
        same_type(actual, expected, message.as_deref())
    }
}

/// Arguments forwarded to every `close_to` leaf
#[derive(Debug, Clone, PartialEq)]
pub struct CloseToArgs {
    pub epsilon: f64,
    pub message: Option<String>,
}

impl CloseToArgs {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Default for CloseToArgs {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

/// `close_to` as a leaf comparator
#[derive(Debug, Clone, Copy, Default)]
pub struct CloseTo;

impl LeafComparator for CloseTo {
    type Args = CloseToArgs;

    fn name(&self) -> &'static str {
        "close_to"
    }

    fn compare(&self, actual: &Value, expected: &Value, args: &CloseToArgs) -> Result<()> {
        close_to(actual, expected, Some(args.epsilon), args.message.as_deref())
    }

    fn check_args(&self, args: &CloseToArgs) -> Result<()> {
        check_epsilon(args.epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;
    use deepassert_core_types::{NumericBuffer, Structure};

    #[test]
    fn test_same_type_default_message_names_both_tags() {
        let failure = same_type(
            &Value::from(Structure::named("Point")),
            &Value::from(NumericBuffer::from(vec![1.0f64])),
            None,
        )
        .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::TypeMismatch);
        assert_eq!(
            failure.message(),
            "Expected a Float64Array, got a Point instead"
        );
    }

    #[test]
    fn test_same_length() {
        assert!(same_length(&Value::from(vec![1, 2]), &Value::from(vec![3, 4]), None).is_ok());
        assert!(same_length(&Value::from("ab"), &Value::from("cd"), None).is_ok());
        let failure =
            same_length(&Value::from(vec![1, 2]), &Value::from(vec![1, 2, 3]), None).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::LengthMismatch);
        assert_eq!(failure.message(), "Expected length 3, got 2 instead");
    }

    #[test]
    fn test_same_length_rejects_non_sequences() {
        let failure = same_length(&Value::from(1), &Value::from(vec![1]), None).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::TypeMismatch);
        assert_eq!(failure.message(), "Expected a sequence, got a number instead");
    }

    #[test]
    fn test_close_to_tolerance_boundary() {
        assert!(close_to(
            &Value::from(1.0000000000000009),
            &Value::from(1.0),
            Some(1e-15),
            None
        )
        .is_ok());
        let failure = close_to(&Value::from(1.1), &Value::from(1.0), Some(1e-15), None).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ToleranceExceeded);
        assert_eq!(failure.message(), "Expected 1.1 to be within 1e-15 of 1");
    }

    #[test]
    fn test_close_to_zero_epsilon_is_exact() {
        assert!(close_to(&Value::from(0.5), &Value::from(0.5), Some(0.0), None).is_ok());
        let failure = close_to(
            &Value::from(1.0000000000000002),
            &Value::from(1.0),
            Some(0.0),
            None,
        )
        .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ToleranceExceeded);
    }

    #[test]
    fn test_close_to_rejects_invalid_epsilon() {
        for epsilon in [-1e-9, f64::NAN] {
            let failure =
                close_to(&Value::from(1), &Value::from(1), Some(epsilon), None).unwrap_err();
            assert_eq!(failure.kind(), FailureKind::InvalidTolerance);
        }
    }

    #[test]
    fn test_close_to_infinities_and_nan() {
        let inf = Value::from(f64::INFINITY);
        assert!(close_to(&inf, &Value::from(f64::INFINITY), None, None).is_ok());
        let nan = Value::from(f64::NAN);
        let failure = close_to(&nan, &Value::from(1.0), Some(f64::INFINITY), None).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ToleranceExceeded);
    }

    #[test]
    fn test_close_to_falls_back_to_equality() {
        assert!(close_to(&Value::from("a"), &Value::from("a"), None, None).is_ok());
        let failure = close_to(&Value::from("a"), &Value::from("b"), None, None).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ValueMismatch);
        assert_eq!(failure.message(), "'a' == 'b'");

        let failure =
            close_to(&Value::from(true), &Value::from(false), None, Some("flag")).unwrap_err();
        assert_eq!(failure.message(), "flag");
    }

    #[test]
    fn test_close_to_requires_same_type() {
        let failure = close_to(&Value::from("1"), &Value::from(1), None, None).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::TypeMismatch);
        assert_eq!(failure.message(), "Expected a number, got a string instead");
    }

    #[test]
    fn test_close_to_message_overrides_default() {
        let failure =
            close_to(&Value::from(2), &Value::from(1), Some(0.5), Some("too far")).unwrap_err();
        assert_eq!(failure.message(), "too far");
        assert_eq!(failure.actual(), Some("2"));
        assert_eq!(failure.expected(), Some("1"));
    }
}
