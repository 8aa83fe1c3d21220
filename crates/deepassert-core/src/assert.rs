//! Base assertion primitive
//!
//! Minimal assertions returning `Result` instead of panicking. Every
//! function is `#[track_caller]`, so a failure's origin frame points at the
//! code that called it.

use crate::errors::{AssertionError, FailureKind, Mismatch, Result};
use deepassert_core_types::Value;

/// Loose equality: strict equality, with `NaN` equal to `NaN`
fn loosely_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(e)) if a.is_nan() && e.is_nan() => true,
        _ => actual.is_identical(expected),
    }
}

/// Fail with `AssertionFailed` unless `condition` holds
#[track_caller]
pub fn ok(condition: bool, message: Option<&str>) -> Result<()> {
    if condition {
        return Ok(());
    }
    Err(AssertionError::new(FailureKind::AssertionFailed)
        .with_message(message.unwrap_or("The expression evaluated to a falsy value"))
        .with_generated_message(message.is_none()))
}

/// Fail with `ValueMismatch` unless the operands are equal
///
/// Non-recursive: primitives compare by value, containers only by identity.
#[track_caller]
pub fn equal(actual: &Value, expected: &Value, message: Option<&str>) -> Result<()> {
    if loosely_equal(actual, expected) {
        return Ok(());
    }
    Err(Mismatch::ValueMismatch {
        actual: actual.to_string(),
        expected: expected.to_string(),
    }
    .raise(message))
}

/// Fail with `UnexpectedEqual` when the operands are equal
#[track_caller]
pub fn not_equal(actual: &Value, expected: &Value, message: Option<&str>) -> Result<()> {
    if !loosely_equal(actual, expected) {
        return Ok(());
    }
    Err(Mismatch::UnexpectedEqual {
        actual: actual.to_string(),
        expected: expected.to_string(),
    }
    .raise(message))
}

/// Fail unconditionally
#[track_caller]
pub fn fail(message: Option<&str>) -> Result<()> {
    Err(AssertionError::new(FailureKind::Failed)
        .with_message(message.unwrap_or("Failed"))
        .with_generated_message(message.is_none()))
}
