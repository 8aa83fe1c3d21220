//! Panicking assertion macros for test code
//!
//! Operands are anything convertible into a `Value` (including a `Value`
//! itself or a `serde_json::Value`). On failure the macros panic with the
//! failure's stack text.

/// Assert two values are deeply equal within a tolerance
///
/// ```
/// use deepassert_core::assert_deep_close_to;
/// use serde_json::json;
///
/// assert_deep_close_to!(json!({"x": [0.1, 0.2]}), json!({"x": [0.1, 0.2]}));
/// assert_deep_close_to!(json!([1.0]), json!([1.01]), 0.1);
/// ```
#[macro_export]
macro_rules! assert_deep_close_to {
    ($actual:expr, $expected:expr $(,)?) => {
        if let Err(failure) = $crate::deep_close_to(
            &$crate::Value::from($actual),
            &$crate::Value::from($expected),
            None,
            None,
        ) {
            panic!("{}", failure.stack());
        }
    };
    ($actual:expr, $expected:expr, $epsilon:expr $(,)?) => {
        if let Err(failure) = $crate::deep_close_to(
            &$crate::Value::from($actual),
            &$crate::Value::from($expected),
            Some($epsilon),
            None,
        ) {
            panic!("{}", failure.stack());
        }
    };
}

/// Assert two scalars are within a tolerance
///
/// ```
/// use deepassert_core::assert_close_to;
///
/// assert_close_to!(0.1 + 0.2, 0.3);
/// assert_close_to!(10.0, 10.5, 1.0);
/// ```
#[macro_export]
macro_rules! assert_close_to {
    ($actual:expr, $expected:expr $(,)?) => {
        if let Err(failure) = $crate::close_to(
            &$crate::Value::from($actual),
            &$crate::Value::from($expected),
            None,
            None,
        ) {
            panic!("{}", failure.stack());
        }
    };
    ($actual:expr, $expected:expr, $epsilon:expr $(,)?) => {
        if let Err(failure) = $crate::close_to(
            &$crate::Value::from($actual),
            &$crate::Value::from($expected),
            Some($epsilon),
            None,
        ) {
            panic!("{}", failure.stack());
        }
    };
}

/// Assert two values classify to the same type
#[macro_export]
macro_rules! assert_same_type {
    ($actual:expr, $expected:expr $(,)?) => {
        if let Err(failure) = $crate::same_type(
            &$crate::Value::from($actual),
            &$crate::Value::from($expected),
            None,
        ) {
            panic!("{}", failure.stack());
        }
    };
}
