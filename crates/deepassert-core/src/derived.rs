//! Ready-made deep assertions

use crate::config::CompareOptions;
use crate::deeply::{deeply, DeepComparator};
use crate::errors::Result;
use crate::leaf::{CloseTo, CloseToArgs, DEFAULT_EPSILON};
use deepassert_core_types::Value;

static DEEP_CLOSE_TO: DeepComparator<CloseTo> = deeply(CloseTo);

/// `close_to` applied at every leaf of two nested values
///
/// `epsilon` defaults to `1e-15`. A supplied `message` replaces the default
/// message of a failing leaf; the path suffix is still appended.
///
/// # Errors
///
/// The first mismatch in depth-first order.
///
/// ```
/// use deepassert_core::{deep_close_to, Value};
/// use serde_json::json;
///
/// let actual = Value::from(json!({"xs": [0.1, 0.2]}));
/// let expected = Value::from(json!({"xs": [0.1, 0.25]}));
/// let failure = deep_close_to(&actual, &expected, Some(1e-9), None).unwrap_err();
/// assert!(failure.message().ends_with("(path: .xs[1])"));
/// ```
#[track_caller]
pub fn deep_close_to(
    actual: &Value,
    expected: &Value,
    epsilon: Option<f64>,
    message: Option<&str>,
) -> Result<()> {
    let mut args = CloseToArgs::new(epsilon.unwrap_or(DEFAULT_EPSILON));
    args.message = message.map(str::to_string);
    DEEP_CLOSE_TO.compare(actual, expected, &args)
}

/// [`deep_close_to`] with epsilon and depth limit taken from `options`
///
/// # Errors
///
/// The first mismatch in depth-first order.
#[track_caller]
pub fn deep_close_to_with(
    actual: &Value,
    expected: &Value,
    options: &CompareOptions,
    message: Option<&str>,
) -> Result<()> {
    options
        .comparator()
        .compare(actual, expected, &options.close_to_args(message))
}
