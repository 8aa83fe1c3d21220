use deepassert_core::{leaf_fn, LeafComparator, Result, Value};
use std::cell::RefCell;

/// Convert a JSON literal into a comparable value
#[allow(dead_code)]
pub fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// Leaf calls recorded as `(actual, expected)` pairs
#[allow(dead_code)]
pub type LeafCalls = RefCell<Vec<(Value, Value)>>;

/// Leaf comparator that records every call and always passes
#[allow(dead_code)]
pub fn recording_leaf(calls: &LeafCalls) -> impl LeafComparator<Args = ()> + '_ {
    leaf_fn("recording_leaf", move |actual: &Value, expected: &Value, _: &()| -> Result<()> {
        calls.borrow_mut().push((actual.clone(), expected.clone()));
        Ok(())
    })
}
