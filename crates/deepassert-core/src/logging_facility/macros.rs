//! Canonical logging macros
//!
//! Field names come from `deepassert_core_types::schema` so log consumers
//! can rely on them.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use deepassert_core::log_op_start;
/// log_op_start!("deep_compare");
/// log_op_start!("deep_compare", leaf = "close_to");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use deepassert_core::log_op_end;
/// log_op_end!("deep_compare", duration_ms = 3u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a failed operation
///
/// `$err` must be an `AssertionError`; it is borrowed, not consumed.
///
/// # Example
///
/// ```
/// # use deepassert_core::log_op_error;
/// use deepassert_core::errors::{AssertionError, FailureKind};
/// let failure = AssertionError::new(FailureKind::Failed).with_message("boom");
/// log_op_error!("deep_compare", failure, duration_ms = 10u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let failure: &$crate::errors::AssertionError = &$err;
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?failure.kind(),
            err.code = failure.code(),
            err.path = %failure.rendered_path(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let failure: &$crate::errors::AssertionError = &$err;
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?failure.kind(),
            err.code = failure.code(),
            err.path = %failure.rendered_path(),
            $($field)*
        );
    }};
}
