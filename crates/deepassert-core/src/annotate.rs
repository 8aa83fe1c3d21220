//! Path annotator
//!
//! As a failure propagates out of nested comparisons, each level prepends
//! its key to the failure's path and re-renders the ` (path: ...)` suffix of
//! the message. Annotating consumes the failure and returns a rebuilt one.

use crate::errors::AssertionError;
use deepassert_core_types::{is_identifier, render_path, PathKey};

const SUFFIX_OPEN: &str = " (path: ";

/// Prepend `key` to the failure's path and refresh the message suffix
///
/// Any path suffix already ending the message is replaced, so repeated
/// annotation while unwinding leaves exactly one suffix.
pub fn annotate(failure: AssertionError, key: impl Into<PathKey>) -> AssertionError {
    let mut path = Vec::with_capacity(failure.path.len() + 1);
    path.push(key.into());
    path.extend(failure.path.iter().cloned());

    let message = format!(
        "{}{}{})",
        base_message(&failure.message, &failure.path),
        SUFFIX_OPEN,
        render_path(&path)
    );

    AssertionError {
        message,
        path,
        ..failure
    }
}

fn base_message<'a>(message: &'a str, previous_path: &[PathKey]) -> &'a str {
    if !previous_path.is_empty() {
        let previous_suffix = format!("{}{})", SUFFIX_OPEN, render_path(previous_path));
        if let Some(base) = message.strip_suffix(previous_suffix.as_str()) {
            return base;
        }
    }
    strip_path_suffix(message)
}

/// Remove a trailing ` (path: ...)` group from a message
///
/// The group must consist of one or more `.ident` or `[...]` segments;
/// anything else is left untouched.
pub fn strip_path_suffix(message: &str) -> &str {
    let Some(body) = message.strip_suffix(')') else {
        return message;
    };
    let mut search_end = body.len();
    while let Some(start) = body[..search_end].rfind(SUFFIX_OPEN) {
        if is_rendered_path(&body[start + SUFFIX_OPEN.len()..]) {
            return &message[..start];
        }
        search_end = start;
    }
    message
}

fn is_rendered_path(rendered: &str) -> bool {
    if rendered.is_empty() {
        return false;
    }
    let mut rest = rendered;
    while !rest.is_empty() {
        if let Some(after_dot) = rest.strip_prefix('.') {
            let ident_len = after_dot
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after_dot.len());
            if !is_identifier(&after_dot[..ident_len]) {
                return false;
            }
            rest = &after_dot[ident_len..];
        } else if let Some(after_bracket) = rest.strip_prefix('[') {
            match after_bracket.find(']') {
                Some(close) if close > 0 => rest = &after_bracket[close + 1..],
                _ => return false,
            }
        } else {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;

    fn failure(message: &str) -> AssertionError {
        AssertionError::new(FailureKind::Failed).with_message(message)
    }

    #[test]
    fn test_annotate_builds_root_first_path() {
        let annotated = annotate(annotate(annotate(failure("bad"), "b"), 2usize), "a");
        assert_eq!(
            annotated.path(),
            &[PathKey::from("a"), PathKey::Index(2), PathKey::from("b")]
        );
        assert_eq!(annotated.message(), "bad (path: .a[2].b)");
    }

    #[test]
    fn test_annotate_keeps_a_single_suffix() {
        let annotated = annotate(annotate(failure("bad"), "x"), "y");
        assert_eq!(annotated.message().matches("(path:").count(), 1);
    }

    #[test]
    fn test_annotate_handles_bracketed_keys() {
        let annotated = annotate(annotate(failure("bad"), "a]b"), "c d");
        assert_eq!(annotated.message(), "bad (path: [\"c d\"][\"a]b\"])");
    }

    #[test]
    fn test_annotate_replaces_suffix_in_supplied_message() {
        let annotated = annotate(failure("bad (path: .stale[0])"), "k");
        assert_eq!(annotated.message(), "bad (path: .k)");
    }

    #[test]
    fn test_annotate_keeps_kind_and_trace() {
        let original = failure("bad");
        let frames = original.trace().len();
        let annotated = annotate(original, 0usize);
        assert_eq!(annotated.kind(), FailureKind::Failed);
        assert_eq!(annotated.trace().len(), frames);
        assert!(annotated
            .stack()
            .starts_with("AssertionError [ERR_FAILED]: bad (path: [0])"));
    }

    #[test]
    fn test_strip_path_suffix() {
        assert_eq!(strip_path_suffix("m (path: .a[1])"), "m");
        assert_eq!(strip_path_suffix("m (path: )"), "m (path: )");
        assert_eq!(strip_path_suffix("m (path: a)"), "m (path: a)");
        assert_eq!(strip_path_suffix("m (note)"), "m (note)");
        assert_eq!(strip_path_suffix("plain"), "plain");
        assert_eq!(strip_path_suffix("m (path: .9a)"), "m (path: .9a)");
    }
}
