//! Failure traces
//!
//! A [`Trace`] is the list of frames a failure passed through, innermost
//! first. Frames pushed by the comparison machinery itself are tagged
//! internal; [`clean`] drops them once the failure leaves the outermost
//! comparator, so the remaining frames point at the caller's code.

use crate::errors::AssertionError;
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// One frame of a failure trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    name: Option<Cow<'static, str>>,
    location: Option<&'static Location<'static>>,
    internal: bool,
}

impl Frame {
    /// Anonymous frame at a source location
    pub fn at(location: &'static Location<'static>) -> Self {
        Self {
            name: None,
            location: Some(location),
            internal: false,
        }
    }

    /// Named frame at the caller's location
    #[track_caller]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: Some(name.into()),
            location: Some(Location::caller()),
            internal: false,
        }
    }

    /// Internal frame of the comparison machinery
    #[track_caller]
    pub fn internal(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            internal: true,
            ..Self::named(name)
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    pub fn is_internal(&self) -> bool {
        self.internal
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.location) {
            (Some(name), Some(location)) => write!(f, "{} ({})", name, location),
            (Some(name), None) => f.write_str(name),
            (None, Some(location)) => write!(f, "{}", location),
            (None, None) => f.write_str("<unknown>"),
        }
    }
}

/// Frames a failure passed through, innermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    frames: Vec<Frame>,
}

impl Trace {
    pub fn starting_at(origin: Frame) -> Self {
        Self {
            frames: vec![origin],
        }
    }

    /// Record an outer frame
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Tag every frame as internal
    pub fn internalize(&mut self) {
        for frame in &mut self.frames {
            frame.internal = true;
        }
    }

    /// Tag the innermost frame as internal
    pub fn internalize_origin(&mut self) {
        if let Some(origin) = self.frames.first_mut() {
            origin.internal = true;
        }
    }

    /// Drop internal frames and frames named in `names`
    pub fn retain_external(&mut self, names: &[&str]) {
        self.frames.retain(|frame| {
            !frame.internal && !frame.name().is_some_and(|name| names.contains(&name))
        });
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Strip internal frames from a failure's trace
///
/// Removes every frame tagged internal, plus any frame whose name appears in
/// `names`, and returns the cleaned failure.
pub fn clean(mut failure: AssertionError, names: &[&str]) -> AssertionError {
    failure.trace.retain_external(names);
    failure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;

    #[test]
    fn test_clean_drops_internal_and_named_frames() {
        let failure = AssertionError::new(FailureKind::Failed)
            .through(Frame::internal("walk"))
            .through(Frame::named("close_to"))
            .through(Frame::named("user_helper"));
        assert_eq!(failure.trace().len(), 4);

        let cleaned = clean(failure, &["close_to"]);
        let names: Vec<Option<&str>> = cleaned.trace().frames().iter().map(Frame::name).collect();
        assert_eq!(names, vec![None, Some("user_helper")]);
    }

    #[test]
    fn test_internalize_marks_existing_frames_only() {
        let failure = AssertionError::new(FailureKind::Failed)
            .internalized()
            .through(Frame::named("outer"));
        let frames = failure.trace().frames();
        assert!(frames[0].is_internal());
        assert!(!frames[1].is_internal());
    }

    #[test]
    fn test_internalize_origin_leaves_outer_frames() {
        let failure = AssertionError::new(FailureKind::Failed)
            .through(Frame::named("helper"))
            .internalized_origin();
        let frames = failure.trace().frames();
        assert!(frames[0].is_internal());
        assert!(!frames[1].is_internal());

        let cleaned = clean(failure, &[]);
        assert_eq!(cleaned.trace().frames()[0].name(), Some("helper"));
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame::named("compare");
        let rendered = frame.to_string();
        assert!(rendered.starts_with("compare ("));
        assert!(rendered.contains(file!()));
    }
}
