use crate::trace::{Frame, Trace};
use deepassert_core_types::{format_number, render_path, PathKey, TypeTag};
use std::panic::Location;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using AssertionError
pub type Result<T> = std::result::Result<T, AssertionError>;

// ========== Failure Facility ==========

/// Canonical failure kind taxonomy
///
/// Each kind maps to a stable code that can be used for programmatic
/// handling of failures, in tests and in CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    // Comparison
    TypeMismatch,
    LengthMismatch,
    KeySetMismatch,
    ToleranceExceeded,
    ValueMismatch,

    // Comparison guards
    /// Epsilon is negative or NaN
    InvalidTolerance,
    /// Nesting exceeded the configured depth limit
    DepthExceeded,

    // Base assertion primitive
    AssertionFailed,
    UnexpectedEqual,
    Failed,
}

impl FailureKind {
    /// Get the stable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            FailureKind::LengthMismatch => "ERR_LENGTH_MISMATCH",
            FailureKind::KeySetMismatch => "ERR_KEY_SET_MISMATCH",
            FailureKind::ToleranceExceeded => "ERR_TOLERANCE_EXCEEDED",
            FailureKind::ValueMismatch => "ERR_VALUE_MISMATCH",
            FailureKind::InvalidTolerance => "ERR_INVALID_TOLERANCE",
            FailureKind::DepthExceeded => "ERR_DEPTH_EXCEEDED",
            FailureKind::AssertionFailed => "ERR_ASSERTION_FAILED",
            FailureKind::UnexpectedEqual => "ERR_UNEXPECTED_EQUAL",
            FailureKind::Failed => "ERR_FAILED",
        }
    }
}

/// Canonical assertion failure
///
/// Carries the failure kind, the human-readable message (ending with a
/// rendered path suffix whenever `path` is non-empty), the path from the
/// root of the compared values to the mismatching leaf, and a structured
/// trace of the frames the failure passed through.
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub(crate) kind: FailureKind,
    pub(crate) message: String,
    pub(crate) generated_message: bool,
    pub(crate) actual: Option<String>,
    pub(crate) expected: Option<String>,
    pub(crate) path: Vec<PathKey>,
    pub(crate) trace: Trace,
}

impl AssertionError {
    /// Create a new failure of the specified kind
    ///
    /// The caller's location becomes the origin frame of the trace.
    #[track_caller]
    pub fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            message: String::new(),
            generated_message: true,
            actual: None,
            expected: None,
            path: Vec::new(),
            trace: Trace::starting_at(Frame::at(Location::caller())),
        }
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Record whether the message was generated or supplied by the caller
    pub fn with_generated_message(mut self, generated: bool) -> Self {
        self.generated_message = generated;
        self
    }

    /// Record a frame the failure propagated through
    pub fn through(mut self, frame: Frame) -> Self {
        self.trace.push(frame);
        self
    }

    /// Tag every frame recorded so far as internal
    pub fn internalized(mut self) -> Self {
        self.trace.internalize();
        self
    }

    /// Tag only the origin frame as internal
    pub fn internalized_origin(mut self) -> Self {
        self.trace.internalize_origin();
        self
    }

    /// Get the failure kind
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Get the stable failure code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the message, including any path suffix
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the message was generated rather than supplied by the caller
    pub fn generated_message(&self) -> bool {
        self.generated_message
    }

    /// Rendered actual operand, if recorded
    pub fn actual(&self) -> Option<&str> {
        self.actual.as_deref()
    }

    /// Rendered expected operand, if recorded
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    /// Keys from the root to the mismatching leaf, empty at the root
    pub fn path(&self) -> &[PathKey] {
        &self.path
    }

    /// Rendered path (`.a[2].b`), empty at the root
    pub fn rendered_path(&self) -> String {
        render_path(&self.path)
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Textual trace: a header line carrying the message, then one line per frame
    pub fn stack(&self) -> String {
        let mut stack = format!("AssertionError [{}]: {}", self.code(), self.message);
        for frame in self.trace.frames() {
            stack.push_str("\n    at ");
            stack.push_str(&frame.to_string());
        }
        stack
    }
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

impl std::error::Error for AssertionError {}

// ========== End Failure Facility ==========

fn num(n: &f64) -> String {
    format_number(*n)
}

/// Structured mismatch details
///
/// The `#[error]` strings are the default failure messages. A caller-supplied
/// message replaces them when the mismatch is raised.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Mismatch {
    #[error("Expected a {expected}, got a {actual} instead")]
    TypeMismatch { expected: TypeTag, actual: TypeTag },

    #[error("Expected a sequence, got a {actual} instead")]
    NotASequence { actual: TypeTag },

    #[error("Expected length {expected}, got {actual} instead")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Expected {{ {} }}, got {{ {} }}", .expected.join(", "), .actual.join(", "))]
    KeySetMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Expected {} to be within {} of {}", num(.actual), num(.epsilon), num(.expected))]
    ToleranceExceeded {
        actual: f64,
        expected: f64,
        epsilon: f64,
    },

    #[error("{actual} == {expected}")]
    ValueMismatch { actual: String, expected: String },

    #[error("{actual} != {expected}")]
    UnexpectedEqual { actual: String, expected: String },

    #[error("Tolerance must be a non-negative number, got {}", num(.epsilon))]
    InvalidTolerance { epsilon: f64 },

    #[error("Maximum comparison depth of {limit} exceeded")]
    DepthExceeded { limit: usize },
}

impl Mismatch {
    /// Failure kind this mismatch raises
    pub fn kind(&self) -> FailureKind {
        match self {
            Mismatch::TypeMismatch { .. } | Mismatch::NotASequence { .. } => {
                FailureKind::TypeMismatch
            }
            Mismatch::LengthMismatch { .. } => FailureKind::LengthMismatch,
            Mismatch::KeySetMismatch { .. } => FailureKind::KeySetMismatch,
            Mismatch::ToleranceExceeded { .. } => FailureKind::ToleranceExceeded,
            Mismatch::ValueMismatch { .. } => FailureKind::ValueMismatch,
            Mismatch::UnexpectedEqual { .. } => FailureKind::UnexpectedEqual,
            Mismatch::InvalidTolerance { .. } => FailureKind::InvalidTolerance,
            Mismatch::DepthExceeded { .. } => FailureKind::DepthExceeded,
        }
    }

    fn operands(&self) -> Option<(String, String)> {
        match self {
            Mismatch::TypeMismatch { expected, actual } => {
                Some((actual.to_string(), expected.to_string()))
            }
            Mismatch::LengthMismatch { expected, actual } => {
                Some((actual.to_string(), expected.to_string()))
            }
            Mismatch::ToleranceExceeded {
                actual, expected, ..
            } => Some((num(actual), num(expected))),
            Mismatch::ValueMismatch { actual, expected }
            | Mismatch::UnexpectedEqual { actual, expected } => {
                Some((actual.clone(), expected.clone()))
            }
            Mismatch::NotASequence { .. }
            | Mismatch::KeySetMismatch { .. }
            | Mismatch::InvalidTolerance { .. }
            | Mismatch::DepthExceeded { .. } => None,
        }
    }

    /// Turn this mismatch into a failure originating at the caller
    ///
    /// `message` replaces the default message when supplied.
    #[track_caller]
    pub fn raise(self, message: Option<&str>) -> AssertionError {
        let mut failure = AssertionError::new(self.kind());
        if let Some((actual, expected)) = self.operands() {
            failure.actual = Some(actual);
            failure.expected = Some(expected);
        }
        match message {
            Some(message) => failure
                .with_message(message)
                .with_generated_message(false),
            None => failure.with_message(self.to_string()),
        }
    }
}

impl From<Mismatch> for AssertionError {
    #[track_caller]
    fn from(mismatch: Mismatch) -> Self {
        mismatch.raise(None)
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv { var: String, value: String },

    #[error("epsilon must be a non-negative number, got {epsilon}")]
    InvalidEpsilon { epsilon: f64 },
}
