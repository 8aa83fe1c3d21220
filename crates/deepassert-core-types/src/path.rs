//! Failure paths
//!
//! A path is the sequence of keys and indices leading from the root of a
//! compared value down to the mismatching leaf. Rendered paths concatenate
//! one segment per key with no separator: `.key` for identifier-shaped keys,
//! `[<json>]` for indices and every other key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a failure path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathKey {
    Index(usize),
    Key(String),
}

impl PathKey {
    /// Render this key as a path segment
    pub fn render(&self) -> String {
        match self {
            PathKey::Key(key) if is_identifier(key) => format!(".{}", key),
            PathKey::Key(key) => format!(
                "[{}]",
                serde_json::to_string(key).unwrap_or_else(|_| format!("{:?}", key))
            ),
            PathKey::Index(index) => format!("[{}]", index),
        }
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Index(index) => write!(f, "{}", index),
            PathKey::Key(key) => f.write_str(key),
        }
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        PathKey::Index(index)
    }
}

impl From<&str> for PathKey {
    fn from(key: &str) -> Self {
        PathKey::Key(key.to_string())
    }
}

impl From<String> for PathKey {
    fn from(key: String) -> Self {
        PathKey::Key(key)
    }
}

/// Whether `s` matches `^[A-Za-z_][A-Za-z0-9_]*$`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Render a whole path, root first
pub fn render_path(path: &[PathKey]) -> String {
    path.iter().map(PathKey::render).collect()
}
