//! Comparison options
//!
//! Options come from code, a YAML document or the environment. Every source
//! goes through [`CompareOptions::validate`] before use.

use crate::deeply::{deeply, DeepComparator};
use crate::errors::ConfigError;
use crate::leaf::{CloseTo, CloseToArgs, DEFAULT_EPSILON};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the default epsilon
pub const ENV_EPSILON: &str = "DEEPASSERT_EPSILON";
/// Environment variable holding the container depth limit
pub const ENV_MAX_DEPTH: &str = "DEEPASSERT_MAX_DEPTH";

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

/// Options for `deep_close_to` comparisons
///
/// ```yaml
/// epsilon: 1.0e-9
/// max_depth: 64
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareOptions {
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_depth: None,
        }
    }
}

impl CompareOptions {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Parse and validate options from a YAML document
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` for malformed YAML or unknown fields, and
    /// `ConfigError::InvalidEpsilon` for a negative or NaN epsilon.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    /// Read, parse and validate options from a YAML file
    ///
    /// # Errors
    ///
    /// `ConfigError::Io` when the file cannot be read, otherwise as
    /// [`CompareOptions::from_yaml_str`].
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Defaults overridden by `DEEPASSERT_EPSILON` and `DEEPASSERT_MAX_DEPTH`
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidEnv` when a variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by variables resolved through `lookup`
    ///
    /// # Errors
    ///
    /// As [`CompareOptions::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        if let Some(value) = lookup(ENV_EPSILON) {
            options.epsilon = parse_var(ENV_EPSILON, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_DEPTH) {
            options.max_depth = Some(parse_var(ENV_MAX_DEPTH, &value)?);
        }
        options.validate()?;
        Ok(options)
    }

    /// # Errors
    ///
    /// `ConfigError::InvalidEpsilon` for a negative or NaN epsilon.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epsilon >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidEpsilon {
                epsilon: self.epsilon,
            })
        }
    }

    /// Leaf arguments carrying this epsilon
    pub fn close_to_args(&self, message: Option<&str>) -> CloseToArgs {
        let args = CloseToArgs::new(self.epsilon);
        match message {
            Some(message) => args.with_message(message),
            None => args,
        }
    }

    /// Deep `close_to` comparator honouring the depth limit
    pub fn comparator(&self) -> DeepComparator<CloseTo> {
        let comparator = deeply(CloseTo);
        match self.max_depth {
            Some(limit) => comparator.with_max_depth(limit),
            None => comparator,
        }
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}
