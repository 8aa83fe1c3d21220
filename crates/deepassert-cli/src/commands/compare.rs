//! Compare command
//!
//! Usage: deepassert compare <ACTUAL> <EXPECTED> [--epsilon <E>] [--max-depth <N>]
//!        [--config <FILE>] [--json]
//!
//! Options are resolved in order: defaults, then `DEEPASSERT_*` environment
//! variables (or the `--config` file when given), then flags.

use clap::Args;
use deepassert_core::types::schema::OP_COMPARE_DOCUMENTS;
use deepassert_core::{
    deep_close_to_with, log_op_end, log_op_start, AssertionError, CompareOptions, ConfigError,
    PathKey, Value,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Document holding the actual values
    pub actual: PathBuf,

    /// Document holding the expected values
    pub expected: PathBuf,

    /// Tolerance for numeric leaves
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Maximum container nesting to traverse
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// YAML file with comparison options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print a JSON report on stdout instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Result of a completed comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Match,
    Mismatch,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to encode report: {0}")]
    Report(#[source] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a [PathKey]>,
}

impl<'a> Report<'a> {
    fn from_result(result: &'a Result<(), AssertionError>) -> Self {
        match result {
            Ok(()) => Self {
                ok: true,
                code: None,
                message: None,
                path: None,
            },
            Err(failure) => Self {
                ok: false,
                code: Some(failure.code()),
                message: Some(failure.message()),
                path: Some(failure.path()),
            },
        }
    }
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<Outcome, CliError> {
    let options = resolve_options(&args, |var| std::env::var(var).ok())?;
    let actual = load_document(&args.actual)?;
    let expected = load_document(&args.expected)?;

    let started = Instant::now();
    log_op_start!(OP_COMPARE_DOCUMENTS, epsilon = options.epsilon);
    let result = deep_close_to_with(&actual, &expected, &options, None);
    log_op_end!(
        OP_COMPARE_DOCUMENTS,
        duration_ms = started.elapsed().as_millis() as u64,
        matched = result.is_ok()
    );

    if args.json {
        let report = serde_json::to_string(&Report::from_result(&result)).map_err(CliError::Report)?;
        println!("{}", report);
    }

    match result {
        Ok(()) => {
            if !args.json {
                println!("ok");
            }
            Ok(Outcome::Match)
        }
        Err(failure) => {
            eprintln!("{}", failure.stack());
            Ok(Outcome::Mismatch)
        }
    }
}

fn resolve_options<F>(args: &CompareArgs, env: F) -> Result<CompareOptions, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut options = match &args.config {
        Some(path) => CompareOptions::from_yaml_file(path)?,
        None => CompareOptions::from_lookup(env)?,
    };
    if let Some(epsilon) = args.epsilon {
        options.epsilon = epsilon;
    }
    if let Some(max_depth) = args.max_depth {
        options.max_depth = Some(max_depth);
    }
    options.validate()?;
    Ok(options)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false)
}

/// Read a JSON document, or YAML for `.yaml`/`.yml` files
fn load_document(path: &Path) -> Result<Value, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: serde_json::Value = if is_yaml(path) {
        serde_yaml::from_str(&text).map_err(|source| CliError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(Value::from(document))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(epsilon: Option<f64>, max_depth: Option<usize>) -> CompareArgs {
        CompareArgs {
            actual: PathBuf::from("a.json"),
            expected: PathBuf::from("b.json"),
            epsilon,
            max_depth,
            config: None,
            json: false,
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_flags_override_options() {
        let options = resolve_options(&args(Some(0.5), Some(3)), no_env).unwrap();
        assert_eq!(options.epsilon, 0.5);
        assert_eq!(options.max_depth, Some(3));
    }

    #[test]
    fn test_environment_fills_unset_flags() {
        let env = |var: &str| match var {
            "DEEPASSERT_EPSILON" => Some("0.25".to_string()),
            "DEEPASSERT_MAX_DEPTH" => Some("9".to_string()),
            _ => None,
        };
        let options = resolve_options(&args(None, Some(2)), env).unwrap();
        assert_eq!(options.epsilon, 0.25);
        assert_eq!(options.max_depth, Some(2));

        let options = resolve_options(&args(None, None), no_env).unwrap();
        assert_eq!(options, CompareOptions::default());
    }

    #[test]
    fn test_negative_epsilon_flag_rejected() {
        let err = resolve_options(&args(Some(-1.0), None), no_env).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::InvalidEpsilon { .. })));
    }

    #[test]
    fn test_yaml_detection() {
        assert!(is_yaml(Path::new("doc.yaml")));
        assert!(is_yaml(Path::new("doc.yml")));
        assert!(!is_yaml(Path::new("doc.json")));
        assert!(!is_yaml(Path::new("doc")));
    }

    #[test]
    fn test_report_shape() {
        let failure: Result<(), AssertionError> = deepassert_core::deep_close_to(
            &Value::from(serde_json::json!({"a": [1]})),
            &Value::from(serde_json::json!({"a": [2]})),
            None,
            None,
        );
        let report = serde_json::to_value(Report::from_result(&failure)).unwrap();
        assert_eq!(report["ok"], false);
        assert_eq!(report["code"], "ERR_TOLERANCE_EXCEEDED");
        assert_eq!(report["path"], serde_json::json!(["a", 0]));

        let report = serde_json::to_value(Report::from_result(&Ok(()))).unwrap();
        assert_eq!(report, serde_json::json!({"ok": true}));
    }
}
