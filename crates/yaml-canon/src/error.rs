//! Error types for canonical YAML formatting.

use crate::value::Value;
use std::fmt;
use thiserror::Error;

/// Result type alias for yaml-canon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, emitting, or validating.
///
/// Every variant aborts the operation; there is no partial output.
#[derive(Debug, Error)]
pub enum Error {
    /// The source holds more than one YAML document.
    #[error("multi-document streams are not supported (found {documents} documents)")]
    UnsupportedDocument { documents: usize },

    /// The node stream produced something the value tree cannot hold.
    #[error("unexpected {kind} node at line {line}, column {column}")]
    UnexpectedNodeKind {
        kind: String,
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
    },

    /// yaml-rust2 rejected the input.
    #[error("YAML syntax error: {0}")]
    Scan(#[from] yaml_rust2::ScanError),

    /// The canonical output does not load to the same value as the input.
    #[error("canonical output does not round-trip to the input value")]
    Integrity(Box<IntegrityReport>),
}

/// Everything needed to diagnose a failed round-trip check.
#[derive(Debug, Clone)]
pub struct IntegrityReport {
    /// The text the linter was constructed from
    pub original: String,

    /// The canonical text produced by `dump`
    pub generated: String,

    /// The original text as loaded, or the load error
    pub before: std::result::Result<Value, yaml_rust2::ScanError>,

    /// The generated text as loaded, or the load error
    pub after: std::result::Result<Value, yaml_rust2::ScanError>,
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "YAML mismatch")?;
        writeln!(f)?;
        writeln!(f, "before text:")?;
        writeln!(f, "{}", self.original)?;
        writeln!(f, "after text:")?;
        writeln!(f, "{}", self.generated)?;
        writeln!(f, "before value:")?;
        write_loaded(f, &self.before)?;
        writeln!(f, "after value:")?;
        write_loaded(f, &self.after)
    }
}

fn write_loaded(
    f: &mut fmt::Formatter<'_>,
    loaded: &std::result::Result<Value, yaml_rust2::ScanError>,
) -> fmt::Result {
    match loaded {
        Ok(value) => writeln!(f, "{value:?}"),
        Err(e) => writeln!(f, "load error: {e}"),
    }
}
