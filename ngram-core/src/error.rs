//! Error handling utilities shared across the crate.

use std::path::PathBuf;

use ngram_types::ConfigError;
use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = NgramError> = std::result::Result<T, E>;

/// Failures surfaced by the tokenizer.
///
/// Malformed UTF-8 inside a text field is not an error; those bytes are
/// dropped during normalization.
#[derive(Debug, Error)]
pub enum NgramError {
    /// Tokenizer configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// A single record is not valid JSON or lacks a required field.
    #[error("malformed input: {reason}")]
    MalformedInput {
        /// Description from the JSON layer.
        reason: String,
    },
    /// The input source could not be opened or read.
    #[error("io error while processing {path:?}: {source}")]
    Io {
        /// Underlying IO error returned by the standard library.
        source: std::io::Error,
        /// Input path associated with the failure.
        path: PathBuf,
    },
}

impl From<serde_json::Error> for NgramError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput {
            reason: err.to_string(),
        }
    }
}

impl NgramError {
    /// Helper constructor that attaches the path when wrapping IO errors.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    /// Returns true for per-record failures that batch processing skips.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}
