//! Core types shared by the n-gram tokenizer crates.
//!
//! Kept separate from `ngram-core` so that downstream consumers (CLI,
//! classifiers, bindings) can depend on the record shape without pulling
//! in the extraction pipeline:
//!
//! - **`NgramSize`**: validated window width, guaranteed `>= 1`
//! - **`NgramRecord`**: one tokenized input line `(id, ngrams, label)`
//! - **`ConfigError`**: construction-time validation failures

#![warn(missing_docs)]

use core::fmt;
use core::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Classification label carried through from the input record.
pub type Label = i64;

/// N-gram window width, in characters.
///
/// A zero width is unrepresentable; construction goes through
/// [`NgramSize::new`], which rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NgramSize(NonZeroUsize);

impl NgramSize {
    /// Single-character "n-grams".
    pub const UNIGRAM: Self = Self(NonZeroUsize::MIN);

    /// Creates a window width.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidNgramSize` when `n == 0`.
    #[inline]
    pub const fn new(n: usize) -> Result<Self, ConfigError> {
        match NonZeroUsize::new(n) {
            Some(n) => Ok(Self(n)),
            None => Err(ConfigError::InvalidNgramSize { n }),
        }
    }

    /// Returns the width as a plain integer.
    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for NgramSize {
    type Error = ConfigError;

    #[inline]
    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<NgramSize> for usize {
    #[inline(always)]
    fn from(n: NgramSize) -> Self {
        n.get()
    }
}

impl fmt::Display for NgramSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Errors raised while configuring a tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested n-gram width is below the minimum of 1.
    InvalidNgramSize {
        /// The rejected width.
        n: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNgramSize { n } => {
                write!(f, "n-gram size must be at least 1 (got {})", n)
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// One tokenized input record.
///
/// `id` and `label` are opaque pass-through values; only `ngrams` is
/// produced by the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramRecord {
    /// Record identifier from the `id` field.
    pub id: String,
    /// N-grams of the normalized `text` field, left to right.
    pub ngrams: Vec<String>,
    /// Classification label from the `label` field.
    pub label: Label,
}

impl NgramRecord {
    /// Creates a record.
    pub fn new(id: impl Into<String>, ngrams: Vec<String>, label: Label) -> Self {
        Self {
            id: id.into(),
            ngrams,
            label,
        }
    }

    /// Number of n-grams in the record.
    #[inline]
    pub fn len(&self) -> usize {
        self.ngrams.len()
    }

    /// Returns true if the text was shorter than the window.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ngrams.is_empty()
    }

    /// N-grams joined by single spaces.
    ///
    /// This is the "document" form handed to bag-of-words classifiers,
    /// where each n-gram becomes one term.
    pub fn joined(&self) -> String {
        self.ngrams.join(" ")
    }
}

impl fmt::Display for NgramRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} label={} ngrams={}",
            self.id,
            self.label,
            self.ngrams.len()
        )
    }
}
