//! N-gram tokenizer facade.
//!
//! Ties the analyzer stages together for a fixed window width:
//!
//! ```text
//! raw bytes -> TextNormalizer -> normalized String -> NgramWindows -> n-grams
//! ```
//!
//! The tokenizer holds nothing but the immutable width, so it is `Copy`,
//! `Send` and `Sync`, and every call is independent of the previous one.

use log::trace;
use ngram_types::NgramSize;

use crate::analyzer::{NgramWindows, TextNormalizer};
use crate::error::Result;
use crate::record::parse_text_field;

/// Character n-gram tokenizer with a fixed window width.
///
/// # Example
///
/// ```
/// use ngram_core::NgramTokenizer;
///
/// let tokenizer = NgramTokenizer::new(3)?;
/// let grams = tokenizer.tokenize_text(r#"{"id":"x1","text":"Hello World","label":1}"#)?;
/// assert_eq!(grams, ["hel", "ell", "llo", "lo ", "o w", " wo", "wor", "orl", "rld"]);
/// # Ok::<(), ngram_core::NgramError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NgramTokenizer {
    n: NgramSize,
    normalizer: TextNormalizer,
}

impl NgramTokenizer {
    /// Creates a tokenizer producing n-grams of `n` characters.
    ///
    /// # Errors
    ///
    /// Returns `NgramError::InvalidConfiguration` if `n < 1`.
    pub fn new(n: usize) -> Result<Self> {
        Ok(Self::with_size(NgramSize::new(n)?))
    }

    /// Creates a tokenizer from an already validated width.
    #[inline]
    pub const fn with_size(n: NgramSize) -> Self {
        Self {
            n,
            normalizer: TextNormalizer::new(),
        }
    }

    /// Window width in characters.
    #[inline(always)]
    pub const fn n(&self) -> usize {
        self.n.get()
    }

    /// Window width as a validated size.
    #[inline(always)]
    pub const fn size(&self) -> NgramSize {
        self.n
    }

    /// Normalizes raw text bytes.
    #[inline]
    pub fn normalize(&self, raw: &[u8]) -> String {
        self.normalizer.normalize(raw)
    }

    /// Extracts n-grams from already normalized text.
    #[inline]
    pub fn extract<'t>(&self, normalized: &'t str) -> Vec<&'t str> {
        NgramWindows::new(normalized, self.n).collect()
    }

    /// Lazily iterates the n-grams of already normalized text.
    #[inline]
    pub fn windows<'t>(&self, normalized: &'t str) -> NgramWindows<'t> {
        NgramWindows::new(normalized, self.n)
    }

    /// Normalizes a text field and extracts its n-grams.
    ///
    /// Equivalent to `extract(&normalize(text))` with owned results. An
    /// absent text field never reaches this point; it is reported by the
    /// JSON layer (see [`NgramTokenizer::tokenize_text`]).
    pub fn tokenize_record_text(&self, text: &[u8]) -> Vec<String> {
        let mut buf = String::with_capacity(text.len());
        self.tokenize_into(text, &mut buf)
    }

    /// Same as [`NgramTokenizer::tokenize_record_text`], normalizing into a
    /// caller-provided buffer so batch loops can reuse one allocation.
    pub fn tokenize_into(&self, text: &[u8], buf: &mut String) -> Vec<String> {
        let dropped = self.normalizer.normalize_into(text, buf);
        if dropped > 0 {
            trace!("dropped {dropped} malformed UTF-8 bytes during normalization");
        }
        NgramWindows::new(buf, self.n).map(str::to_owned).collect()
    }

    /// Tokenizes the `text` field of one JSON line.
    ///
    /// # Errors
    ///
    /// Returns `NgramError::MalformedInput` if the line is not valid JSON or
    /// has no string `text` field.
    pub fn tokenize_text(&self, line: &str) -> Result<Vec<String>> {
        let field = parse_text_field(line.as_bytes())?;
        Ok(self.tokenize_record_text(field.text.as_bytes()))
    }
}
