//! Text normalization.
//!
//! Turns raw, possibly malformed bytes into lowercase-ASCII, single-spaced,
//! always valid UTF-8 text ready for n-gram windowing.

/// ASCII whitespace as understood by the C locale: space, tab, newline,
/// vertical tab, form feed and carriage return.
#[inline(always)]
pub const fn is_ascii_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// UTF-8 aware text normalizer.
///
/// Performs the following operations in a single forward pass:
/// - Lowercases ASCII letters (`A`-`Z` only; non-ASCII is never case-folded)
/// - Collapses runs of ASCII whitespace into one space
/// - Drops leading whitespace entirely
/// - Drops malformed UTF-8 sequences without substituting anything
///
/// Well-formed multi-byte characters are copied through unchanged. Trailing
/// whitespace leaves at most one trailing space, which keeps the operation
/// idempotent.
///
/// # Examples
///
/// ```
/// use ngram_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// assert_eq!(normalizer.normalize(b"  HELLO \t WORLD"), "hello world");
/// assert_eq!(normalizer.normalize("Café".as_bytes()), "café");
/// assert_eq!(normalizer.normalize(b"ab\x80c"), "abc");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Creates a normalizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes raw bytes into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity. Returns the
    /// number of input bytes that were dropped as malformed UTF-8.
    ///
    /// Decoding uses the standard library's chunked UTF-8 decoder: every
    /// chunk is a run of valid text followed by the maximal invalid subpart
    /// that stopped it. The invalid subpart contributes nothing; scanning
    /// resumes at the first byte that could start a new character.
    pub fn normalize_into(&self, raw: &[u8], out: &mut String) -> usize {
        out.clear();
        out.reserve(raw.len());

        let mut dropped = 0usize;

        for chunk in raw.utf8_chunks() {
            for ch in chunk.valid().chars() {
                if ch.is_ascii() {
                    push_ascii(ch as u8, out);
                } else {
                    out.push(ch);
                }
            }
            dropped += chunk.invalid().len();
        }

        dropped
    }

    /// Normalizes raw bytes and returns a new String.
    #[inline]
    pub fn normalize(&self, raw: &[u8]) -> String {
        let mut out = String::with_capacity(raw.len());
        self.normalize_into(raw, &mut out);
        out
    }

    /// Normalizes text that is already known to be valid UTF-8.
    #[inline]
    pub fn normalize_str(&self, text: &str) -> String {
        self.normalize(text.as_bytes())
    }
}

#[inline(always)]
fn push_ascii(b: u8, out: &mut String) {
    if is_ascii_ws(b) {
        if !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    } else {
        out.push(b.to_ascii_lowercase() as char);
    }
}
