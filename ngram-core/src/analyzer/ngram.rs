//! Character n-gram extraction.
//!
//! Slides a window of `n` characters over normalized text. Windows are cut
//! at character boundaries, so a multi-byte character is never split.
//! For text of `L` characters, exactly `L - n + 1` n-grams are produced
//! when `L >= n`, and none otherwise.

use ngram_types::NgramSize;

use crate::analyzer::boundary::{char_boundaries, char_count, Boundaries};

/// Iterator over the n-grams of a normalized text, left to right.
///
/// Each item is a slice of the input, so iteration does not allocate
/// beyond the boundary index built up front.
///
/// # Example
///
/// ```
/// use ngram_core::analyzer::NgramWindows;
/// use ngram_types::NgramSize;
///
/// let n = NgramSize::new(3).unwrap();
/// let grams: Vec<&str> = NgramWindows::new("café", n).collect();
/// assert_eq!(grams, ["caf", "afé"]);
/// ```
#[derive(Debug, Clone)]
pub struct NgramWindows<'a> {
    text: &'a str,
    bounds: Boundaries,
    n: usize,
    next: usize,
    end: usize,
}

impl<'a> NgramWindows<'a> {
    /// Builds the boundary index of `text` and positions the window at the
    /// first character.
    pub fn new(text: &'a str, n: NgramSize) -> Self {
        let bounds = char_boundaries(text);
        let n = n.get();
        // One past the last valid start index; zero when the text is short.
        let end = (bounds.len() + 1).saturating_sub(n);
        Self {
            text,
            bounds,
            n,
            next: 0,
            end,
        }
    }

    /// Byte range of the window starting at character `i`.
    #[inline(always)]
    fn span(&self, i: usize) -> (usize, usize) {
        let start = self.bounds[i];
        let end = self
            .bounds
            .get(i + self.n)
            .copied()
            .unwrap_or(self.text.len());
        (start, end)
    }
}

impl<'a> Iterator for NgramWindows<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let (start, end) = self.span(self.next);
        self.next += 1;
        Some(&self.text[start..end])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NgramWindows<'_> {}

impl core::iter::FusedIterator for NgramWindows<'_> {}

/// Extracts every n-gram of `text` into a vector of slices.
///
/// Returns an empty vector when `text` has fewer than `n` characters.
#[inline]
pub fn extract_ngrams(text: &str, n: NgramSize) -> Vec<&str> {
    NgramWindows::new(text, n).collect()
}

/// Extracts n-grams with position information.
///
/// The callback receives `(ngram, char_position)`, where the position is the
/// character index (not byte offset) at which the n-gram starts.
#[inline]
pub fn for_each_ngram<'a, F>(text: &'a str, n: NgramSize, mut callback: F)
where
    F: FnMut(&'a str, usize),
{
    for (pos, gram) in NgramWindows::new(text, n).enumerate() {
        callback(gram, pos);
    }
}

/// Counts n-grams without building the boundary index.
#[inline]
pub fn count_ngrams(text: &str, n: NgramSize) -> usize {
    (char_count(text) + 1).saturating_sub(n.get())
}
