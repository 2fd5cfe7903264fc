//! Character boundary index.
//!
//! Maps character positions to byte offsets so that n-grams can be sliced
//! on character boundaries rather than byte positions:
//!
//! ```text
//! text:     c   a   f   é       !
//! bytes:    63  61  66  c3 a9   21
//! offsets:  0   1   2   3       5
//! ```
//!
//! The index is derived data. It is rebuilt for every extraction call and
//! never cached.

use smallvec::SmallVec;

/// Inline capacity of [`Boundaries`]. Records shorter than this many
/// characters never touch the heap for their index.
pub const INLINE_BOUNDARIES: usize = 64;

/// Byte offset of each character start, in order.
pub type Boundaries = SmallVec<[usize; INLINE_BOUNDARIES]>;

/// Builds the boundary index of `text`.
///
/// One entry per character; entry `i` is the byte offset where character
/// `i` begins. The first entry (if any) is always `0`.
#[inline]
pub fn char_boundaries(text: &str) -> Boundaries {
    text.char_indices().map(|(offset, _)| offset).collect()
}

/// Number of characters in `text`.
///
/// Counts non-continuation bytes instead of decoding, since `text` is
/// already known to be valid UTF-8.
#[inline]
pub fn char_count(text: &str) -> usize {
    text.bytes().filter(|&b| !is_continuation(b)).count()
}

/// Returns true for `10xxxxxx` bytes.
#[inline(always)]
pub const fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}
