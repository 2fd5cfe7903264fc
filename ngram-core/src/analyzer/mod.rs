//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Lowercases ASCII, collapses whitespace, drops malformed UTF-8
//! - **Boundary**: Maps character positions to byte offsets
//! - **Ngram**: Slides a fixed-width character window over normalized text

pub mod boundary;
pub mod ngram;
pub mod normalizer;

pub use boundary::{char_boundaries, char_count, Boundaries};
pub use ngram::{count_ngrams, extract_ngrams, for_each_ngram, NgramWindows};
pub use normalizer::TextNormalizer;
