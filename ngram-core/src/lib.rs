//! UTF-8 aware character n-gram extraction for JSON-lines corpora.
//!
//! Each input line is a JSON object with `id`, `text` and `label`. The
//! `text` field is normalized (ASCII lowercasing, whitespace collapsing,
//! malformed UTF-8 dropped) and then cut into overlapping windows of `n`
//! characters. Windows are cut on character boundaries, never inside a
//! multi-byte character.
//!
//! ```no_run
//! use ngram_core::NgramTokenizer;
//!
//! # fn main() -> ngram_core::Result<()> {
//! let tokenizer = NgramTokenizer::new(3)?;
//! for record in tokenizer.process_file("data/eng.imdb.test.jsonl")? {
//!     println!("{} ({}): {} n-grams", record.id, record.label, record.ngrams.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The `ngram` and `ngram_bench` binaries are enabled by the default `cli`
//! feature; library users can opt out with `default-features = false`.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod analyzer;
pub mod batch;
pub mod error;
pub mod record;
pub mod stats;
pub mod tokenizer;

pub use batch::{BatchReport, SkippedLine};
pub use error::{NgramError, Result};
pub use ngram_types::{ConfigError, Label, NgramRecord, NgramSize};
pub use stats::{CorpusStats, NgramCounter};
pub use tokenizer::NgramTokenizer;
