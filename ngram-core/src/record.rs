//! JSON field extraction for one input line.
//!
//! Each line of the corpus is an object with at least `id` (string),
//! `text` (string) and `label` (integer). Extra fields are ignored. The
//! views borrow from the line when the JSON string needs no unescaping.

use std::borrow::Cow;

use ngram_types::Label;
use serde::Deserialize;

use crate::error::{NgramError, Result};

/// All fields needed to build an [`ngram_types::NgramRecord`].
#[derive(Debug, Deserialize)]
pub struct RecordFields<'a> {
    /// Record identifier.
    #[serde(borrow)]
    pub id: Cow<'a, str>,
    /// Raw text to tokenize.
    #[serde(borrow)]
    pub text: Cow<'a, str>,
    /// Classification label.
    pub label: Label,
}

/// Only the `text` field, for single-line tokenization.
#[derive(Debug, Deserialize)]
pub struct TextField<'a> {
    /// Raw text to tokenize.
    #[serde(borrow)]
    pub text: Cow<'a, str>,
}

/// Parses a full record from one line.
///
/// # Errors
///
/// `NgramError::MalformedInput` if the line is not a JSON object or any of
/// `id`, `text`, `label` is missing or has the wrong type.
pub fn parse_record(line: &[u8]) -> Result<RecordFields<'_>> {
    ensure_object(line)?;
    Ok(serde_json::from_slice(line)?)
}

/// Parses only the `text` field from one line.
///
/// # Errors
///
/// `NgramError::MalformedInput` if the line is not a JSON object or `text`
/// is missing or not a string.
pub fn parse_text_field(line: &[u8]) -> Result<TextField<'_>> {
    ensure_object(line)?;
    Ok(serde_json::from_slice(line)?)
}

/// Rejects anything but a JSON object up front.
///
/// Derived struct deserializers also accept positional arrays, which would
/// turn `["x2","Hello",7]` into a record.
fn ensure_object(line: &[u8]) -> Result<()> {
    match line
        .iter()
        .copied()
        .find(|&b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
    {
        Some(b'{') => Ok(()),
        Some(_) => Err(NgramError::MalformedInput {
            reason: "expected a JSON object".into(),
        }),
        None => Err(NgramError::MalformedInput {
            reason: "empty line".into(),
        }),
    }
}
