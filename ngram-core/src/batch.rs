//! Batch processing of newline-delimited JSON corpora.
//!
//! Every line is parsed and tokenized independently. A line that fails to
//! parse, or lacks `id`, `text` or `label`, is reported on the `log`
//! channel at `warn` level and skipped; the batch carries on with the next
//! line. Only failing to read the input aborts a batch, and then no partial
//! results are returned.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use memchr::memchr_iter;
use ngram_types::NgramRecord;

use crate::error::{NgramError, Result};
use crate::record::parse_record;
use crate::tokenizer::NgramTokenizer;

/// A line that was skipped during batch processing.
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number within the input.
    pub line_number: usize,
    /// Why the line was rejected. Always `NgramError::MalformedInput`.
    pub error: NgramError,
}

/// Outcome of processing one input.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully tokenized records, in input order.
    pub records: Vec<NgramRecord>,
    /// Lines rejected by the JSON layer, in input order.
    pub skipped: Vec<SkippedLine>,
}

impl BatchReport {
    /// Number of lines looked at (tokenized plus skipped).
    pub fn lines_seen(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// Iterates lines of `input` split on `\n`.
///
/// A trailing newline does not produce an extra empty line; a final line
/// without a newline is still yielded.
fn split_lines(input: &[u8]) -> impl Iterator<Item = &[u8]> + '_ {
    let mut start = 0usize;
    let mut breaks = memchr_iter(b'\n', input);
    std::iter::from_fn(move || match breaks.next() {
        Some(i) => {
            let line = &input[start..i];
            start = i + 1;
            Some(line)
        }
        None if start < input.len() => {
            let line = &input[start..];
            start = input.len();
            Some(line)
        }
        None => None,
    })
}

impl NgramTokenizer {
    /// Parses and tokenizes one JSON line into a record.
    ///
    /// # Errors
    ///
    /// Returns `NgramError::MalformedInput` if the line is not valid JSON or
    /// any required field is missing or mistyped.
    pub fn tokenize_record(&self, line: &[u8], buf: &mut String) -> Result<NgramRecord> {
        let fields = parse_record(line)?;
        let ngrams = self.tokenize_into(fields.text.as_bytes(), buf);
        Ok(NgramRecord::new(fields.id, ngrams, fields.label))
    }

    /// Tokenizes every line of an in-memory JSON-lines buffer.
    ///
    /// Never fails: malformed lines are logged and collected in
    /// [`BatchReport::skipped`].
    pub fn process_bytes(&self, input: &[u8]) -> BatchReport {
        let mut report = BatchReport::default();
        let mut buf = String::new();

        for (idx, line) in split_lines(input).enumerate() {
            let line_number = idx + 1;
            match self.tokenize_record(line, &mut buf) {
                Ok(record) => report.records.push(record),
                Err(error) => {
                    warn!("skipping line {line_number}: {error}");
                    report.skipped.push(SkippedLine { line_number, error });
                }
            }
        }

        report
    }

    /// Processes a JSON-lines file and returns the full report.
    ///
    /// # Errors
    ///
    /// Returns `NgramError::Io` if the file cannot be opened or read.
    pub fn process_file_report(&self, path: impl AsRef<Path>) -> Result<BatchReport> {
        let path = path.as_ref();
        let input = fs::read(path).map_err(|err| NgramError::io(err, path))?;
        debug!("read {} bytes from {}", input.len(), path.display());

        let report = self.process_bytes(&input);
        debug!(
            "{}: {} records, {} skipped lines",
            path.display(),
            report.records.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Processes a JSON-lines file into `(id, ngrams, label)` records.
    ///
    /// Malformed lines are skipped and reported on the `log` channel.
    ///
    /// # Errors
    ///
    /// Returns `NgramError::Io` if the file cannot be opened or read.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<Vec<NgramRecord>> {
        Ok(self.process_file_report(path)?.records)
    }

    /// Processes several files in order.
    ///
    /// # Errors
    ///
    /// Stops at the first unreadable file and returns its `NgramError::Io`.
    pub fn process_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<BatchReport>> {
        paths
            .iter()
            .map(|path| self.process_file_report(path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> NgramTokenizer {
        NgramTokenizer::new(3).unwrap()
    }

    fn lines(input: &[u8]) -> Vec<&[u8]> {
        split_lines(input).collect()
    }

    #[test]
    fn split_handles_trailing_newline() {
        let expected = vec![b"a".as_slice(), b"b".as_slice()];
        assert_eq!(lines(b"a\nb\n"), expected);
        assert_eq!(lines(b"a\nb"), expected);
        assert!(lines(b"").is_empty());
    }

    #[test]
    fn split_keeps_interior_empty_lines() {
        let expected = vec![b"a".as_slice(), b"".as_slice(), b"b".as_slice()];
        assert_eq!(lines(b"a\n\nb"), expected);
        assert_eq!(lines(b"\n"), vec![b"".as_slice()]);
    }

    #[test]
    fn process_bytes_keeps_order_and_fields() {
        let input = concat!(
            r#"{"id":"a","text":"Hello","label":1}"#,
            "\n",
            r#"{"id":"b","text":"World!","label":0}"#,
            "\n",
        );
        let report = tokenizer().process_bytes(input.as_bytes());
        assert!(report.skipped.is_empty());
        assert_eq!(
            report.records,
            [
                NgramRecord::new("a", vec!["hel".into(), "ell".into(), "llo".into()], 1),
                NgramRecord::new(
                    "b",
                    vec!["wor".into(), "orl".into(), "rld".into(), "ld!".into()],
                    0
                ),
            ]
        );
    }

    #[test]
    fn invalid_line_is_skipped() {
        let input = concat!(
            r#"{"id":"1","text":"one line","label":1}"#,
            "\n",
            "{not json",
            "\n",
            r#"{"id":"3","text":"three","label":0}"#,
        );
        let report = tokenizer().process_bytes(input.as_bytes());
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].id, "1");
        assert_eq!(report.records[1].id, "3");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 2);
        assert!(report.skipped[0].error.is_malformed_input());
        assert_eq!(report.lines_seen(), 3);
    }

    #[test]
    fn missing_field_is_skipped() {
        let input = concat!(
            r#"{"id":"1","text":"abc","label":1}"#,
            "\n",
            r#"{"id":"2","label":1}"#,
            "\n",
            r#"{"id":"3","text":"abc"}"#,
            "\n",
        );
        let report = tokenizer().process_bytes(input.as_bytes());
        assert_eq!(report.records.len(), 1);
        let skipped: Vec<usize> = report.skipped.iter().map(|s| s.line_number).collect();
        assert_eq!(skipped, [2, 3]);
    }

    #[test]
    fn array_line_is_skipped() {
        let input = concat!(
            r#"{"id":"1","text":"abc","label":1}"#,
            "\n",
            r#"["x2","Hello",7]"#,
            "\n",
            r#"{"id":"3","text":"abc","label":0}"#,
            "\n",
        );
        let report = tokenizer().process_bytes(input.as_bytes());
        let ids: Vec<&str> = report.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 2);
        assert!(report.skipped[0].error.is_malformed_input());
    }

    #[test]
    fn empty_interior_line_is_skipped() {
        let input = b"{\"id\":\"1\",\"text\":\"abc\",\"label\":1}\n\n{\"id\":\"2\",\"text\":\"abc\",\"label\":1}\n";
        let report = tokenizer().process_bytes(input);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 2);
    }

    #[test]
    fn crlf_lines_are_accepted() {
        let input = b"{\"id\":\"1\",\"text\":\"abc\",\"label\":1}\r\n{\"id\":\"2\",\"text\":\"abcd\",\"label\":2}\r\n";
        let report = tokenizer().process_bytes(input);
        assert!(report.skipped.is_empty());
        assert_eq!(report.records[1].ngrams, ["abc", "bcd"]);
    }

    #[test]
    fn short_text_gives_empty_ngrams_not_a_skip() {
        let report = tokenizer().process_bytes(br#"{"id":"s","text":"ab","label":5}"#);
        assert!(report.skipped.is_empty());
        assert_eq!(report.records[0], NgramRecord::new("s", Vec::new(), 5));
    }

    #[test]
    fn record_with_invalid_utf8_is_skipped() {
        // JSON strings must be valid UTF-8; raw invalid bytes are rejected
        // by the JSON layer before normalization sees them.
        let report = tokenizer().process_bytes(b"{\"id\":\"1\",\"text\":\"ab\xFFc\",\"label\":1}");
        assert!(report.records.is_empty());
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = tokenizer()
            .process_file("definitely/not/here.jsonl")
            .unwrap_err();
        assert!(matches!(err, NgramError::Io { .. }));
    }
}
