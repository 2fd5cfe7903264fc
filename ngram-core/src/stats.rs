//! Corpus statistics and n-gram frequency counting.

use ngram_types::{Label, NgramRecord};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::batch::BatchReport;

/// A snapshot of corpus statistics.
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    /// Number of tokenized records.
    pub num_records: usize,
    /// Number of lines skipped as malformed.
    pub skipped_lines: usize,
    /// Total n-grams across all records.
    pub total_ngrams: usize,
    /// Number of distinct n-grams.
    pub unique_ngrams: usize,
    /// Records with no n-grams (text shorter than the window).
    pub empty_records: usize,
    /// Record count per label.
    pub label_counts: FxHashMap<Label, usize>,
}

impl CorpusStats {
    /// Computes statistics over tokenized records.
    pub fn from_records(records: &[NgramRecord]) -> Self {
        let mut unique: FxHashSet<&str> = FxHashSet::default();
        let mut stats = Self {
            num_records: records.len(),
            ..Self::default()
        };

        for record in records {
            stats.total_ngrams += record.ngrams.len();
            if record.ngrams.is_empty() {
                stats.empty_records += 1;
            }
            *stats.label_counts.entry(record.label).or_insert(0) += 1;
            unique.extend(record.ngrams.iter().map(String::as_str));
        }

        stats.unique_ngrams = unique.len();
        stats
    }

    /// Computes statistics over a batch, including skipped lines.
    pub fn from_report(report: &BatchReport) -> Self {
        Self {
            skipped_lines: report.skipped.len(),
            ..Self::from_records(&report.records)
        }
    }

    /// Mean n-grams per record, 0.0 for an empty corpus.
    pub fn mean_ngrams(&self) -> f64 {
        if self.num_records == 0 {
            0.0
        } else {
            self.total_ngrams as f64 / self.num_records as f64
        }
    }

    /// Label counts sorted by label.
    pub fn sorted_labels(&self) -> Vec<(Label, usize)> {
        let mut labels: Vec<_> = self.label_counts.iter().map(|(&l, &c)| (l, c)).collect();
        labels.sort_unstable();
        labels
    }
}

impl core::fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} records, {} skipped, {} n-grams ({} unique, {:.1} per record)",
            self.num_records,
            self.skipped_lines,
            self.total_ngrams,
            self.unique_ngrams,
            self.mean_ngrams()
        )?;

        for (label, count) in self.sorted_labels() {
            write!(f, ", label {}: {}", label, count)?;
        }

        Ok(())
    }
}

/// Frequency table over n-grams.
#[derive(Debug, Clone, Default)]
pub struct NgramCounter {
    counts: FxHashMap<String, u64>,
    total: u64,
}

impl NgramCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one n-gram occurrence.
    pub fn add(&mut self, ngram: &str) {
        if let Some(count) = self.counts.get_mut(ngram) {
            *count += 1;
        } else {
            self.counts.insert(ngram.to_owned(), 1);
        }
        self.total += 1;
    }

    /// Counts every n-gram of a record.
    pub fn add_record(&mut self, record: &NgramRecord) {
        for gram in &record.ngrams {
            self.add(gram);
        }
    }

    /// Occurrences of `ngram`.
    pub fn count(&self, ngram: &str) -> u64 {
        self.counts.get(ngram).copied().unwrap_or(0)
    }

    /// Number of distinct n-grams seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total occurrences counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The `k` most frequent n-grams, highest count first.
    ///
    /// Equal counts are ordered lexicographically so the output is stable.
    pub fn most_common(&self, k: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(gram, &count)| (gram.as_str(), count))
            .collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(k);
        entries
    }
}

impl<'a> Extend<&'a NgramRecord> for NgramCounter {
    fn extend<I: IntoIterator<Item = &'a NgramRecord>>(&mut self, iter: I) {
        for record in iter {
            self.add_record(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::NgramTokenizer;

    fn record(id: &str, grams: &[&str], label: Label) -> NgramRecord {
        NgramRecord::new(id, grams.iter().map(|g| g.to_string()).collect(), label)
    }

    #[test]
    fn stats_over_records() {
        let records = [
            record("a", &["abc", "bcd"], 1),
            record("b", &["abc"], 0),
            record("c", &[], 1),
        ];
        let stats = CorpusStats::from_records(&records);
        assert_eq!(stats.num_records, 3);
        assert_eq!(stats.total_ngrams, 3);
        assert_eq!(stats.unique_ngrams, 2);
        assert_eq!(stats.empty_records, 1);
        assert_eq!(stats.sorted_labels(), [(0, 1), (1, 2)]);
        assert!((stats.mean_ngrams() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_from_report_counts_skips() {
        let tokenizer = NgramTokenizer::new(2).unwrap();
        let report = tokenizer.process_bytes(
            b"{\"id\":\"1\",\"text\":\"abab\",\"label\":3}\nbroken\n{\"id\":\"2\",\"text\":\"b\",\"label\":3}\n",
        );
        let stats = CorpusStats::from_report(&report);
        assert_eq!(stats.num_records, 2);
        assert_eq!(stats.skipped_lines, 1);
        assert_eq!(stats.total_ngrams, 3);
        assert_eq!(stats.unique_ngrams, 2);
        assert_eq!(stats.label_counts.get(&3), Some(&2));
    }

    #[test]
    fn empty_corpus() {
        let stats = CorpusStats::from_records(&[]);
        assert_eq!(stats.num_records, 0);
        assert_eq!(stats.mean_ngrams(), 0.0);
        assert!(stats.label_counts.is_empty());
    }

    #[test]
    fn display_summary() {
        let stats = CorpusStats::from_records(&[record("a", &["ab", "bc"], 1)]);
        assert_eq!(
            stats.to_string(),
            "1 records, 0 skipped, 2 n-grams (2 unique, 2.0 per record), label 1: 1"
        );
    }

    #[test]
    fn counter_counts_and_ranks() {
        let mut counter = NgramCounter::new();
        let records = [record("a", &["ab", "bc", "ab"], 0), record("b", &["bc", "zz"], 1)];
        counter.extend(&records);

        assert_eq!(counter.count("ab"), 2);
        assert_eq!(counter.count("bc"), 2);
        assert_eq!(counter.count("missing"), 0);
        assert_eq!(counter.len(), 3);
        assert_eq!(counter.total(), 5);
        assert_eq!(counter.most_common(2), [("ab", 2), ("bc", 2)]);
        assert_eq!(counter.most_common(10).len(), 3);
    }

    #[test]
    fn empty_counter() {
        let counter = NgramCounter::new();
        assert!(counter.is_empty());
        assert!(counter.most_common(5).is_empty());
    }
}
