//! N-gram Pipeline Benchmarking Tool
//!
//! Measures throughput of the extraction pipeline on a large raw text file,
//! such as a dump of review texts. The file does not need to be valid UTF-8;
//! malformed bytes are dropped by the normalizer exactly as they would be in
//! a record's text field.
//!
//! ## What It Benchmarks
//!
//! 1. **Normalize**: lowercasing, whitespace collapsing, malformed byte dropping
//! 2. **Extract**: boundary index + sliding window over pre-normalized text
//! 3. **Pipeline**: normalize + extract together, n-grams materialized
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/ngram_bench /path/to/corpus.txt
//! ./target/release/ngram_bench /path/to/corpus.txt -n 6 --runs 10
//! ```
//!
//! Build with `--release`; use a large input (100MB+) for stable numbers.

use std::fmt;
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use ngram_core::analyzer::{NgramWindows, TextNormalizer};
use ngram_core::NgramSize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Throughput benchmark for n-gram extraction", long_about = None)]
struct Args {
    /// Raw text file to benchmark on
    path: PathBuf,

    /// N-gram width in characters
    #[arg(short = 'n', long = "size", default_value_t = 3)]
    size: usize,

    /// Warmup iterations per mode
    #[arg(long, default_value_t = 1)]
    warmup: usize,

    /// Measured iterations per mode
    #[arg(long, default_value_t = 5)]
    runs: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let n = NgramSize::new(args.size).context("invalid n-gram size")?;
    let timing = Timing {
        warmup: args.warmup,
        runs: args.runs.max(1),
    };

    let input = fs::read(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    println!("input: {:.2} MiB, n = {n}, {} runs", mib(input.len()), timing.runs);

    println!("{}", bench_normalize(&input, timing));
    println!("{}", bench_extract(&input, n, timing));
    println!("{}", bench_pipeline(&input, n, timing));

    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    warmup: usize,
    runs: u32,
}

impl Timing {
    /// Runs `f` `warmup` times untimed, then returns the mean of `runs` timed calls.
    fn mean<F: FnMut()>(self, mut f: F) -> Duration {
        (0..self.warmup).for_each(|_| f());
        let start = Instant::now();
        (0..self.runs).for_each(|_| f());
        start.elapsed() / self.runs
    }
}

/// One benchmark result line.
#[derive(Debug)]
struct Perf {
    mode: &'static str,
    bytes: usize,
    elapsed: Duration,
    ngrams: usize,
}

impl fmt::Display for Perf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed.as_secs_f64().max(f64::MIN_POSITIVE);
        write!(
            f,
            "{:<9} {:>9.3} ms {:>10.1} MiB/s",
            self.mode,
            secs * 1e3,
            mib(self.bytes) / secs
        )?;
        if self.ngrams > 0 {
            write!(
                f,
                " {:>12} n-grams {:>8.2} M n-grams/s",
                self.ngrams,
                self.ngrams as f64 / secs / 1e6
            )?;
        }
        Ok(())
    }
}

fn mib(bytes: usize) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

fn bench_normalize(input: &[u8], timing: Timing) -> Perf {
    let normalizer = TextNormalizer::new();
    let mut out = String::with_capacity(input.len());
    let elapsed = timing.mean(|| {
        normalizer.normalize_into(input, &mut out);
    });
    Perf {
        mode: "normalize",
        bytes: input.len(),
        elapsed,
        ngrams: 0,
    }
}

fn bench_extract(input: &[u8], n: NgramSize, timing: Timing) -> Perf {
    let normalized = TextNormalizer::new().normalize(input);
    let mut ngrams = 0;
    let elapsed = timing.mean(|| {
        ngrams = NgramWindows::new(&normalized, n).map(black_box).count();
    });
    Perf {
        mode: "extract",
        bytes: normalized.len(),
        elapsed,
        ngrams,
    }
}

fn bench_pipeline(input: &[u8], n: NgramSize, timing: Timing) -> Perf {
    let normalizer = TextNormalizer::new();
    let mut buf = String::with_capacity(input.len());
    let mut ngrams = 0;
    let elapsed = timing.mean(|| {
        normalizer.normalize_into(input, &mut buf);
        let grams: Vec<String> = NgramWindows::new(&buf, n).map(str::to_owned).collect();
        ngrams = grams.len();
        black_box(grams);
    });
    Perf {
        mode: "pipeline",
        bytes: input.len(),
        elapsed,
        ngrams,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_runs_warmup_and_measured_calls() {
        let mut calls = 0;
        let timing = Timing { warmup: 2, runs: 3 };
        timing.mean(|| calls += 1);
        assert_eq!(calls, 5);
    }

    #[test]
    fn perf_line_reports_ngrams_only_when_counted() {
        let perf = Perf {
            mode: "extract",
            bytes: 1024 * 1024,
            elapsed: Duration::from_secs(1),
            ngrams: 2_000_000,
        };
        let line = perf.to_string();
        assert!(line.starts_with("extract"), "{line}");
        assert!(line.contains("1.0 MiB/s"), "{line}");
        assert!(line.contains("2000000 n-grams"), "{line}");
        assert!(line.contains("2.00 M n-grams/s"), "{line}");

        let perf = Perf { ngrams: 0, ..perf };
        assert!(!perf.to_string().contains("n-grams"));
    }

    #[test]
    fn extract_bench_counts_windows() {
        let n = NgramSize::new(3).unwrap();
        let perf = bench_extract(b"Hello World", n, Timing { warmup: 0, runs: 1 });
        assert_eq!(perf.ngrams, 9);
        assert_eq!(perf.bytes, "hello world".len());
    }
}
