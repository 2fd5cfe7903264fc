//! Command line front end for the n-gram tokenizer.
//!
//! ```bash
//! # Summaries (first and last record) for each file, trigrams
//! ngram data/eng.imdb.test.jsonl data/spa.muchocine.test.jsonl
//!
//! # One JSON record per line, 4-grams
//! ngram -n 4 --json data/eng.imdb.test.jsonl > grams.jsonl
//!
//! # Corpus statistics and the 20 most frequent n-grams
//! ngram --stats --top 20 data/eng.imdb.test.jsonl
//! ```
//!
//! Skipped lines are reported on stderr through the logger; pass `-q` to
//! silence them.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::info;
use ngram_core::{CorpusStats, NgramCounter, NgramRecord, NgramTokenizer};

#[derive(Parser, Debug)]
#[command(author, version, about = "Character n-gram tokenizer for JSON-lines corpora", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, global = true, action = ArgAction::Count)]
    quiet: u8,

    /// N-gram width in characters
    #[arg(short = 'n', long = "size", value_name = "N", default_value_t = 3)]
    size: usize,

    /// Emit one JSON record per line instead of summaries
    #[arg(long)]
    json: bool,

    /// Number of leading n-grams shown per summarized record
    #[arg(long, value_name = "K", default_value_t = 5)]
    preview: usize,

    /// Print corpus statistics for each file
    #[arg(long)]
    stats: bool,

    /// Print the K most frequent n-grams for each file
    #[arg(long, value_name = "K")]
    top: Option<usize>,

    /// JSON-lines files to process
    #[arg(required = true, value_name = "FILE")]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let tokenizer = NgramTokenizer::new(cli.size).context("invalid n-gram size")?;
    info!("using {}-grams", tokenizer.n());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for path in &cli.inputs {
        let report = tokenizer
            .process_file_report(path)
            .with_context(|| format!("failed to process {}", path.display()))?;

        if cli.json {
            for record in &report.records {
                serde_json::to_writer(&mut out, record)?;
                writeln!(out)?;
            }
        } else {
            writeln!(out, "\nProcessing file: {}", path.display())?;
            writeln!(out, "----------------------------------------")?;
            match (report.records.first(), report.records.last()) {
                (Some(first), Some(last)) => {
                    writeln!(out, "First result:")?;
                    print_record(&mut out, first, cli.preview)?;
                    writeln!(out, "Last result:")?;
                    print_record(&mut out, last, cli.preview)?;
                    writeln!(out, "Total processed items: {}", report.records.len())?;
                }
                _ => writeln!(out, "No results found in file.")?,
            }
        }

        // Statistics go to stderr in JSON mode so stdout stays parseable.
        if cli.stats {
            let stats = CorpusStats::from_report(&report);
            if cli.json {
                eprintln!("{}: {}", path.display(), stats);
            } else {
                writeln!(out, "Stats: {}", stats)?;
            }
        }

        if let Some(k) = cli.top {
            let mut counter = NgramCounter::new();
            counter.extend(&report.records);
            for (gram, count) in counter.most_common(k) {
                if cli.json {
                    eprintln!("{:?}\t{}", gram, count);
                } else {
                    writeln!(out, "{:?}\t{}", gram, count)?;
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn print_record(out: &mut impl Write, record: &NgramRecord, preview: usize) -> io::Result<()> {
    writeln!(out, "ID: {}", record.id)?;
    writeln!(out, "Label: {}", record.label)?;
    write!(out, "First {} n-grams: ", preview)?;
    for gram in record.ngrams.iter().take(preview) {
        write!(out, "'{}' ", gram)?;
    }
    writeln!(out, "\nTotal n-grams: {}\n", record.ngrams.len())
}

fn init_logging(verbose: u8, quiet: u8) {
    use log::LevelFilter;

    let level = if quiet > 0 {
        match quiet {
            1 => LevelFilter::Error,
            _ => LevelFilter::Off,
        }
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp_millis();
    builder.filter_level(level);
    let _ = builder.try_init();
}
