//! CLI tool that decodes a pipe-separated file and prints its records as JSON.
//!
//! # Usage
//!
//! ```bash
//! # One JSON object per record
//! psv-dump --input accounts.psv
//!
//! # Decode every record into a typed account
//! psv-dump --input accounts.psv --as account
//!
//! # Read from stdin, semicolon-separated, write to a file
//! cat data.txt | psv-dump --delimiter ';' --output data.jsonl
//!
//! # Reader settings from a JSON file
//! RUST_LOG=debug psv-dump -i accounts.psv --config reader.json
//! ```

mod account;

use std::{
    fs::{self, File},
    io::{BufWriter, Read, Write, stdin, stdout},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use psv_decoder::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::account::Account;

/// Decode a pipe-separated file and print every record as a JSON object.
///
/// The first line of the input is the header. Each following line becomes
/// one object keyed by header names, or a typed value with `--as`.
#[derive(Parser, Debug)]
#[command(name = "psv-dump")]
#[command(version, about)]
struct Args {
    /// Input file path. If not specified, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file path. If not specified, writes to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with reader settings (`delimiter`, `trim_leading_space`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field delimiter. Overrides the config file.
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Shape of each printed record.
    #[arg(long = "as", value_enum, default_value_t = Shape::Record)]
    shape: Shape,

    /// Pretty-print each record.
    #[arg(long)]
    pretty: bool,
}

/// What each record is printed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Shape {
    /// Field name to raw string value.
    Record,
    /// Typed account (`AccountID`, `PlanID`, `PlanSegCreateDate`, ...).
    Account,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref(), args.delimiter)?;
    debug!(?config, shape = ?args.shape, "reader config");

    // Open input source
    let input: Box<dyn Read> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdin().lock()),
    };

    // Open output destination
    let output: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdout().lock()),
    };

    let (records, failure) = match psv_decoder::read_records_with_config(input, &config) {
        Ok(records) => (records, None),
        Err(partial) => {
            let (records, error) = partial.into_parts();
            (records, Some(error))
        }
    };

    // Partial results are written before the error is reported
    let count = match args.shape {
        Shape::Record => dump(&records, output, args.pretty)?,
        Shape::Account => {
            let accounts: Vec<Account> = psv_decoder::decode_all(&records);
            dump(&accounts, output, args.pretty)?
        }
    };
    eprintln!("Decoded {count} record(s)");

    match failure {
        Some(error) => Err(error).context("Failed to decode input"),
        None => Ok(()),
    }
}

/// Reads reader settings from `path` (if any) and applies the CLI override.
fn load_config(path: Option<&Path>, delimiter: Option<char>) -> Result<ReaderConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => ReaderConfig::default(),
    };
    if let Some(delimiter) = delimiter {
        config = config.with_delimiter(delimiter);
    }
    config.validate().context("Invalid reader config")?;
    Ok(config)
}

/// Writes one JSON object per item, keys sorted.
fn dump<T: Serialize, W: Write>(items: &[T], output: W, pretty: bool) -> Result<usize> {
    let mut out = BufWriter::new(output);
    for (idx, item) in items.iter().enumerate() {
        // serde_json::Value keeps object keys in a BTreeMap
        let value = serde_json::to_value(item)
            .with_context(|| format!("Failed to serialize record #{}", idx + 1))?;
        let json = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
        .with_context(|| format!("Failed to serialize record #{}", idx + 1))?;
        writeln!(out, "{json}").with_context(|| format!("Failed to write record #{}", idx + 1))?;
    }
    out.flush().context("Failed to flush output")?;
    Ok(items.len())
}
