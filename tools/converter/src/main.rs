//! CLI tool for converting CSV transactions into QBO statements and viewing QBO files.
//!
//! # Usage
//!
//! ```bash
//! # Convert a CSV export into a statement
//! qbo-converter convert --input transactions.csv --output converted_output.qbo
//!
//! # Override the account identifiers written to <BANKACCTFROM>
//! qbo-converter convert -i transactions.csv --bank-id 111000025 --account-id 42 -o out.qbo
//!
//! # Read from stdin, write to stdout
//! cat transactions.csv | qbo-converter convert > out.qbo
//!
//! # Show the contents of a statement
//! qbo-converter view --input out.qbo
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (e.g. `RUST_LOG=debug`).

use std::fs::File;
use std::io::{Read, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use qbo::prelude::*;
use tracing::info;

/// Bank routing number written when `--bank-id` is not given.
const DEFAULT_BANK_ID: &str = "123456789";
/// Account number written when `--account-id` is not given.
const DEFAULT_ACCOUNT_ID: &str = "987654321";

/// Convert CSV transactions to QBO statements and view QBO files.
#[derive(Parser, Debug)]
#[command(name = "qbo-converter")]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a CSV file (Date, Description, Amount, [Memo]) into a QBO statement.
    Convert(ConvertArgs),
    /// Parse a QBO statement and print its header and transactions.
    View(ViewArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input CSV path. If not specified, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output QBO path. If not specified, writes to stdout.
    ///
    /// The file is only created once the whole input converted successfully.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Bank routing number for <BANKID>.
    #[arg(long, default_value = DEFAULT_BANK_ID)]
    bank_id: String,

    /// Account number for <ACCTID>.
    #[arg(long, default_value = DEFAULT_ACCOUNT_ID)]
    account_id: String,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Input QBO path. If not specified, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,
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
    match Cli::parse().command {
        Command::Convert(args) => {
            let count = run_convert(&args)?;
            // Report result to stderr (so it doesn't interfere with stdout output)
            eprintln!("Converted {count} transaction(s)");
        }
        Command::View(args) => {
            let report = run_view(&args)?;
            let mut out = stdout().lock();
            out.write_all(report.as_bytes()).context("Failed to write to stdout")?;
            out.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

/// Opens the input source: a file or stdin.
fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    Ok(match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdin().lock()),
    })
}

/// Converts CSV to a statement and writes it out.
///
/// The destination is opened only after serialization succeeded, so a bad row
/// never leaves a partial or empty output file behind.
fn run_convert(args: &ConvertArgs) -> Result<usize> {
    let input = open_input(args.input.as_deref())?;
    let (text, count) = convert(input, &args.bank_id, &args.account_id)?;

    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            file.write_all(text.as_bytes())
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "statement written");
        }
        None => {
            let mut out = stdout().lock();
            out.write_all(text.as_bytes()).context("Failed to write to stdout")?;
            out.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(count)
}

/// Reads CSV rows and serializes them into statement text.
///
/// Returns the text and the number of transactions in it.
fn convert<R: Read>(input: R, bank_id: &str, account_id: &str) -> Result<(String, usize)> {
    let rows = read_rows(input).context("Failed to read CSV input")?;
    let text = serialize(&rows, bank_id, account_id).context("Failed to convert CSV to QBO")?;
    Ok((text, rows.len()))
}

fn run_view(args: &ViewArgs) -> Result<String> {
    let input = open_input(args.input.as_deref())?;
    view(input, args.input.as_deref())
}

/// Parses a statement and renders it for display.
fn view<R: Read>(input: R, source: Option<&Path>) -> Result<String> {
    let document = parse_reader(input).context("Failed to read QBO file")?;

    let source = source.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
    Ok(format!("QBO File Contents:\nFile: {source}\n\n{}", render_document(&document)))
}
