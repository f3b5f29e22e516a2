//! Command-line interface definitions.
//!
//! All arguments use the clap derive API: global verbosity/color options on
//! [`Cli`], per-operation options on the subcommand argument structs.
//!
//! # Example
//!
//! ```bash
//! # Scan with the text report on stdout (default)
//! dupescan scan ~/Downloads
//!
//! # Images and documents over 1 MiB, JSON for scripting
//! dupescan scan ~/Pictures --types images,documents --min-size 1MiB --output json
//!
//! # Paginated report written to a file
//! dupescan scan ~/archive --output paged --export duplicates.txt
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::scanner::FileCategory;

/// Content-based duplicate file scanner.
///
/// Finds byte-identical files by walking a directory tree, hashing
/// candidate files with BLAKE3, and grouping equal digests.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress and all output except errors and the report
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Emit fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a directory tree for duplicate files
    Scan(ScanArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Minimum file size to consider (e.g. 1500, 4KiB, 10MB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub min_size: Option<u64>,

    /// File categories to consider, comma-separated
    #[arg(
        long = "types",
        value_name = "CATEGORY",
        value_enum,
        value_delimiter = ','
    )]
    pub types: Option<Vec<FileCategory>>,

    /// Glob patterns to exclude (repeatable)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Follow symbolic links during the walk
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    pub skip_hidden: bool,

    /// Number of hashing threads (default from config file, else 4)
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

/// Report format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text report
    Text,
    /// JSON document for automation
    Json,
    /// Paginated plain-text report
    Paged,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Paged => write!(f, "paged"),
        }
    }
}

/// Parse a human-readable size into bytes.
///
/// Accepts bare byte counts and the usual decimal/binary suffixes,
/// case-insensitively: B, KB/KiB, MB/MiB, GB/GiB, TB/TiB.
///
/// # Examples
///
/// ```
/// use dupescan::cli::parse_size;
///
/// assert_eq!(parse_size("1500").unwrap(), 1500);
/// assert_eq!(parse_size("4KiB").unwrap(), 4096);
/// assert_eq!(parse_size("10MB").unwrap(), 10_000_000);
/// ```
///
/// # Errors
///
/// Returns a message suitable for clap when the number or suffix is
/// malformed.
pub fn parse_size(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("size must not be empty".to_string());
    }

    let split = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(trimmed.len());
    let (number, suffix) = trimmed.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid number in size: '{trimmed}'"))?;

    let multiplier: u64 = match suffix.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" => 1_000,
        "KIB" => 1 << 10,
        "M" | "MB" => 1_000_000,
        "MIB" => 1 << 20,
        "G" | "GB" => 1_000_000_000,
        "GIB" => 1 << 30,
        "T" | "TB" => 1_000_000_000_000,
        "TIB" => 1 << 40,
        other => return Err(format!("unknown size suffix: '{other}'")),
    };

    Ok((value * multiplier as f64) as u64)
}
