//! dupescan - content-based duplicate file scanner.
//!
//! Walks a directory tree, filters candidate files by size and extension
//! category, hashes content with BLAKE3 on a bounded worker pool, groups
//! equal digests, and reports the duplicate sets with their wasted-space
//! statistics. Individual copies can be deleted through the
//! [`actions`] module; reports export as text, paged text, or JSON.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytesize::ByteSize;
use yansi::Paint;

use cli::{Cli, Commands, OutputFormat, ScanArgs};
use config::Config;
use duplicates::{aggregate, DuplicateFinder, FinderConfig, FinderError, ScanResult, ScanSummary};
use error::ExitCode;
use output::{JsonOutput, PagedReport, TextReport};
use progress::Progress;
use scanner::ScanConfig;

/// Run the application and map the outcome to an exit code.
///
/// # Errors
///
/// Returns an error for fatal conditions (unreadable root, export I/O
/// failures); recovered conditions are reflected in the exit code instead.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    match cli.command {
        Commands::Scan(args) => run_scan(args, cli.quiet),
    }
}

/// Execute one scan invocation end to end.
fn run_scan(args: ScanArgs, quiet: bool) -> Result<ExitCode> {
    let defaults = Config::load();
    let scan_config = build_scan_config(&args, &defaults)?;
    let io_threads = args
        .io_threads
        .or(defaults.io_threads)
        .unwrap_or(duplicates::finder::DEFAULT_IO_THREADS);

    let shutdown = signal::install_handler().unwrap_or_else(|e| {
        log::warn!("could not install Ctrl+C handler: {e}");
        signal::ShutdownHandler::new()
    });

    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_scan_config(scan_config)
            .with_io_threads(io_threads)
            .with_shutdown_flag(shutdown.flag())
            .with_progress(Arc::new(Progress::new(quiet))),
    );

    let (result, summary) = match finder.scan(&args.path) {
        Ok(outcome) => outcome,
        Err(FinderError::Interrupted) => {
            eprintln!("Scan interrupted; nothing to report.");
            return Ok(ExitCode::Interrupted);
        }
        Err(e @ FinderError::PathUnavailable { .. }) => {
            return Err(anyhow::Error::new(e).context("cannot scan root path"));
        }
    };

    write_report(&result, args.output, args.export.as_deref())?;
    if !quiet {
        print_summary(&result, &summary);
    }

    Ok(exit_code_for(&result, &summary))
}

/// Merge CLI flags over config-file defaults into a scan configuration.
fn build_scan_config(args: &ScanArgs, defaults: &Config) -> Result<ScanConfig> {
    let min_size = match (args.min_size, defaults.min_size.as_deref()) {
        (Some(cli_value), _) => cli_value,
        (None, Some(text)) => cli::parse_size(text)
            .map_err(|e| anyhow::anyhow!("bad min_size in config file: {e}"))?,
        (None, None) => 0,
    };

    let categories = args
        .types
        .clone()
        .or_else(|| defaults.types.clone())
        .unwrap_or_else(|| vec![scanner::FileCategory::All]);

    Ok(ScanConfig {
        min_size,
        categories,
        follow_symlinks: args.follow_symlinks,
        skip_hidden: args.skip_hidden,
        ignore_patterns: args.ignore_patterns.clone(),
    })
}

/// Serialize the result to stdout or the export file.
fn write_report(
    result: &ScanResult,
    format: OutputFormat,
    export: Option<&Path>,
) -> Result<()> {
    match export {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create export file {}", path.display()))?;
            write_formatted(result, format, file)?;
            log::info!("report written to {}", path.display());
        }
        None => write_formatted(result, format, io::stdout().lock())?,
    }
    Ok(())
}

fn write_formatted<W: io::Write>(
    result: &ScanResult,
    format: OutputFormat,
    writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Text => TextReport::new(result)
            .write_to(writer)
            .context("writing text report")?,
        OutputFormat::Paged => PagedReport::new(result)
            .write_to(writer)
            .context("writing paged report")?,
        OutputFormat::Json => JsonOutput::new(result)
            .write_to(writer)
            .context("writing JSON report")?,
    }
    Ok(())
}

/// One-line colored summary on stderr.
fn print_summary(result: &ScanResult, summary: &ScanSummary) {
    let stats = aggregate(result);

    if result.is_empty() {
        eprintln!(
            "{} scanned {} files in {:.1?}, no duplicates found",
            "clean:".green().bold(),
            stats.total_files,
            summary.scan_duration
        );
    } else {
        eprintln!(
            "{} {} groups, {} redundant copies, {} wasted ({} files in {:.1?})",
            "duplicates:".yellow().bold(),
            stats.duplicate_groups,
            stats.duplicate_files,
            ByteSize::b(stats.wasted_bytes),
            stats.total_files,
            summary.scan_duration
        );
    }

    if summary.files_skipped() > 0 {
        eprintln!(
            "{} {} entries could not be read and were skipped",
            "warning:".red().bold(),
            summary.files_skipped()
        );
    }
    if summary.interrupted {
        eprintln!("{} scan was interrupted; results are partial", "note:".red());
    }
}

/// Exit-code policy: interruption trumps partial, partial trumps clean.
fn exit_code_for(result: &ScanResult, summary: &ScanSummary) -> ExitCode {
    if summary.interrupted {
        ExitCode::Interrupted
    } else if summary.files_skipped() > 0 {
        ExitCode::PartialSuccess
    } else if result.is_empty() {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    }
}
