//! # treeloc
//!
//! A CLI tool that counts lines in a source tree and estimates how much of it
//! is platform-specific, commented, asserted and tested.
//!
//! ## Overview
//!
//! treeloc is built on top of treeloclib. With no arguments it scans the
//! current directory using the built-in rules for a C/C++/assembly kernel
//! tree and prints a three-line summary.
//!
//! ## Usage
//!
//! ```bash
//! # Scan the current directory
//! treeloc
//!
//! # Scan another directory, with a per-file breakdown
//! treeloc kernel --by-file
//!
//! # Count Rust sources instead, treating tests/ as test code
//! treeloc -x rs -e target --test-dir tests
//!
//! # Output as JSON
//! treeloc --output json
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use console::Style;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use treeloclib::{scan_directory, FileTable, ScanConfig, ScanResult, Summary};

use crate::render::{render_report, OutputMode};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "TREELOC_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Structured JSON document
    Json,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => OutputMode::Text,
            OutputFormat::Json => OutputMode::Json,
        }
    }
}

/// Count lines in a source tree with platform, comment, assert and test shares
#[derive(Debug, Parser)]
#[command(name = "treeloc", version, author = "Arthur Debert")]
struct Cli {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Counted file extension (repeatable; replaces the defaults)
    #[arg(short = 'x', long = "ext", action = ArgAction::Append)]
    extensions: Vec<String>,

    /// Directory-name substring to prune (repeatable; replaces the defaults)
    #[arg(short, long = "exclude", action = ArgAction::Append)]
    exclusions: Vec<String>,

    /// Skip files whose path contains this substring (empty to disable)
    #[arg(long)]
    exception: Option<String>,

    /// Directory marking platform-specific code (repeatable; replaces the defaults)
    #[arg(long = "platform", action = ArgAction::Append)]
    platform_dirs: Vec<String>,

    /// Directory marking test code (repeatable; replaces the defaults)
    #[arg(long = "test-dir", action = ArgAction::Append)]
    test_dirs: Vec<String>,

    /// Warn about unreadable files and continue instead of failing
    #[arg(long)]
    skip_unreadable: bool,

    /// Show breakdown by file
    #[arg(short = 'f', long)]
    by_file: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Map flags onto a scan configuration; unset lists keep the defaults.
    fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::new().skip_unreadable(self.skip_unreadable);
        if !self.extensions.is_empty() {
            config = config.extensions(self.extensions.iter().cloned());
        }
        if !self.exclusions.is_empty() {
            config = config.exclude(self.exclusions.iter().cloned());
        }
        if let Some(exception) = &self.exception {
            config = config.exception(exception.clone());
        }
        if !self.platform_dirs.is_empty() {
            config = config.platform_dirs(self.platform_dirs.iter().cloned());
        }
        if !self.test_dirs.is_empty() {
            config = config.test_dirs(self.test_dirs.iter().cloned());
        }
        if self.by_file {
            config = config.with_file_stats();
        }
        config
    }
}

/// JSON document for `--output json`
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    root: String,
    config: &'a ScanConfig,
    summary: Summary,
    result: &'a ScanResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<FileTable>,
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = cli.scan_config();
    let result = scan_directory(&cli.path, &config)
        .with_context(|| format!("failed to scan '{}'", cli.path.display()))?;
    let summary = result.summary();

    let table = cli
        .by_file
        .then(|| FileTable::from_result(&result, &cli.path));

    let report = JsonReport {
        root: cli.path.display().to_string(),
        config: &config,
        summary,
        result: &result,
        table,
    };
    render_report(
        &report,
        &report.summary,
        report.table.as_ref(),
        cli.output.into(),
    )
    .map_err(|e| anyhow::anyhow!("failed to render output: {e}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let style = Style::new().red().bold().for_stderr();
            eprintln!("{} {e:#}", style.apply_to("Error:"));
            ExitCode::FAILURE
        }
    }
}
