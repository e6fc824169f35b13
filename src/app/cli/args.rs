//! Core CLI arguments structure
//!
//! The four audit arguments mirror the operational interface (organization,
//! filter list, threshold, output directory); the rest are the usual
//! logging and configuration knobs.

use clap::Parser;
use std::path::PathBuf;

/// Command-line options for one audit run
#[derive(Parser, Debug, Clone)]
#[command(name = "branchaudit")]
#[command(about = "Read-only stale branch audit for GitHub organizations")]
#[command(version)]
pub struct Args {
    /// GitHub organization to audit
    #[arg(long = "org", value_name = "ORG")]
    pub org: String,

    /// Repository-name filter substrings, comma-separated (case-insensitive)
    #[arg(long = "itaps", value_name = "LIST")]
    pub itaps: String,

    /// Staleness threshold in whole calendar months
    #[arg(long = "months", value_name = "N")]
    pub months: u32,

    /// Output directory for report artifacts
    #[arg(long = "out", value_name = "DIR")]
    pub out: PathBuf,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Force color output
    #[arg(long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
