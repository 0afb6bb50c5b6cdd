//! CLI argument definitions for the CRM report tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "crm-report",
    version,
    about = "Summarize CRM data-quality and enrichment reports",
    long_about = "Summarize CRM data-quality and enrichment reports.\n\n\
                  Loads a report snapshot (JSON) and prints the quality score,\n\
                  issue severities, field coverage and before/after comparisons."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize a data-quality report.
    Quality(QualityArgs),

    /// Summarize an enrichment (before/after) report.
    Enrichment(EnrichmentArgs),
}

#[derive(Parser)]
pub struct QualityArgs {
    /// Path to the report snapshot (JSON).
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Analysis options file (JSON). Flags below override its thresholds.
    #[arg(long = "options", value_name = "PATH")]
    pub options: Option<PathBuf>,

    /// Population rate (%) below which a field is critical.
    #[arg(long = "critical-threshold", value_name = "PERCENT")]
    pub critical_threshold: Option<f64>,

    /// Population rate (%) from which a field is good.
    #[arg(long = "good-threshold", value_name = "PERCENT")]
    pub good_threshold: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct EnrichmentArgs {
    /// Path to the enrichment report snapshot (JSON).
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Print derived values as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
