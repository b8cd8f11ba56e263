//! CLI argument definitions for the Darwin Core checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dwc-check",
    version,
    about = "Darwin Core occurrence dataset checker",
    long_about = "Validate biodiversity occurrence datasets against the Darwin Core standard.\n\n\
                  Joins the event, occurrence, and extended measurement-or-fact tables,\n\
                  checks referential integrity, required columns, completeness, coordinate\n\
                  and depth ranges, and verifies scientific names against WoRMS."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Validate a dataset folder and print the findings.
    Check(CheckArgs),

    /// List the default required and critical column sets.
    Columns,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Folder containing event_bd.csv, occurrence_bd.csv, and emof_bd.csv.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Event table path (default: <DATA_DIR>/event_bd.csv).
    #[arg(long = "event", value_name = "PATH")]
    pub event: Option<PathBuf>,

    /// Occurrence table path (default: <DATA_DIR>/occurrence_bd.csv).
    #[arg(long = "occurrence", value_name = "PATH")]
    pub occurrence: Option<PathBuf>,

    /// Measurement-or-fact table path (default: <DATA_DIR>/emof_bd.csv).
    #[arg(long = "emof", value_name = "PATH")]
    pub emof: Option<PathBuf>,

    /// TOML file overriding the default check configuration.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip the WoRMS scientific-name verification.
    #[arg(long = "no-taxonomy")]
    pub no_taxonomy: bool,

    /// Write the full report as JSON to the given path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Per-name deadline for WoRMS lookups, in seconds.
    #[arg(long = "lookup-timeout-secs", value_name = "SECS")]
    pub lookup_timeout_secs: Option<u64>,

    /// Maximum number of in-flight WoRMS lookups.
    #[arg(long = "lookup-concurrency", value_name = "N")]
    pub lookup_concurrency: Option<usize>,
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
