//! CLI argument definitions for the location scorer.

use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "zipscore",
    version,
    about = "Score and compare neighborhoods by postal code",
    long_about = "Score and compare neighborhoods by postal code.\n\n\
                  Reads an environmental and socioeconomic burden dataset (CSV) and turns\n\
                  its percentile columns into a weighted desirability score."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Dataset CSV with one row per area (required).
    #[arg(long = "dataset", value_name = "PATH", global = true)]
    pub dataset: Option<PathBuf>,

    /// Scoring configuration (TOML). Defaults apply when omitted.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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

impl Cli {
    /// The `--dataset` path, reported as a usage error when absent.
    pub fn dataset_path(&self) -> Result<&Path, clap::Error> {
        self.dataset.as_deref().ok_or_else(|| {
            Self::command().error(
                ErrorKind::MissingRequiredArgument,
                "the following required argument was not provided: --dataset <PATH>",
            )
        })
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Score one or more postal codes.
    Score(ScoreArgs),

    /// Compare two postal codes side by side.
    Compare(CompareArgs),

    /// Show which dataset column each metric resolved to.
    Headers(OutputArgs),
}

#[derive(Args)]
pub struct ScoreArgs {
    /// Postal codes to score (ZIP+4 input is cut to the first five characters).
    #[arg(value_name = "CODE", required = true)]
    pub codes: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct CompareArgs {
    #[arg(value_name = "CODE_A")]
    pub code_a: String,

    #[arg(value_name = "CODE_B")]
    pub code_b: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Print results as JSON instead of a table.
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
