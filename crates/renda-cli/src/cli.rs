//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{BatchArgs, CalendarArgs, ConfigArgs, SeriesArgs, ValueArgs};

/// Renda - Brazilian fixed income valuation
#[derive(Parser)]
#[command(name = "renda")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then table)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Log pricing details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (TOML)
    #[arg(long, env = "RENDA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Value one instrument on one date
    Value(ValueArgs),

    /// Value a list of instrument/date pairs from a file
    Batch(BatchArgs),

    /// Value one instrument on every business day of a range
    Series(SeriesArgs),

    /// Business day queries
    Calendar(CalendarArgs),

    /// Manage settings
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
