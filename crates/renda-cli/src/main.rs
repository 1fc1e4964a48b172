//! Renda CLI - valuation of Brazilian fixed income instruments.
//!
//! # Usage
//!
//! ```bash
//! # Value one instrument on a date
//! renda value --instrument cdb.json --date 2024-06-14 --data ./data
//!
//! # Value a list of (instrument, date) pairs
//! renda batch --input positions.yaml --format csv
//!
//! # Daily series over a range
//! renda series --instrument ntnb.json --from 2024-01-02 --to 2024-06-28
//!
//! # Business day arithmetic on the ANBIMA calendar
//! renda calendar count 2024-01-02 2024-12-31
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use settings::Settings;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(settings.output.format);

    match cli.command {
        Commands::Value(args) => commands::value::execute(args, &settings, format)?,
        Commands::Batch(args) => commands::batch::execute(args, &settings, format)?,
        Commands::Series(args) => commands::series::execute(args, &settings, format)?,
        Commands::Calendar(args) => commands::calendar::execute(args, &settings, format)?,
        Commands::Config(args) => {
            commands::config::execute(args, &settings, cli.config.as_deref(), format)?;
        }
    }

    Ok(())
}
