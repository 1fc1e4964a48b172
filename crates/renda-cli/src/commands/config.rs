//! Config command: inspect and create the settings file.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_info, print_success};
use crate::settings::Settings;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Executes the config command.
pub fn execute(
    args: ConfigArgs,
    settings: &Settings,
    explicit: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let path = Settings::resolve_path(explicit);

    match args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(settings)?),
            _ => print!("{}", settings.to_toml()?),
        },
        ConfigCommand::Path => {
            println!("{}", path.display());
            if !path.exists() && format == OutputFormat::Table {
                print_info("File does not exist yet; run `renda config init`.");
            }
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::AlreadyExists(path).into());
            }
            Settings::default().save(&path)?;
            print_success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}
