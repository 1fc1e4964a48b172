//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Date range with the end before the start.
    #[error("Invalid range: {from} is after {to}")]
    InvalidRange {
        /// Range start.
        from: String,
        /// Range end.
        to: String,
    },

    /// An instrument or batch file could not be parsed.
    #[error("Cannot parse {source_name}: {message}")]
    Parse {
        /// File name or "inline JSON".
        source_name: String,
        /// Parser message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A settings file already exists.
    #[error("{} already exists; use --force to overwrite", .0.display())]
    AlreadyExists(PathBuf),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
