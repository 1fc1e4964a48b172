//! Errors raised while loading data files.

use std::path::PathBuf;

use thiserror::Error;

use renda_bonds::BondError;

/// A specialized Result type for file loading.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while loading data files.
#[derive(Error, Debug)]
pub enum FileError {
    /// The file could not be opened or read.
    #[error("cannot read {}: {message}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// A record could not be parsed.
    #[error("{}: {message}", path.display())]
    Parse {
        /// File path.
        path: PathBuf,
        /// Parser message, including the line.
        message: String,
    },

    /// The path is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

impl From<FileError> for BondError {
    fn from(err: FileError) -> Self {
        BondError::data_unavailable(err.to_string())
    }
}
