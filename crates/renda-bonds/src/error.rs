//! Error types for instrument valuation.

use thiserror::Error;

use renda_core::RendaError;
use renda_math::MathError;

/// A specialized Result type for valuation operations.
pub type BondResult<T> = Result<T, BondError>;

/// Broad failure classes, used by callers to map errors to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The caller supplied an invalid or unsupported instrument/date.
    Input,
    /// A required rate or index value could not be resolved.
    DataUnavailable,
    /// A numerical procedure had no valid solution.
    Numerical,
}

/// Errors that can occur while building or valuing instruments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Invalid instrument terms or valuation request.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// The indexer cannot be combined with the amortization method.
    #[error("Unsupported pairing: {indexer} indexer with {amortization} amortization")]
    UnsupportedPairing {
        /// Indexer name.
        indexer: String,
        /// Amortization name.
        amortization: String,
    },

    /// A rate or index value could not be resolved.
    #[error("Data unavailable: {reason}")]
    DataUnavailable {
        /// What was missing.
        reason: String,
    },

    /// A numerical procedure failed.
    #[error("Numerical failure: {reason}")]
    Numerical {
        /// Description of the failure.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] RendaError),

    /// Math library error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl BondError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a data unavailable error.
    #[must_use]
    pub fn data_unavailable(reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            reason: reason.into(),
        }
    }

    /// Creates a numerical failure error.
    #[must_use]
    pub fn numerical(reason: impl Into<String>) -> Self {
        Self::Numerical {
            reason: reason.into(),
        }
    }

    /// Returns the failure class of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::MissingField { .. }
            | Self::UnsupportedPairing { .. }
            | Self::Core(_) => ErrorCategory::Input,
            Self::DataUnavailable { .. } => ErrorCategory::DataUnavailable,
            Self::Numerical { .. } | Self::Math(_) => ErrorCategory::Numerical,
        }
    }
}
