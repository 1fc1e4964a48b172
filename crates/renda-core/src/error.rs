//! Error types for the Renda core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type RendaResult<T> = Result<T, RendaError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RendaError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Invalid "YYYYMM" year-month key.
    #[error("Invalid year-month: {value}")]
    InvalidYearMonth {
        /// The offending text or value.
        value: String,
    },

    /// Day count convention could not be parsed.
    #[error("Unknown day count convention: '{0}'")]
    UnknownDayCount(String),

    /// Calendar or business day error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl RendaError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid year-month error.
    #[must_use]
    pub fn invalid_year_month(value: impl Into<String>) -> Self {
        Self::InvalidYearMonth {
            value: value.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }
}
