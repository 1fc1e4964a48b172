//! Year-month key for monthly published indices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::date::days_in_month;
use super::Date;
use crate::error::{RendaError, RendaResult};

/// A calendar month, displayed and parsed as `YYYYMM`.
///
/// Monthly number indices (IPCA) are keyed by the month they refer to.
/// Ordering is chronological.
///
/// ```rust
/// use renda_core::types::YearMonth;
///
/// let ym: YearMonth = "202312".parse().unwrap();
/// assert_eq!(ym.add_months(1).to_string(), "202401");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month, validating the month.
    pub fn new(year: i32, month: u32) -> RendaResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(RendaError::invalid_year_month(format!("{year}{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Shifts by a (possibly negative) number of months.
    #[must_use]
    pub fn add_months(&self, months: i32) -> Self {
        let total = self.year * 12 + self.month as i32 - 1 + months;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    /// Number of days in this month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = RendaError;

    /// Accepts `YYYYMM` and `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.trim().chars().filter(|c| *c != '-').collect();
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(RendaError::invalid_year_month(s));
        }
        let year: i32 = digits[..4]
            .parse()
            .map_err(|_| RendaError::invalid_year_month(s))?;
        let month: u32 = digits[4..]
            .parse()
            .map_err(|_| RendaError::invalid_year_month(s))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = RendaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
