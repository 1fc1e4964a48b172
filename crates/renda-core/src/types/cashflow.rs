//! Dated cash flow.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// A single dated cash flow.
///
/// Amounts for inflation-indexed instruments are carried in real terms until
/// they are explicitly converted with an index ratio.
///
/// # Example
///
/// ```rust
/// use renda_core::types::{CashFlow, Date};
///
/// let cf = CashFlow::new(Date::from_ymd(2025, 6, 15).unwrap(), 1050.0);
/// assert_eq!(cf.amount, 1050.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Payment date
    pub date: Date,
    /// Amount paid on `date`
    pub amount: f64,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(date: Date, amount: f64) -> Self {
        Self { date, amount }
    }

    /// Returns a copy with the amount multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            date: self.date,
            amount: self.amount * factor,
        }
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.6}", self.date, self.amount)
    }
}
