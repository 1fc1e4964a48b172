//! Calendar-day conventions: ACT/252 and ACT/365 Fixed.

use super::DayCount;
use crate::types::Date;

/// Actual/252: calendar days over a 252-day year.
///
/// Used by some Brazilian instruments quoted on calendar days but annualised
/// on the business-day basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act252;

impl DayCount for Act252 {
    fn name(&self) -> &'static str {
        "ACT/252"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        start.days_between(&end) as f64 / 252.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Fixed: calendar days over a 365-day year, leap years ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        start.days_between(&end) as f64 / 365.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
