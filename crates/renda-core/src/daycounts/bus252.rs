//! Business days / 252 (DU/252).

use super::DayCount;
use crate::calendars::Calendar;
use crate::types::Date;

/// Business-day count over a 252-day year, bound to a calendar.
///
/// Days are counted exclusive of `start` and inclusive of `end`, so
/// `year_fraction(d, cal.add_business_days(d, n)) == n / 252`.
pub struct Bus252<'a, C: Calendar + ?Sized> {
    calendar: &'a C,
}

impl<'a, C: Calendar + ?Sized> Bus252<'a, C> {
    /// Binds the convention to a business calendar.
    pub fn new(calendar: &'a C) -> Self {
        Self { calendar }
    }
}

impl<C: Calendar + ?Sized> DayCount for Bus252<'_, C> {
    fn name(&self) -> &'static str {
        "BUS/252"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 252.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        self.calendar.count_business_days(start, end)
    }
}
