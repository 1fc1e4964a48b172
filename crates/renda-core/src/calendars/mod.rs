//! Business day calendars.
//!
//! This module provides:
//! - The [`Calendar`] trait with business-day predicates, counting, shifting
//!   and enumeration
//! - [`BrazilCalendar`]: ANBIMA national holidays backed by a [`HolidayBitmap`]
//! - [`WeekendCalendar`]: weekends only, useful for tests

mod bitmap;
mod brazil;

pub use bitmap::{easter_sunday, HolidayBitmap, HolidayCalendarBuilder, MAX_YEAR, MIN_YEAR};
pub use brazil::BrazilCalendar;

use crate::error::{RendaError, RendaResult};
use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays
/// for a specific market or jurisdiction. Implementations are immutable
/// once built and must be shareable across threads.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Advances a date by a number of business days.
    ///
    /// Negative values move backward. Zero returns the date unchanged even
    /// when it is not a business day.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Counts business days between two dates (exclusive of start, inclusive of end).
    ///
    /// Returns a negative count when `end` precedes `start`.
    fn count_business_days(&self, start: Date, end: Date) -> i64 {
        if end < start {
            return -self.count_business_days(end, start);
        }

        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }

    /// Number of business days in a calendar year.
    fn business_days_in_year(&self, year: i32) -> RendaResult<i64> {
        let first = Date::from_ymd(year, 1, 1)?;
        let last = Date::from_ymd(year, 12, 31)?;
        let leading = i64::from(self.is_business_day(first));
        Ok(leading + self.count_business_days(first, last))
    }

    /// Business days in `[start, end]`, ascending.
    ///
    /// Both ends are included when they are business days; the list is empty
    /// when `end < start`.
    fn business_day_list(&self, start: Date, end: Date) -> Vec<Date> {
        let mut days = Vec::new();
        let mut current = start;
        while current <= end {
            if self.is_business_day(current) {
                days.push(current);
            }
            current = current.add_days(1);
        }
        days
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Boxed calendars, as returned by [`calendar_by_name`], are calendars too.
impl<C: Calendar + ?Sized> Calendar for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_business_day(&self, date: Date) -> bool {
        (**self).is_business_day(date)
    }
}

/// Looks up a calendar by name ("ANBIMA", "BR", "WEEKEND").
pub fn calendar_by_name(name: &str) -> RendaResult<Box<dyn Calendar>> {
    match name.trim().to_uppercase().as_str() {
        "ANBIMA" | "BR" | "BRAZIL" | "B3" => Ok(Box::new(BrazilCalendar::anbima())),
        "WEEKEND" | "WEEKENDS" | "NONE" => Ok(Box::new(WeekendCalendar)),
        other => Err(RendaError::calendar(format!("unknown calendar '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(d(2025, 1, 6)));
        assert!(!cal.is_business_day(d(2025, 1, 4)));
        assert!(!cal.is_business_day(d(2025, 1, 5)));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;

        // Friday + 1 business day = Monday
        assert_eq!(cal.add_business_days(d(2025, 1, 3), 1), d(2025, 1, 6));
        // Monday - 1 business day = Friday
        assert_eq!(cal.add_business_days(d(2025, 1, 6), -1), d(2025, 1, 3));
        assert_eq!(cal.add_business_days(d(2025, 1, 4), 0), d(2025, 1, 4));
    }

    #[test]
    fn test_count_business_days() {
        let cal = WeekendCalendar;

        // Monday to Friday = 4 business days (Tue, Wed, Thu, Fri)
        assert_eq!(cal.count_business_days(d(2025, 1, 6), d(2025, 1, 10)), 4);
        assert_eq!(cal.count_business_days(d(2025, 1, 10), d(2025, 1, 6)), -4);
        assert_eq!(cal.count_business_days(d(2025, 1, 6), d(2025, 1, 6)), 0);
    }

    #[test]
    fn test_count_matches_add() {
        let cal = WeekendCalendar;
        let start = d(2024, 3, 1);
        for n in [1, 5, 22, 126, 252] {
            let end = cal.add_business_days(start, n);
            assert_eq!(cal.count_business_days(start, end), i64::from(n));
        }
    }

    #[test]
    fn test_boxed_calendar_by_name() {
        let cal = calendar_by_name("anbima").unwrap();
        assert_eq!(cal.name(), BrazilCalendar::anbima().name());
        // Tiradentes
        assert!(!cal.is_business_day(d(2025, 4, 21)));
        assert_eq!(cal.count_business_days(d(2025, 4, 17), d(2025, 4, 22)), 1);
        assert!(calendar_by_name("NYSE").is_err());
    }

    #[test]
    fn test_business_day_list_single_day() {
        let cal = WeekendCalendar;
        let monday = d(2025, 1, 6);
        let saturday = d(2025, 1, 4);

        assert_eq!(cal.business_day_list(monday, monday), vec![monday]);
        assert!(cal.business_day_list(saturday, saturday).is_empty());
    }

    #[test]
    fn test_business_day_list_range() {
        let cal = WeekendCalendar;
        let days = cal.business_day_list(d(2025, 1, 3), d(2025, 1, 7));
        assert_eq!(days, vec![d(2025, 1, 3), d(2025, 1, 6), d(2025, 1, 7)]);
        assert!(cal.business_day_list(d(2025, 1, 7), d(2025, 1, 3)).is_empty());
    }

    #[test]
    fn test_business_days_in_year() {
        // 2025 has 261 weekdays
        assert_eq!(WeekendCalendar.business_days_in_year(2025).unwrap(), 261);
    }

    #[test]
    fn test_calendar_by_name() {
        assert_eq!(calendar_by_name("anbima").unwrap().name(), "ANBIMA");
        assert_eq!(calendar_by_name("weekend").unwrap().name(), "Weekend Only");
        assert!(calendar_by_name("TARGET2").is_err());
    }
}
