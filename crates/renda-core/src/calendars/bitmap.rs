//! Bitmap-based holiday calendar for O(1) lookups.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::types::Date;

/// Minimum year supported by the calendar.
pub const MIN_YEAR: i32 = 1970;
/// Maximum year supported by the calendar.
pub const MAX_YEAR: i32 = 2100;

const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;
const MAX_DAYS_PER_YEAR: usize = 366;
const TOTAL_BITS: usize = YEAR_COUNT * MAX_DAYS_PER_YEAR;
const WORD_COUNT: usize = (TOTAL_BITS + 63) / 64;

/// Bitmap of holidays over [`MIN_YEAR`, `MAX_YEAR`], Saturday/Sunday weekends.
///
/// Each bit represents a day of year; 1 = holiday. Dates outside the
/// supported range are never holidays.
#[derive(Clone)]
pub struct HolidayBitmap {
    name: &'static str,
    bits: Box<[u64; WORD_COUNT]>,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("name", &self.name)
            .field("holiday_count", &self.count_holidays())
            .finish()
    }
}

impl HolidayBitmap {
    /// Create a new empty holiday bitmap.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            bits: Box::new([0u64; WORD_COUNT]),
        }
    }

    /// Get the name of this calendar.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Add a holiday to the bitmap.
    pub fn add_holiday(&mut self, date: Date) {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date.as_naive_date()) {
            self.bits[word_idx] |= 1u64 << bit_idx;
        }
    }

    /// Check if a date is a holiday (excluding weekends).
    #[inline]
    pub fn is_holiday(&self, date: Date) -> bool {
        Self::date_to_indices(date.as_naive_date())
            .is_some_and(|(word_idx, bit_idx)| (self.bits[word_idx] & (1u64 << bit_idx)) != 0)
    }

    /// A business day is neither a weekend nor a holiday.
    #[inline]
    pub fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_holiday(date)
    }

    /// Count total holidays in the bitmap.
    pub fn count_holidays(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns (word_index, bit_index) or None if date is out of range.
    #[inline]
    fn date_to_indices(date: NaiveDate) -> Option<(usize, usize)> {
        let year = date.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }

        let year_offset = (year - MIN_YEAR) as usize;
        let bit_position = year_offset * MAX_DAYS_PER_YEAR + date.ordinal0() as usize;

        Some((bit_position / 64, bit_position % 64))
    }
}

/// Builder for holiday bitmaps from fixed-date and Easter-relative rules.
pub struct HolidayCalendarBuilder {
    name: &'static str,
    holidays: BTreeSet<Date>,
    start_year: i32,
    end_year: i32,
}

impl HolidayCalendarBuilder {
    /// Create a new builder covering the full supported range.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            holidays: BTreeSet::new(),
            start_year: MIN_YEAR,
            end_year: MAX_YEAR,
        }
    }

    /// Restrict the year range rules are generated for.
    pub fn year_range(mut self, start: i32, end: i32) -> Self {
        self.start_year = start.max(MIN_YEAR);
        self.end_year = end.min(MAX_YEAR);
        self
    }

    /// Add a specific holiday date.
    pub fn add_holiday(mut self, date: Date) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Add a fixed holiday (same date every year). No weekend observation.
    pub fn add_fixed_holiday(self, month: u32, day: u32) -> Self {
        let from = self.start_year;
        self.add_fixed_holiday_from(month, day, from)
    }

    /// Add a fixed holiday starting from a specific year.
    pub fn add_fixed_holiday_from(mut self, month: u32, day: u32, from_year: i32) -> Self {
        for year in from_year.max(self.start_year)..=self.end_year {
            if let Ok(date) = Date::from_ymd(year, month, day) {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Add Easter-based holiday (offset in days from Easter Sunday).
    pub fn add_easter_holiday(mut self, offset_days: i64) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(easter) = easter_sunday(year) {
                self.holidays.insert(easter.add_days(offset_days));
            }
        }
        self
    }

    /// Build the holiday bitmap.
    pub fn build(self) -> HolidayBitmap {
        let mut bitmap = HolidayBitmap::new(self.name);
        for date in self.holidays {
            bitmap.add_holiday(date);
        }
        bitmap
    }
}

/// Calculate Easter Sunday using the Anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<Date> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    Date::from_ymd(year, month as u32, day as u32).ok()
}
