//! Brazilian national (ANBIMA) business day calendar.

use std::sync::OnceLock;

use super::bitmap::{HolidayBitmap, HolidayCalendarBuilder};
use super::Calendar;
use crate::types::Date;

/// ANBIMA national holiday calendar used by B3 fixed income settlement.
///
/// Holidays:
/// - New Year (Jan 1), Tiradentes (Apr 21), Labour Day (May 1)
/// - Independence (Sep 7), Our Lady Aparecida (Oct 12), All Souls (Nov 2)
/// - Proclamation of the Republic (Nov 15), Christmas (Dec 25)
/// - Black Consciousness Day (Nov 20) from 2024
/// - Carnival Monday and Tuesday, Good Friday, Corpus Christi (Easter based)
#[derive(Debug, Clone, Copy, Default)]
pub struct BrazilCalendar;

static ANBIMA: OnceLock<HolidayBitmap> = OnceLock::new();

impl BrazilCalendar {
    /// The ANBIMA national calendar.
    pub fn anbima() -> Self {
        BrazilCalendar
    }

    fn bitmap(&self) -> &'static HolidayBitmap {
        ANBIMA.get_or_init(|| {
            HolidayCalendarBuilder::new("ANBIMA")
                .add_fixed_holiday(1, 1)
                .add_fixed_holiday(4, 21)
                .add_fixed_holiday(5, 1)
                .add_fixed_holiday(9, 7)
                .add_fixed_holiday(10, 12)
                .add_fixed_holiday(11, 2)
                .add_fixed_holiday(11, 15)
                .add_fixed_holiday_from(11, 20, 2024)
                .add_fixed_holiday(12, 25)
                .add_easter_holiday(-48) // Carnival Monday
                .add_easter_holiday(-47) // Carnival Tuesday
                .add_easter_holiday(-2) // Good Friday
                .add_easter_holiday(60) // Corpus Christi
                .build()
        })
    }
}

impl Calendar for BrazilCalendar {
    fn name(&self) -> &'static str {
        "ANBIMA"
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.bitmap().is_business_day(date)
    }
}
