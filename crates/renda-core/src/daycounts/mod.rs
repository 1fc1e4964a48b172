//! Day count conventions for Brazilian fixed income.
//!
//! # Supported Conventions
//!
//! - [`Bus252`]: business days / 252 - the Brazilian market standard (DU/252)
//! - [`Act252`]: calendar days / 252
//! - [`Act365Fixed`]: calendar days / 365
//!
//! # Usage
//!
//! ```rust
//! use renda_core::calendars::WeekendCalendar;
//! use renda_core::daycounts::DayCountConvention;
//! use renda_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 6).unwrap();
//! let end = Date::from_ymd(2025, 1, 13).unwrap();
//!
//! let yf = DayCountConvention::Bus252.year_fraction(start, end, &WeekendCalendar);
//! assert!((yf - 5.0 / 252.0).abs() < 1e-15);
//! ```

mod act;
mod bus252;

pub use act::{Act252, Act365Fixed};
pub use bus252::Bus252;

use serde::{Deserialize, Serialize};

use crate::calendars::Calendar;
use crate::error::RendaError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// - `year_fraction` returns the fraction of a year between dates; it is
///   negative when `end < start`
/// - `day_count` returns the number of days according to the convention
pub trait DayCount {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the day count between two dates.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of all supported day count conventions.
///
/// Serialises as its market name ("BUS/252"). Deserialising an unknown
/// name falls back to ACT/252.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DayCountConvention {
    /// Business days / 252
    #[default]
    Bus252,
    /// Calendar days / 252
    Act252,
    /// Calendar days / 365
    Act365,
}

impl DayCountConvention {
    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Bus252 => "BUS/252",
            DayCountConvention::Act252 => "ACT/252",
            DayCountConvention::Act365 => "ACT/365",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Bus252,
            DayCountConvention::Act252,
            DayCountConvention::Act365,
        ]
    }

    /// Denominator of the year fraction.
    #[must_use]
    pub const fn basis(&self) -> u32 {
        match self {
            DayCountConvention::Bus252 | DayCountConvention::Act252 => 252,
            DayCountConvention::Act365 => 365,
        }
    }

    /// True when days are counted on the business calendar.
    #[must_use]
    pub const fn counts_business_days(&self) -> bool {
        matches!(self, DayCountConvention::Bus252)
    }

    /// Year fraction between `start` and `end`, never negative.
    ///
    /// Spans where `end` precedes `start` clamp to zero.
    pub fn year_fraction<C: Calendar + ?Sized>(&self, start: Date, end: Date, calendar: &C) -> f64 {
        self.signed_year_fraction(start, end, calendar).max(0.0)
    }

    /// Year fraction without clamping; negative when `end < start`.
    pub fn signed_year_fraction<C: Calendar + ?Sized>(
        &self,
        start: Date,
        end: Date,
        calendar: &C,
    ) -> f64 {
        match self {
            DayCountConvention::Bus252 => Bus252::new(calendar).year_fraction(start, end),
            DayCountConvention::Act252 => Act252.year_fraction(start, end),
            DayCountConvention::Act365 => Act365Fixed.year_fraction(start, end),
        }
    }

    /// Day count between `start` and `end` under this convention.
    pub fn day_count<C: Calendar + ?Sized>(&self, start: Date, end: Date, calendar: &C) -> i64 {
        match self {
            DayCountConvention::Bus252 => Bus252::new(calendar).day_count(start, end),
            DayCountConvention::Act252 => Act252.day_count(start, end),
            DayCountConvention::Act365 => Act365Fixed.day_count(start, end),
        }
    }

    /// Parses a convention, falling back to ACT/252 for unknown names.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            log::warn!("Unknown day count '{}', defaulting to ACT/252", s);
            DayCountConvention::Act252
        })
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = RendaError;

    /// Parses a day count convention.
    ///
    /// Accepts market names ("BUS/252", "ACT/365"), the Portuguese "DU/252"
    /// and "DC/252", and compact forms ("BUS252", "252").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(' ', "");

        match normalized.as_str() {
            "BUS/252" | "BUS252" | "DU/252" | "DU252" | "BD/252" | "252" => {
                Ok(DayCountConvention::Bus252)
            }
            "ACT/252" | "ACT252" | "DC/252" | "DC252" | "ACTUAL/252" => {
                Ok(DayCountConvention::Act252)
            }
            "ACT/365" | "ACT365" | "ACT/365F" | "ACT/365FIXED" | "ACTUAL/365" | "DC/365" => {
                Ok(DayCountConvention::Act365)
            }
            _ => Err(RendaError::UnknownDayCount(s.to_string())),
        }
    }
}

impl From<String> for DayCountConvention {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

impl From<DayCountConvention> for String {
    fn from(value: DayCountConvention) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{BrazilCalendar, WeekendCalendar};
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_bus252_half_year() {
        let cal = BrazilCalendar::anbima();
        let issue = d(2023, 1, 2);
        let asof = cal.add_business_days(issue, 126);

        let yf = DayCountConvention::Bus252.year_fraction(issue, asof, &cal);
        assert_relative_eq!(yf, 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_act252_and_act365() {
        let start = d(2025, 1, 1);
        let end = d(2026, 1, 1);

        assert_relative_eq!(
            DayCountConvention::Act252.year_fraction(start, end, &WeekendCalendar),
            365.0 / 252.0
        );
        assert_relative_eq!(
            DayCountConvention::Act365.year_fraction(start, end, &WeekendCalendar),
            1.0
        );
    }

    #[test]
    fn test_negative_span_clamps_to_zero() {
        let start = d(2025, 6, 1);
        let end = d(2025, 1, 1);
        for convention in DayCountConvention::all() {
            assert_eq!(convention.year_fraction(start, end, &WeekendCalendar), 0.0);
            assert!(convention.signed_year_fraction(start, end, &WeekendCalendar) < 0.0);
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("BUS/252".parse::<DayCountConvention>().unwrap(), DayCountConvention::Bus252);
        assert_eq!("du/252".parse::<DayCountConvention>().unwrap(), DayCountConvention::Bus252);
        assert_eq!("ACT/252".parse::<DayCountConvention>().unwrap(), DayCountConvention::Act252);
        assert_eq!("ACT/365F".parse::<DayCountConvention>().unwrap(), DayCountConvention::Act365);
        assert!("30/360".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_unknown_defaults_to_act252() {
        assert_eq!(DayCountConvention::parse_or_default("30/360"), DayCountConvention::Act252);
        let parsed: DayCountConvention = serde_json::from_str("\"ACT/ACT\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Act252);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for convention in DayCountConvention::all() {
            let parsed: DayCountConvention = convention.name().parse().unwrap();
            assert_eq!(*convention, parsed);
        }
    }

    #[test]
    fn test_serde_uses_market_name() {
        let json = serde_json::to_string(&DayCountConvention::Bus252).unwrap();
        assert_eq!(json, "\"BUS/252\"");
    }
}
