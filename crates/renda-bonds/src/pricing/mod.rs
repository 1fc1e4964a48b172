//! Instrument pricing.
//!
//! Five pricing paths share one result type:
//!
//! | Indexer | Amortization | Pricer |
//! |---------|--------------|--------|
//! | PRE | bullet | [`PreFixedPricer`] |
//! | CDI | bullet | [`FloatingPricer`] |
//! | SELIC | bullet | [`FloatingPricer`] |
//! | IPCA | bullet | [`InflationBulletPricer`] |
//! | IPCA | PRICE / SAC | [`AmortizingPricer`] |
//!
//! [`ValuationEngine`] picks the path from the instrument's terms.

mod amortizing;
mod batch;
mod engine;
mod floating;
mod inflation;
mod prefixed;
mod settings;
mod yield_solver;

pub use amortizing::AmortizingPricer;
pub use batch::{value_batch, value_series, SeriesPoint, ValuationRequest};
pub use engine::{PricingMethod, ValuationEngine};
pub use floating::{normalize_multiplier, FloatingPricer};
pub use inflation::InflationBulletPricer;
pub use prefixed::PreFixedPricer;
pub use settings::{EngineSettings, SolverSettings};
pub use yield_solver::{solve_ytm, YieldResult, YieldSolver};

use serde::{Deserialize, Serialize};

use renda_core::calendars::Calendar;
use renda_core::daycounts::DayCountConvention;
use renda_core::{CashFlow, Date};

use crate::cashflows::SchedulePeriod;
use crate::error::BondResult;
use crate::indices::{DailySeries, IndexSnapshot};
use crate::instruments::{Amortization, Instrument};
use crate::risk::duration_convexity;

/// Everything a pricer may read besides the instrument and date.
#[derive(Clone, Copy)]
pub struct PricingContext<'a> {
    /// Business day calendar.
    pub calendar: &'a dyn Calendar,
    /// Index data for this valuation.
    pub snapshot: &'a IndexSnapshot,
    /// Engine settings.
    pub settings: &'a EngineSettings,
}

/// A pricing strategy for one family of instruments.
pub trait Pricer {
    /// Values `instrument` on `asof`.
    fn value(
        &self,
        ctx: &PricingContext<'_>,
        instrument: &Instrument,
        asof: Date,
    ) -> BondResult<ValuationResult>;
}

/// Yield and risk measures; each may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    /// Yield to maturity.
    pub ytm: Option<f64>,
    /// Modified duration (or relative first-order sensitivity).
    pub duration: Option<f64>,
    /// Convexity.
    pub convexity: Option<f64>,
}

impl Analytics {
    /// No analytics.
    pub fn none() -> Self {
        Self::default()
    }

    /// Solves the yield of `cashflows` at `price`, then duration and
    /// convexity at that yield.
    pub fn from_cashflows(
        ctx: &PricingContext<'_>,
        price: f64,
        cashflows: &[CashFlow],
        asof: Date,
        convention: DayCountConvention,
    ) -> Self {
        let ytm = solve_ytm(
            price,
            cashflows,
            asof,
            convention,
            ctx.calendar,
            &ctx.settings.solver,
        );
        let (duration, convexity) =
            duration_convexity(ytm, price, cashflows, asof, convention, ctx.calendar);
        Self {
            ytm,
            duration,
            convexity,
        }
    }
}

/// Trace of the intermediate values of a pricing path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pricer", rename_all = "snake_case")]
pub enum Diagnostics {
    /// Pre-fixed bullet.
    PreFixed {
        /// Face value or traded unit price.
        base_price: f64,
        /// Issue date or trade date.
        start_date: Date,
        /// Year fraction from start to valuation date.
        year_fraction: f64,
        /// Terminal cash flow, when the instrument has a maturity.
        terminal_cashflow: Option<CashFlow>,
    },
    /// CDI or SELIC floating rate.
    Floating {
        /// Daily series applied.
        series: DailySeries,
        /// Multiplier after percentage normalisation.
        multiplier: f64,
        /// Business days from issue to valuation date.
        business_days: usize,
        /// Days with a published rate.
        applied_days: usize,
        /// Business days without a published rate.
        skipped_days: usize,
        /// Compounded factor.
        total_factor: f64,
        /// Factor of the last applied day.
        last_daily_factor: f64,
    },
    /// IPCA bullet.
    InflationBullet {
        /// IPCA ratio from issue to valuation date.
        index_ratio: f64,
        /// Real compounding factor from issue to valuation date.
        real_factor: f64,
        /// Year fraction from issue to valuation date.
        year_fraction: f64,
        /// Day the accrued increment is measured from.
        previous_date: Date,
        /// Dirty price in real terms.
        real_price: f64,
        /// Real terminal cash flow, when the instrument has a maturity.
        terminal_cashflow: Option<CashFlow>,
    },
    /// IPCA with PRICE or SAC amortization.
    InflationAmortizing {
        /// PRICE or SAC.
        method: Amortization,
        /// Real rate per period.
        periodic_rate: f64,
        /// Number of periods in the schedule.
        total_periods: u32,
        /// Periods fully elapsed.
        elapsed_periods: u32,
        /// Real balance after the elapsed periods.
        balance_real: f64,
        /// Real interest of the current period.
        interest_real_period: f64,
        /// Fraction of the current period elapsed.
        period_fraction: f64,
        /// IPCA ratio from issue to valuation date.
        index_ratio: f64,
        /// The current period, if the schedule has not ended.
        current_period: Option<SchedulePeriod>,
        /// Real cash flows after the valuation date.
        remaining_cashflows: usize,
    },
}

/// Output of a valuation.
///
/// `dirty_price` is computed as `clean_price + accrued` at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    clean_price: f64,
    dirty_price: f64,
    accrued: f64,
    ytm: Option<f64>,
    duration: Option<f64>,
    convexity: Option<f64>,
    diagnostics: Diagnostics,
}

impl ValuationResult {
    /// Assembles a result from its clean price and accrued interest.
    pub fn new(clean_price: f64, accrued: f64, analytics: Analytics, diagnostics: Diagnostics) -> Self {
        Self {
            clean_price,
            dirty_price: clean_price + accrued,
            accrued,
            ytm: analytics.ytm,
            duration: analytics.duration,
            convexity: analytics.convexity,
            diagnostics,
        }
    }

    /// Price excluding accrued interest.
    pub fn clean_price(&self) -> f64 {
        self.clean_price
    }

    /// Price including accrued interest.
    pub fn dirty_price(&self) -> f64 {
        self.dirty_price
    }

    /// Accrued interest.
    pub fn accrued(&self) -> f64 {
        self.accrued
    }

    /// Yield to maturity.
    pub fn ytm(&self) -> Option<f64> {
        self.ytm
    }

    /// Duration.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Convexity.
    pub fn convexity(&self) -> Option<f64> {
        self.convexity
    }

    /// Pricing trace.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Flat view for serialisation.
    pub fn record(&self, date: Date) -> ValuationRecord {
        ValuationRecord {
            date,
            clean_price: self.clean_price,
            dirty_price: self.dirty_price,
            accrued: self.accrued,
            ytm: self.ytm,
            duration: self.duration,
            convexity: self.convexity,
        }
    }
}

/// Flat, serialisable valuation output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationRecord {
    /// Valuation date.
    pub date: Date,
    /// Clean price.
    pub clean_price: f64,
    /// Dirty price.
    pub dirty_price: f64,
    /// Accrued interest.
    pub accrued: f64,
    /// Yield to maturity.
    pub ytm: Option<f64>,
    /// Duration.
    pub duration: Option<f64>,
    /// Convexity.
    pub convexity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirty_is_clean_plus_accrued() {
        let result = ValuationResult::new(
            1000.1,
            0.35,
            Analytics::none(),
            Diagnostics::PreFixed {
                base_price: 1000.0,
                start_date: Date::from_ymd(2024, 1, 2).unwrap(),
                year_fraction: 0.0,
                terminal_cashflow: None,
            },
        );
        assert_eq!(result.dirty_price(), 1000.1 + 0.35);
        assert!(result.ytm().is_none());
    }

    #[test]
    fn test_record_serialises_flat() {
        let date = Date::from_ymd(2024, 1, 2).unwrap();
        let result = ValuationResult::new(
            1000.0,
            0.0,
            Analytics {
                ytm: Some(0.1),
                duration: None,
                convexity: None,
            },
            Diagnostics::PreFixed {
                base_price: 1000.0,
                start_date: date,
                year_fraction: 0.0,
                terminal_cashflow: None,
            },
        );
        let json = serde_json::to_value(result.record(date)).unwrap();
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["ytm"], 0.1);
        assert!(json["duration"].is_null());
    }
}
