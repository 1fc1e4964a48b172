//! Duration and convexity from discrete cash flows.
//!
//! For each cash flow with year fraction `t` and `pv = cf / (1 + y)^t`:
//!
//! - Macaulay duration: `Σ t·pv / Σ pv`
//! - Modified duration: `Macaulay / (1 + y)`
//! - Convexity: `(Σ t(t+1)·pv / Σ pv) / (1 + y)²`
//!
//! This is a per-cash-flow annual-compounding approximation, not a
//! continuous-time formula.

use serde::{Deserialize, Serialize};

use renda_core::calendars::Calendar;
use renda_core::daycounts::DayCountConvention;
use renda_core::{CashFlow, Date};

use crate::error::{BondError, BondResult};

/// Yield risk measures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMeasures {
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Convexity.
    pub convexity: f64,
}

/// Calculates duration and convexity at yield `ytm`.
///
/// Only cash flows dated on or after `asof` contribute; earlier flows are
/// excluded rather than counted at `t = 0`.
///
/// # Errors
///
/// Fails when `price <= 0`, there are no cash flows, `1 + ytm <= 0`, or the
/// summed present value is not positive.
pub fn risk_measures<C: Calendar + ?Sized>(
    ytm: f64,
    price: f64,
    cashflows: &[CashFlow],
    asof: Date,
    convention: DayCountConvention,
    calendar: &C,
) -> BondResult<RiskMeasures> {
    if !(price.is_finite() && price > 0.0) {
        return Err(BondError::numerical(format!("non-positive price {price}")));
    }
    let growth = 1.0 + ytm;
    if !(growth.is_finite() && growth > 0.0) {
        return Err(BondError::numerical(format!("invalid yield {ytm}")));
    }

    let mut pv_sum = 0.0;
    let mut time_weighted = 0.0;
    let mut convexity_weighted = 0.0;
    let mut count = 0;

    for cf in cashflows.iter().filter(|cf| cf.date >= asof) {
        let t = convention.year_fraction(asof, cf.date, calendar);
        let pv = cf.amount / growth.powf(t);
        pv_sum += pv;
        time_weighted += t * pv;
        convexity_weighted += t * (t + 1.0) * pv;
        count += 1;
    }

    if count == 0 {
        return Err(BondError::invalid_input(format!(
            "no cash flows on or after {asof}"
        )));
    }
    if !(pv_sum.is_finite() && pv_sum > 0.0) {
        return Err(BondError::numerical(format!(
            "non-positive present value {pv_sum}"
        )));
    }

    let macaulay = time_weighted / pv_sum;
    Ok(RiskMeasures {
        macaulay_duration: macaulay,
        modified_duration: macaulay / growth,
        convexity: (convexity_weighted / pv_sum) / (growth * growth),
    })
}

/// Modified duration and convexity, both absent on any failure.
pub fn duration_convexity<C: Calendar + ?Sized>(
    ytm: Option<f64>,
    price: f64,
    cashflows: &[CashFlow],
    asof: Date,
    convention: DayCountConvention,
    calendar: &C,
) -> (Option<f64>, Option<f64>) {
    let Some(y) = ytm else {
        return (None, None);
    };
    match risk_measures(y, price, cashflows, asof, convention, calendar) {
        Ok(measures) => (Some(measures.modified_duration), Some(measures.convexity)),
        Err(err) => {
            log::debug!("risk measures unavailable: {}", err);
            (None, None)
        }
    }
}
