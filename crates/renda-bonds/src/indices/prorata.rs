//! Pro-rata interpolation of the monthly IPCA number index.

use log::warn;

use renda_core::Date;

use super::snapshot::MonthlyIndex;
use crate::error::{BondError, BondResult};

/// How many reference-month pairs are tried before giving up.
pub const PRORATA_MAX_ATTEMPTS: u32 = 36;

/// Interpolates the IPCA number index to a single day.
///
/// The reference months are `month(date) - lag` and the month after it; the
/// weight is `(day - 1) / (days_in_month - 1)`, so day 1 returns the first
/// reference level and the last day of the month returns the second.
/// When either reference month is missing both are shifted one month
/// earlier, up to [`PRORATA_MAX_ATTEMPTS`] times.
pub fn prorata_ipca(index: &MonthlyIndex, date: Date, lag_months: u32) -> BondResult<f64> {
    let target = date.year_month();
    let dim = target.days_in_month();
    let weight = if dim > 1 {
        f64::from(date.day() - 1) / f64::from(dim - 1)
    } else {
        0.0
    };

    let mut m0 = target.add_months(-(lag_months as i32));
    for attempt in 0..PRORATA_MAX_ATTEMPTS {
        let m1 = m0.add_months(1);
        if let (Some(&i0), Some(&i1)) = (index.get(&m0), index.get(&m1)) {
            if attempt > 0 {
                warn!(
                    "IPCA for {} not published; interpolated {}/{} instead ({} months back)",
                    date, m0, m1, attempt
                );
            }
            return Ok(i0 * (1.0 - weight) + i1 * weight);
        }
        m0 = m0.add_months(-1);
    }

    Err(BondError::data_unavailable(format!(
        "no IPCA reference months for {date} within {PRORATA_MAX_ATTEMPTS} months of {}",
        target.add_months(-(lag_months as i32))
    )))
}

/// Ratio of pro-rata IPCA levels `index(to) / index(from)`.
pub fn ipca_ratio(index: &MonthlyIndex, from: Date, to: Date, lag_months: u32) -> BondResult<f64> {
    let base = prorata_ipca(index, from, lag_months)?;
    if base <= 0.0 {
        return Err(BondError::numerical(format!(
            "non-positive IPCA level {base} at {from}"
        )));
    }
    Ok(prorata_ipca(index, to, lag_months)? / base)
}
