//! IPCA-indexed amortizing (PRICE / SAC) pricer.

use log::debug;

use renda_core::daycounts::DayCountConvention;
use renda_core::Date;

use super::{Analytics, Diagnostics, Pricer, PricingContext, ValuationResult};
use crate::cashflows::{AmortizationSchedule, SchedulePeriod};
use crate::error::BondResult;
use crate::indices::ipca_ratio;
use crate::instruments::Instrument;

/// Values a PRICE or SAC schedule built in real terms.
///
/// The real balance after the elapsed periods, converted by the IPCA ratio,
/// is the clean price. Accrued interest is the current period's real interest
/// times the ratio times the elapsed fraction of the period. That fraction
/// counts business days under BUS/252 and uses a flat 30-day month under any
/// other convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizingPricer;

impl AmortizingPricer {
    /// Fraction of `period` elapsed on `asof`.
    pub fn period_fraction(
        ctx: &PricingContext<'_>,
        convention: DayCountConvention,
        period: &SchedulePeriod,
        frequency_months: u32,
        asof: Date,
    ) -> f64 {
        if convention == DayCountConvention::Bus252 {
            let total = ctx.calendar.count_business_days(period.start, period.end);
            if total <= 0 {
                return 0.0;
            }
            ctx.calendar.count_business_days(period.start, asof) as f64 / total as f64
        } else {
            period.start.days_between(&asof) as f64 / (30.0 * f64::from(frequency_months))
        }
    }
}

impl Pricer for AmortizingPricer {
    fn value(
        &self,
        ctx: &PricingContext<'_>,
        instrument: &Instrument,
        asof: Date,
    ) -> BondResult<ValuationResult> {
        let issue = instrument.issue_date();
        let maturity = instrument.require_maturity()?;
        let frequency = instrument.amortization_frequency_months();
        let convention = instrument.day_count();
        let lag = instrument
            .ipca_lag_months()
            .unwrap_or(ctx.settings.default_ipca_lag_months);

        let schedule = AmortizationSchedule::build(
            instrument.amortization(),
            instrument.face_value(),
            instrument.rate(),
            issue,
            maturity,
            frequency,
        )?;
        let total = schedule.total_periods();
        let k = schedule.elapsed_periods(asof);

        let balance_real = schedule.balance_after(k);
        let current_period = schedule.period(k + 1).copied();
        let (interest_real_period, period_fraction) = match &current_period {
            Some(period) => (
                period.interest,
                Self::period_fraction(ctx, convention, period, frequency, asof),
            ),
            None => (0.0, 0.0),
        };

        let ratio = ipca_ratio(ctx.snapshot.ipca(), issue, asof, lag)?;
        let clean = balance_real * ratio;
        let accrued = interest_real_period * ratio * period_fraction;

        let remaining = schedule.cashflows_after(asof);
        let real_price = (clean + accrued) / ratio;
        let analytics = if remaining.is_empty() {
            Analytics::none()
        } else {
            Analytics::from_cashflows(ctx, real_price, &remaining, asof, convention)
        };

        debug!(
            "IPCA {} on {}: k={}/{} balance_real={:.6} ratio={:.10} frac={:.6}",
            schedule.method(),
            asof,
            k,
            total,
            balance_real,
            ratio,
            period_fraction
        );

        Ok(ValuationResult::new(
            clean,
            accrued,
            analytics,
            Diagnostics::InflationAmortizing {
                method: schedule.method(),
                periodic_rate: schedule.periodic_rate(),
                total_periods: total,
                elapsed_periods: k,
                balance_real,
                interest_real_period,
                period_fraction,
                index_ratio: ratio,
                current_period,
                remaining_cashflows: remaining.len(),
            },
        ))
    }
}
