//! CDI / SELIC floating rate pricer.

use log::{debug, warn};

use renda_core::Date;
use renda_math::differences::central_differences;

use super::{Analytics, Diagnostics, Pricer, PricingContext, ValuationResult};
use crate::error::{BondError, BondResult};
use crate::indices::DailySeries;
use crate::instruments::Instrument;

/// Treats multipliers above 5 as percentages (`120` → `1.20`).
pub fn normalize_multiplier(multiplier: f64) -> f64 {
    if multiplier > 5.0 {
        multiplier / 100.0
    } else {
        multiplier
    }
}

/// Compounds a percentage of a daily-published rate.
///
/// Every business day from issue to the valuation date (both inclusive)
/// contributes `1 + (rate / 100) · multiplier`. Days without a published
/// rate are skipped. Accrued interest is the increment of the last applied
/// day only: `face · (F - F / last_factor)`.
#[derive(Debug, Clone, Copy)]
pub struct FloatingPricer {
    series: DailySeries,
}

#[derive(Debug, Clone, Copy)]
struct Compounding {
    business_days: usize,
    applied_days: usize,
    total_factor: f64,
    last_daily_factor: f64,
}

impl FloatingPricer {
    /// Pricer over the CDI series.
    pub fn cdi() -> Self {
        Self {
            series: DailySeries::Cdi,
        }
    }

    /// Pricer over the SELIC series.
    pub fn selic() -> Self {
        Self {
            series: DailySeries::Selic,
        }
    }

    /// The daily series this pricer compounds.
    pub fn series(&self) -> DailySeries {
        self.series
    }

    fn compound(
        &self,
        ctx: &PricingContext<'_>,
        days: &[Date],
        multiplier: f64,
    ) -> Compounding {
        let rates = ctx.snapshot.daily(self.series);
        let mut total_factor = 1.0;
        let mut last_daily_factor = 1.0;
        let mut applied_days = 0;

        for day in days {
            if let Some(rate) = rates.get(day) {
                last_daily_factor = 1.0 + (rate / 100.0) * multiplier;
                total_factor *= last_daily_factor;
                applied_days += 1;
            }
        }

        Compounding {
            business_days: days.len(),
            applied_days,
            total_factor,
            last_daily_factor,
        }
    }
}

impl Pricer for FloatingPricer {
    fn value(
        &self,
        ctx: &PricingContext<'_>,
        instrument: &Instrument,
        asof: Date,
    ) -> BondResult<ValuationResult> {
        let face = instrument.face_value();
        let multiplier = normalize_multiplier(instrument.rate());
        let days = ctx
            .calendar
            .business_day_list(instrument.issue_date(), asof);

        let base = self.compound(ctx, &days, multiplier);
        if base.business_days > 0 && base.applied_days == 0 {
            return Err(BondError::data_unavailable(format!(
                "no {} rates between {} and {}",
                self.series,
                instrument.issue_date(),
                asof
            )));
        }
        let skipped_days = base.business_days - base.applied_days;
        if skipped_days > 0 {
            warn!(
                "{} rate missing on {} of {} business days up to {}; skipped",
                self.series, skipped_days, base.business_days, asof
            );
        }

        let dirty = face * base.total_factor;
        let accrued = face * (base.total_factor - base.total_factor / base.last_daily_factor);

        let analytics = if base.applied_days == 0 {
            Analytics::none()
        } else {
            let ytm = (dirty / face).powf(252.0 / base.applied_days as f64) - 1.0;
            let bump = ctx.settings.bump;
            let down = face * self.compound(ctx, &days, multiplier - bump).total_factor;
            let up = face * self.compound(ctx, &days, multiplier + bump).total_factor;
            match central_differences(down, dirty, up, bump) {
                Ok(diffs) => Analytics {
                    ytm: Some(ytm),
                    duration: Some(diffs.first),
                    convexity: Some(diffs.second),
                },
                Err(err) => {
                    warn!("{} sensitivities unavailable on {}: {}", self.series, asof, err);
                    Analytics {
                        ytm: Some(ytm),
                        ..Analytics::none()
                    }
                }
            }
        };

        debug!(
            "{} floating on {}: multiplier={} applied={}/{} factor={:.10} dirty={:.6}",
            self.series,
            asof,
            multiplier,
            base.applied_days,
            base.business_days,
            base.total_factor,
            dirty
        );

        Ok(ValuationResult::new(
            dirty - accrued,
            accrued,
            analytics,
            Diagnostics::Floating {
                series: self.series,
                multiplier,
                business_days: base.business_days,
                applied_days: base.applied_days,
                skipped_days,
                total_factor: base.total_factor,
                last_daily_factor: base.last_daily_factor,
            },
        ))
    }
}
