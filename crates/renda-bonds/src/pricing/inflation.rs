//! IPCA-indexed bullet pricer.

use log::debug;

use renda_core::Date;

use super::{Analytics, Diagnostics, Pricer, PricingContext, ValuationResult};
use crate::cashflows::bullet_cashflow;
use crate::error::BondResult;
use crate::indices::ipca_ratio;
use crate::instruments::Instrument;

/// Pro-rata IPCA ratio times real compounding.
///
/// `dirty = face · ratio(issue, asof) · (1 + real)^t(issue, asof)`. Accrued
/// interest is the increment of `dirty` since the previous business day.
/// Yield and risk are computed in real terms on the terminal cash flow
/// `face · (1 + real)^t(issue, maturity)`; inflation after the valuation
/// date is never projected.
#[derive(Debug, Clone, Copy, Default)]
pub struct InflationBulletPricer;

struct Indexed {
    ratio: f64,
    real_factor: f64,
    year_fraction: f64,
}

impl InflationBulletPricer {
    fn indexed(ctx: &PricingContext<'_>, instrument: &Instrument, lag: u32, date: Date) -> BondResult<Indexed> {
        let issue = instrument.issue_date();
        let ratio = ipca_ratio(ctx.snapshot.ipca(), issue, date, lag)?;
        let year_fraction = instrument
            .day_count()
            .year_fraction(issue, date, ctx.calendar);
        Ok(Indexed {
            ratio,
            real_factor: (1.0 + instrument.rate()).powf(year_fraction),
            year_fraction,
        })
    }
}

impl Pricer for InflationBulletPricer {
    fn value(
        &self,
        ctx: &PricingContext<'_>,
        instrument: &Instrument,
        asof: Date,
    ) -> BondResult<ValuationResult> {
        let face = instrument.face_value();
        let issue = instrument.issue_date();
        let convention = instrument.day_count();
        let lag = instrument
            .ipca_lag_months()
            .unwrap_or(ctx.settings.default_ipca_lag_months);

        let today = Self::indexed(ctx, instrument, lag, asof)?;
        let dirty = face * today.ratio * today.real_factor;

        let previous_date = ctx
            .calendar
            .previous_business_day(asof.add_days(-1))
            .max(issue);
        let previous = Self::indexed(ctx, instrument, lag, previous_date)?;
        let previous_dirty = face * previous.ratio * previous.real_factor;
        let accrued = dirty - previous_dirty;

        let real_price = dirty / today.ratio;
        let terminal = instrument.maturity_date().map(|maturity| {
            bullet_cashflow(face, instrument.rate(), issue, maturity, convention, ctx.calendar)
        });
        let analytics = match terminal {
            Some(cf) if cf.date >= asof => {
                Analytics::from_cashflows(ctx, real_price, &[cf], asof, convention)
            }
            _ => Analytics::none(),
        };

        debug!(
            "IPCA bullet on {}: ratio={:.10} real_factor={:.10} dirty={:.6} accrued={:.6}",
            asof, today.ratio, today.real_factor, dirty, accrued
        );

        Ok(ValuationResult::new(
            dirty - accrued,
            accrued,
            analytics,
            Diagnostics::InflationBullet {
                index_ratio: today.ratio,
                real_factor: today.real_factor,
                year_fraction: today.year_fraction,
                previous_date,
                real_price,
                terminal_cashflow: terminal,
            },
        ))
    }
}
