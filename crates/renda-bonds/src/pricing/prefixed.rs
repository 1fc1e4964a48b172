//! Pre-fixed bullet pricer.

use log::debug;

use renda_core::Date;

use super::{Analytics, Diagnostics, Pricer, PricingContext, ValuationResult};
use crate::cashflows::bullet_cashflow;
use crate::error::BondResult;
use crate::instruments::Instrument;

/// Compounds a fixed annual rate from issue (or the trade date).
///
/// `dirty = base · (1 + rate)^t(start, asof)`, and the whole compounding is
/// price, so `clean = dirty` and accrued is zero. The yield is solved against
/// the single terminal cash flow `base · (1 + rate)^t(start, maturity)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreFixedPricer;

impl Pricer for PreFixedPricer {
    fn value(
        &self,
        ctx: &PricingContext<'_>,
        instrument: &Instrument,
        asof: Date,
    ) -> BondResult<ValuationResult> {
        let (base, start) = instrument.entry().map_or(
            (instrument.face_value(), instrument.issue_date()),
            |entry| (entry.price, entry.date),
        );
        let convention = instrument.day_count();
        let rate = instrument.rate();

        let t = convention.year_fraction(start, asof, ctx.calendar);
        let dirty = base * (1.0 + rate).powf(t);

        let terminal = instrument
            .maturity_date()
            .map(|maturity| bullet_cashflow(base, rate, start, maturity, convention, ctx.calendar));
        let analytics = match terminal {
            Some(cf) if cf.date >= asof => {
                Analytics::from_cashflows(ctx, dirty, &[cf], asof, convention)
            }
            _ => Analytics::none(),
        };

        debug!(
            "pre-fixed {} on {}: base={} t={:.6} dirty={:.6} ytm={:?}",
            instrument.kind(),
            asof,
            base,
            t,
            dirty,
            analytics.ytm
        );

        Ok(ValuationResult::new(
            dirty,
            0.0,
            analytics,
            Diagnostics::PreFixed {
                base_price: base,
                start_date: start,
                year_fraction: t,
                terminal_cashflow: terminal,
            },
        ))
    }
}
