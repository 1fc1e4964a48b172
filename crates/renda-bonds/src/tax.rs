//! Brazilian income tax on fixed income gains.
//!
//! Regressive table by holding period:
//!
//! | Days held | Rate |
//! |-----------|------|
//! | up to 180 | 22.5% |
//! | 181 to 360 | 20% |
//! | 361 to 720 | 17.5% |
//! | over 720 | 15% |
//!
//! LCI, LCA, CRI and CRA are exempt for individuals. Illustrative only; the
//! pricers never apply tax.

use serde::{Deserialize, Serialize};

use renda_core::Date;

use crate::instruments::{Instrument, InstrumentKind};

/// Income tax rate for a holding period in calendar days.
pub fn income_tax_rate(holding_days: i64) -> f64 {
    match holding_days {
        d if d <= 180 => 0.225,
        d if d <= 360 => 0.20,
        d if d <= 720 => 0.175,
        _ => 0.15,
    }
}

/// Returns true if gains on this kind are exempt for individuals.
pub fn is_tax_exempt(kind: InstrumentKind) -> bool {
    matches!(
        kind,
        InstrumentKind::Lci | InstrumentKind::Lca | InstrumentKind::Cri | InstrumentKind::Cra
    )
}

/// Result of [`net_of_tax`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Calendar days held.
    pub holding_days: i64,
    /// Gain before tax; negative gains are not taxed.
    pub gain: f64,
    /// Rate applied.
    pub rate: f64,
    /// Tax due.
    pub tax: f64,
    /// Gross value minus tax.
    pub net_value: f64,
}

/// Applies income tax to the gain of a position held from `from` to `to`.
pub fn net_of_tax(
    instrument: &Instrument,
    gross_value: f64,
    invested: f64,
    from: Date,
    to: Date,
) -> TaxBreakdown {
    let holding_days = from.days_between(&to).max(0);
    let gain = gross_value - invested;
    let rate = if is_tax_exempt(instrument.kind()) {
        0.0
    } else {
        income_tax_rate(holding_days)
    };
    let tax = gain.max(0.0) * rate;
    TaxBreakdown {
        holding_days,
        gain,
        rate,
        tax,
        net_value: gross_value - tax,
    }
}
