//! Valuation entry point.

use renda_core::calendars::Calendar;
use renda_core::Date;

use super::{
    AmortizingPricer, EngineSettings, FloatingPricer, InflationBulletPricer, PreFixedPricer,
    Pricer, PricingContext, ValuationResult,
};
use crate::error::{BondError, BondResult};
use crate::indices::IndexSnapshot;
use crate::instruments::{Amortization, Indexer, Instrument};

/// The pricing path an instrument takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingMethod {
    /// PRE bullet.
    PreFixed,
    /// Percentage of CDI.
    FloatingCdi,
    /// Percentage of SELIC.
    FloatingSelic,
    /// IPCA bullet.
    InflationBullet,
    /// IPCA with PRICE or SAC amortization.
    InflationAmortizing,
}

impl PricingMethod {
    /// Selects the path for an instrument.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::UnsupportedPairing`] for amortizing non-IPCA
    /// instruments.
    pub fn for_instrument(instrument: &Instrument) -> BondResult<Self> {
        match (instrument.indexer(), instrument.amortization()) {
            (Indexer::Pre, Amortization::Bullet) => Ok(Self::PreFixed),
            (Indexer::Cdi, Amortization::Bullet) => Ok(Self::FloatingCdi),
            (Indexer::Selic, Amortization::Bullet) => Ok(Self::FloatingSelic),
            (Indexer::Ipca, Amortization::Bullet) => Ok(Self::InflationBullet),
            (Indexer::Ipca, Amortization::Price | Amortization::Sac) => {
                Ok(Self::InflationAmortizing)
            }
            (indexer, amortization) => Err(BondError::UnsupportedPairing {
                indexer: indexer.to_string(),
                amortization: amortization.to_string(),
            }),
        }
    }
}

/// Values instruments against a calendar and an index snapshot.
///
/// The engine holds no mutable state; one instance can be shared across
/// threads, with each call supplying its own snapshot.
///
/// ```rust
/// use renda_bonds::prelude::*;
/// use renda_core::prelude::*;
///
/// let calendar = BrazilCalendar::anbima();
/// let issue = Date::from_ymd(2023, 1, 2).unwrap();
/// let instrument = Instrument::builder()
///     .kind(InstrumentKind::Cdb)
///     .indexer(Indexer::Pre)
///     .rate(0.10)
///     .issue_date(issue)
///     .maturity_date(Date::from_ymd(2025, 1, 2).unwrap())
///     .face_value(1000.0)
///     .build()
///     .unwrap();
///
/// let engine = ValuationEngine::new(&calendar);
/// let asof = calendar.add_business_days(issue, 126);
/// let result = engine.value(&instrument, asof, &IndexSnapshot::empty()).unwrap();
/// assert!((result.dirty_price() - 1048.81).abs() < 0.01);
/// ```
#[derive(Debug)]
pub struct ValuationEngine<'a, C: Calendar> {
    calendar: &'a C,
    settings: EngineSettings,
}

impl<'a, C: Calendar> ValuationEngine<'a, C> {
    /// Creates an engine with default settings.
    pub fn new(calendar: &'a C) -> Self {
        Self {
            calendar,
            settings: EngineSettings::default(),
        }
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The calendar.
    pub fn calendar(&self) -> &'a C {
        self.calendar
    }

    /// The settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Values `instrument` on `asof`.
    ///
    /// # Errors
    ///
    /// Fails when `asof` precedes issue, the instrument pairing is
    /// unsupported, or required index data is missing.
    pub fn value(
        &self,
        instrument: &Instrument,
        asof: Date,
        snapshot: &IndexSnapshot,
    ) -> BondResult<ValuationResult> {
        if asof < instrument.issue_date() {
            return Err(BondError::invalid_input(format!(
                "valuation date {} precedes issue date {}",
                asof,
                instrument.issue_date()
            )));
        }

        let ctx = PricingContext {
            calendar: self.calendar,
            snapshot,
            settings: &self.settings,
        };

        match PricingMethod::for_instrument(instrument)? {
            PricingMethod::PreFixed => PreFixedPricer.value(&ctx, instrument, asof),
            PricingMethod::FloatingCdi => FloatingPricer::cdi().value(&ctx, instrument, asof),
            PricingMethod::FloatingSelic => FloatingPricer::selic().value(&ctx, instrument, asof),
            PricingMethod::InflationBullet => InflationBulletPricer.value(&ctx, instrument, asof),
            PricingMethod::InflationAmortizing => AmortizingPricer.value(&ctx, instrument, asof),
        }
    }
}
