//! Instrument definitions.
//!
//! An [`Instrument`] is validated once by [`InstrumentBuilder::build`]; every
//! pricer can then rely on its invariants:
//!
//! - `face_value > 0`
//! - `maturity_date > issue_date` when present
//! - PRICE/SAC amortization has a maturity, an IPCA indexer and at least one
//!   whole amortization period

mod kinds;

pub use kinds::{Amortization, Indexer, InstrumentKind};

use serde::{Deserialize, Serialize};

use renda_core::daycounts::DayCountConvention;
use renda_core::Date;

use crate::error::{BondError, BondResult};

/// Default publication lag of the IPCA number index, in months.
pub const DEFAULT_IPCA_LAG_MONTHS: u32 = 2;

/// A secondary-market entry point: the unit price paid on a trade date.
///
/// Pre-fixed instruments compound from this price and date instead of the
/// face value and issue date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Traded unit price.
    pub price: f64,
    /// Trade date.
    pub date: Date,
}

/// A Brazilian fixed income instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InstrumentSpec", into = "InstrumentSpec")]
pub struct Instrument {
    kind: InstrumentKind,
    indexer: Indexer,
    rate: f64,
    day_count: DayCountConvention,
    issue_date: Date,
    maturity_date: Option<Date>,
    amortization: Amortization,
    amortization_frequency_months: u32,
    ipca_lag_months: Option<u32>,
    face_value: f64,
    entry: Option<Entry>,
}

impl Instrument {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> InstrumentBuilder {
        InstrumentBuilder::new()
    }

    /// Legal form.
    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// Reference index.
    pub fn indexer(&self) -> Indexer {
        self.indexer
    }

    /// Annual rate.
    ///
    /// Nominal for PRE, the contracted multiplier for CDI/SELIC (either
    /// `1.2` or `120`), real for IPCA.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Day count convention.
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Issue date.
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Maturity date, if the instrument has one.
    pub fn maturity_date(&self) -> Option<Date> {
        self.maturity_date
    }

    /// Amortization method.
    pub fn amortization(&self) -> Amortization {
        self.amortization
    }

    /// Months between amortization payments.
    pub fn amortization_frequency_months(&self) -> u32 {
        self.amortization_frequency_months
    }

    /// IPCA publication lag, if set on the instrument.
    pub fn ipca_lag_months(&self) -> Option<u32> {
        self.ipca_lag_months
    }

    /// Face value.
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Secondary-market entry point, if any.
    pub fn entry(&self) -> Option<Entry> {
        self.entry
    }

    /// Returns the maturity date or a missing-field error.
    pub fn require_maturity(&self) -> BondResult<Date> {
        self.maturity_date
            .ok_or_else(|| BondError::missing_field("maturity_date"))
    }
}

/// Builder for [`Instrument`].
#[derive(Debug, Clone, Default)]
pub struct InstrumentBuilder {
    kind: Option<InstrumentKind>,
    indexer: Option<Indexer>,
    rate: Option<f64>,
    day_count: Option<DayCountConvention>,
    issue_date: Option<Date>,
    maturity_date: Option<Date>,
    amortization: Option<Amortization>,
    amortization_frequency_months: Option<u32>,
    ipca_lag_months: Option<u32>,
    face_value: Option<f64>,
    entry: Option<Entry>,
}

impl InstrumentBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the legal form.
    pub fn kind(mut self, kind: InstrumentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the indexer.
    pub fn indexer(mut self, indexer: Indexer) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Sets the annual rate or multiplier.
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the day count convention (default BUS/252).
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Sets the issue date.
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the amortization method (default bullet).
    pub fn amortization(mut self, amortization: Amortization) -> Self {
        self.amortization = Some(amortization);
        self
    }

    /// Sets the months between amortization payments (default 1).
    pub fn amortization_frequency_months(mut self, months: u32) -> Self {
        self.amortization_frequency_months = Some(months);
        self
    }

    /// Sets the IPCA publication lag.
    pub fn ipca_lag_months(mut self, months: u32) -> Self {
        self.ipca_lag_months = Some(months);
        self
    }

    /// Sets the face value.
    pub fn face_value(mut self, face_value: f64) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets a secondary-market entry point.
    pub fn entry(mut self, price: f64, date: Date) -> Self {
        self.entry = Some(Entry { price, date });
        self
    }

    /// Builds the instrument.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the terms are
    /// inconsistent.
    pub fn build(self) -> BondResult<Instrument> {
        let kind = self.kind.ok_or_else(|| BondError::missing_field("kind"))?;
        let indexer = self
            .indexer
            .ok_or_else(|| BondError::missing_field("indexer"))?;
        let rate = self.rate.ok_or_else(|| BondError::missing_field("rate"))?;
        let issue_date = self
            .issue_date
            .ok_or_else(|| BondError::missing_field("issue_date"))?;
        let face_value = self
            .face_value
            .ok_or_else(|| BondError::missing_field("face_value"))?;
        let amortization = self.amortization.unwrap_or_default();
        let amortization_frequency_months = self.amortization_frequency_months.unwrap_or(1);

        if !rate.is_finite() {
            return Err(BondError::invalid_input("rate must be finite"));
        }
        if !(face_value.is_finite() && face_value > 0.0) {
            return Err(BondError::invalid_input("face_value must be positive"));
        }
        if let Some(maturity) = self.maturity_date {
            if maturity <= issue_date {
                return Err(BondError::invalid_input(
                    "maturity_date must be after issue_date",
                ));
            }
        }
        if amortization_frequency_months == 0 {
            return Err(BondError::invalid_input(
                "amortization_frequency_months must be at least 1",
            ));
        }
        if let Some(entry) = self.entry {
            if !(entry.price.is_finite() && entry.price > 0.0) {
                return Err(BondError::invalid_input("entry price must be positive"));
            }
        }

        if amortization.is_amortizing() {
            let maturity = self
                .maturity_date
                .ok_or_else(|| BondError::missing_field("maturity_date"))?;
            if indexer != Indexer::Ipca {
                return Err(BondError::UnsupportedPairing {
                    indexer: indexer.to_string(),
                    amortization: amortization.to_string(),
                });
            }
            let months = issue_date.months_between(&maturity);
            if months < amortization_frequency_months as i32 {
                return Err(BondError::invalid_input(format!(
                    "{} amortization needs at least one {}-month period before maturity",
                    amortization, amortization_frequency_months
                )));
            }
        }

        Ok(Instrument {
            kind,
            indexer,
            rate,
            day_count: self.day_count.unwrap_or_default(),
            issue_date,
            maturity_date: self.maturity_date,
            amortization,
            amortization_frequency_months,
            ipca_lag_months: self.ipca_lag_months,
            face_value,
            entry: self.entry,
        })
    }
}

/// Serialized form of an [`Instrument`], validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InstrumentSpec {
    kind: InstrumentKind,
    indexer: Indexer,
    rate: f64,
    #[serde(default)]
    day_count: DayCountConvention,
    issue_date: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    maturity_date: Option<Date>,
    #[serde(default)]
    amortization: Amortization,
    #[serde(default = "default_frequency")]
    amortization_frequency_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ipca_lag_months: Option<u32>,
    face_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entry: Option<Entry>,
}

fn default_frequency() -> u32 {
    1
}

impl TryFrom<InstrumentSpec> for Instrument {
    type Error = BondError;

    fn try_from(spec: InstrumentSpec) -> Result<Self, Self::Error> {
        let mut builder = InstrumentBuilder::new()
            .kind(spec.kind)
            .indexer(spec.indexer)
            .rate(spec.rate)
            .day_count(spec.day_count)
            .issue_date(spec.issue_date)
            .amortization(spec.amortization)
            .amortization_frequency_months(spec.amortization_frequency_months)
            .face_value(spec.face_value);
        builder.maturity_date = spec.maturity_date;
        builder.ipca_lag_months = spec.ipca_lag_months;
        builder.entry = spec.entry;
        builder.build()
    }
}

impl From<Instrument> for InstrumentSpec {
    fn from(instrument: Instrument) -> Self {
        Self {
            kind: instrument.kind,
            indexer: instrument.indexer,
            rate: instrument.rate,
            day_count: instrument.day_count,
            issue_date: instrument.issue_date,
            maturity_date: instrument.maturity_date,
            amortization: instrument.amortization,
            amortization_frequency_months: instrument.amortization_frequency_months,
            ipca_lag_months: instrument.ipca_lag_months,
            face_value: instrument.face_value,
            entry: instrument.entry,
        }
    }
}
