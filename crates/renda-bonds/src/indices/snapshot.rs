//! Immutable index snapshot.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use renda_core::{Date, YearMonth};

/// Daily rates keyed by business day, in percent per day.
pub type DailyRates = BTreeMap<Date, f64>;

/// Monthly number index keyed by reference month.
pub type MonthlyIndex = BTreeMap<YearMonth, f64>;

/// A daily-published rate series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DailySeries {
    /// Interbank deposit rate.
    Cdi,
    /// Central bank policy rate.
    Selic,
}

impl fmt::Display for DailySeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailySeries::Cdi => write!(f, "CDI"),
            DailySeries::Selic => write!(f, "SELIC"),
        }
    }
}

/// Rates and index levels needed by a valuation.
///
/// A snapshot is built once and never mutated, which keeps every pricer a
/// pure function of `(instrument, date, snapshot)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    #[serde(default)]
    cdi: DailyRates,
    #[serde(default)]
    selic: DailyRates,
    #[serde(default)]
    ipca: MonthlyIndex,
}

impl IndexSnapshot {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> IndexSnapshotBuilder {
        IndexSnapshotBuilder::default()
    }

    /// An empty snapshot (enough for pre-fixed instruments).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The CDI daily series.
    pub fn cdi(&self) -> &DailyRates {
        &self.cdi
    }

    /// The SELIC daily series.
    pub fn selic(&self) -> &DailyRates {
        &self.selic
    }

    /// The given daily series.
    pub fn daily(&self, series: DailySeries) -> &DailyRates {
        match series {
            DailySeries::Cdi => &self.cdi,
            DailySeries::Selic => &self.selic,
        }
    }

    /// Published rate for a day, if any.
    pub fn daily_rate(&self, series: DailySeries, date: Date) -> Option<f64> {
        self.daily(series).get(&date).copied()
    }

    /// The IPCA number index.
    pub fn ipca(&self) -> &MonthlyIndex {
        &self.ipca
    }

    /// Returns true if the snapshot holds no data.
    pub fn is_empty(&self) -> bool {
        self.cdi.is_empty() && self.selic.is_empty() && self.ipca.is_empty()
    }
}

/// Builder for [`IndexSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshotBuilder {
    snapshot: IndexSnapshot,
}

impl IndexSnapshotBuilder {
    /// Adds one CDI fixing.
    pub fn cdi(mut self, date: Date, rate: f64) -> Self {
        self.snapshot.cdi.insert(date, rate);
        self
    }

    /// Adds one SELIC fixing.
    pub fn selic(mut self, date: Date, rate: f64) -> Self {
        self.snapshot.selic.insert(date, rate);
        self
    }

    /// Adds one IPCA index level.
    pub fn ipca(mut self, month: YearMonth, level: f64) -> Self {
        self.snapshot.ipca.insert(month, level);
        self
    }

    /// Replaces a whole daily series.
    pub fn daily_series(mut self, series: DailySeries, rates: DailyRates) -> Self {
        match series {
            DailySeries::Cdi => self.snapshot.cdi = rates,
            DailySeries::Selic => self.snapshot.selic = rates,
        }
        self
    }

    /// Replaces the IPCA index.
    pub fn ipca_index(mut self, index: MonthlyIndex) -> Self {
        self.snapshot.ipca = index;
        self
    }

    /// Freezes the snapshot.
    #[must_use]
    pub fn build(self) -> IndexSnapshot {
        self.snapshot
    }
}
