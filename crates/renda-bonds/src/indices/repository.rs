//! The index data source seam.

use log::debug;

use renda_core::calendars::Calendar;
use renda_core::Date;

use super::prorata::prorata_ipca;
use super::snapshot::{DailyRates, DailySeries, IndexSnapshot, MonthlyIndex};
use crate::error::BondResult;
use crate::instruments::{Indexer, Instrument};

/// Source of CDI/SELIC daily rates and the IPCA number index.
///
/// Implementations may do I/O; the pricers never call them directly. Data
/// is pulled once into an [`IndexSnapshot`] by [`fetch_snapshot`].
pub trait IndexerRepository: Send + Sync {
    /// CDI rates (percent per day) for business days in `[start, end]`.
    fn cdi_daily(&self, start: Date, end: Date) -> BondResult<DailyRates>;

    /// SELIC rates (percent per day) for business days in `[start, end]`.
    fn selic_daily(&self, start: Date, end: Date) -> BondResult<DailyRates>;

    /// The full IPCA number index keyed by month.
    fn ipca_number_index(&self) -> BondResult<MonthlyIndex>;

    /// Daily series by kind.
    fn daily(&self, series: DailySeries, start: Date, end: Date) -> BondResult<DailyRates> {
        match series {
            DailySeries::Cdi => self.cdi_daily(start, end),
            DailySeries::Selic => self.selic_daily(start, end),
        }
    }

    /// Pro-rata IPCA level for a day.
    fn prorata_ipca(&self, index: &MonthlyIndex, date: Date, lag_months: u32) -> BondResult<f64> {
        prorata_ipca(index, date, lag_months)
    }
}

/// An [`IndexerRepository`] over in-memory series.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIndexerRepository {
    cdi: DailyRates,
    selic: DailyRates,
    ipca: MonthlyIndex,
}

impl InMemoryIndexerRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository from all three series.
    #[must_use]
    pub fn with_series(cdi: DailyRates, selic: DailyRates, ipca: MonthlyIndex) -> Self {
        Self { cdi, selic, ipca }
    }

    /// Creates a repository holding everything in a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &IndexSnapshot) -> Self {
        Self::with_series(
            snapshot.cdi().clone(),
            snapshot.selic().clone(),
            snapshot.ipca().clone(),
        )
    }
}

fn range(rates: &DailyRates, start: Date, end: Date) -> DailyRates {
    if end < start {
        return DailyRates::new();
    }
    rates
        .range(start..=end)
        .map(|(date, rate)| (*date, *rate))
        .collect()
}

impl IndexerRepository for InMemoryIndexerRepository {
    fn cdi_daily(&self, start: Date, end: Date) -> BondResult<DailyRates> {
        Ok(range(&self.cdi, start, end))
    }

    fn selic_daily(&self, start: Date, end: Date) -> BondResult<DailyRates> {
        Ok(range(&self.selic, start, end))
    }

    fn ipca_number_index(&self) -> BondResult<MonthlyIndex> {
        Ok(self.ipca.clone())
    }
}

/// Fetches exactly the data needed to value `instrument` on `asof`.
///
/// Daily series are requested over `[issue, asof]`, the days the floating
/// pricer compounds; IPCA instruments get the whole monthly index, since the pro-rata
/// fallback may reach up to three years back. Pre-fixed instruments need no
/// data and get an empty snapshot.
pub fn fetch_snapshot<R, C>(
    repository: &R,
    calendar: &C,
    instrument: &Instrument,
    asof: Date,
) -> BondResult<IndexSnapshot>
where
    R: IndexerRepository + ?Sized,
    C: Calendar + ?Sized,
{
    let builder = IndexSnapshot::builder();
    let snapshot = match instrument.indexer() {
        Indexer::Pre => builder.build(),
        Indexer::Cdi | Indexer::Selic => {
            let series = if instrument.indexer() == Indexer::Cdi {
                DailySeries::Cdi
            } else {
                DailySeries::Selic
            };
            let start = instrument.issue_date();
            let rates = repository.daily(series, start, asof)?;
            debug!("fetched {} {} fixings for {}..{}", rates.len(), series, start, asof);
            builder.daily_series(series, rates).build()
        }
        Indexer::Ipca => builder.ipca_index(repository.ipca_number_index()?).build(),
    };
    Ok(snapshot)
}
