//! Reference index data.
//!
//! - [`IndexSnapshot`]: immutable CDI/SELIC daily rates and the IPCA number
//!   index, fetched once per valuation
//! - [`IndexerRepository`]: the data-source seam, with an in-memory
//!   implementation
//! - [`prorata_ipca`] / [`ipca_ratio`]: daily interpolation of the monthly
//!   IPCA number index under a publication lag

mod prorata;
mod repository;
mod snapshot;

pub use prorata::{ipca_ratio, prorata_ipca, PRORATA_MAX_ATTEMPTS};
pub use repository::{fetch_snapshot, InMemoryIndexerRepository, IndexerRepository};
pub use snapshot::{DailyRates, DailySeries, IndexSnapshot, IndexSnapshotBuilder, MonthlyIndex};
