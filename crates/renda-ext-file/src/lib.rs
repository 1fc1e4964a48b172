//! # Renda Ext File
//!
//! File-based index data for the Renda valuation engine.
//!
//! A data directory holds up to three CSV files:
//!
//! | File | Columns | Units |
//! |------|---------|-------|
//! | `cdi.csv` | `date,rate` | percent per day |
//! | `selic.csv` | `date,rate` | percent per day |
//! | `ipca.csv` | `year_month,index` | number index, `YYYYMM` keys |
//!
//! Missing files load as empty series.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod indices;

pub use error::{FileError, FileResult};
pub use indices::{
    load_daily_rates, load_monthly_index, FileIndexerRepository, CDI_FILE, IPCA_FILE, SELIC_FILE,
};
