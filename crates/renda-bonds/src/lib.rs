//! # Renda Bonds
//!
//! Valuation of Brazilian fixed income instruments.
//!
//! This crate provides:
//!
//! - **Instruments**: CDB, LCI, LCA, CRI, CRA, debentures and financial bills
//!   indexed to PRE, CDI, SELIC or IPCA, bullet or amortizing
//! - **Indices**: immutable CDI/SELIC/IPCA snapshots, the repository seam and
//!   pro-rata IPCA interpolation
//! - **Cash Flows**: bullet and PRICE/SAC schedules in real terms
//! - **Pricing**: clean/dirty price, accrued interest and yield to maturity
//! - **Risk**: modified duration and convexity
//!
//! ## Example
//!
//! ```rust
//! use renda_bonds::prelude::*;
//! use renda_core::prelude::*;
//!
//! let calendar = WeekendCalendar;
//! let issue = Date::from_ymd(2024, 1, 1).unwrap();
//! let instrument = Instrument::builder()
//!     .kind(InstrumentKind::Cdb)
//!     .indexer(Indexer::Cdi)
//!     .rate(110.0)
//!     .issue_date(issue)
//!     .face_value(1000.0)
//!     .build()
//!     .unwrap();
//!
//! let asof = Date::from_ymd(2024, 1, 5).unwrap();
//! let repository = InMemoryIndexerRepository::from_snapshot(
//!     &IndexSnapshot::builder()
//!         .daily_series(
//!             DailySeries::Cdi,
//!             calendar.business_day_list(issue, asof).into_iter().map(|d| (d, 0.04)).collect(),
//!         )
//!         .build(),
//! );
//!
//! let snapshot = fetch_snapshot(&repository, &calendar, &instrument, asof).unwrap();
//! let result = ValuationEngine::new(&calendar).value(&instrument, asof, &snapshot).unwrap();
//! assert!((result.dirty_price() - 1000.0 * 1.00044_f64.powi(5)).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::float_cmp)]

pub mod cashflows;
pub mod error;
pub mod indices;
pub mod instruments;
pub mod pricing;
pub mod risk;
pub mod tax;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{AmortizationSchedule, SchedulePeriod};
    pub use crate::error::{BondError, BondResult, ErrorCategory};
    pub use crate::indices::{
        fetch_snapshot, ipca_ratio, prorata_ipca, DailySeries, InMemoryIndexerRepository,
        IndexSnapshot, IndexerRepository,
    };
    pub use crate::instruments::{Amortization, Indexer, Instrument, InstrumentBuilder, InstrumentKind};
    pub use crate::pricing::{
        solve_ytm, value_batch, value_series, Diagnostics, EngineSettings, SolverSettings,
        ValuationEngine, ValuationRecord, ValuationRequest, ValuationResult, YieldSolver,
    };
    pub use crate::risk::{duration_convexity, RiskMeasures};
}

pub use error::{BondError, BondResult, ErrorCategory};
