//! # Renda Core
//!
//! Core types, day counts and business calendars for the Renda fixed income
//! valuation engine.
//!
//! This crate provides the foundational building blocks used throughout Renda:
//!
//! - **Types**: `Date`, `YearMonth` and `CashFlow`
//! - **Day Count Conventions**: BUS/252, ACT/252 and ACT/365 year fractions
//! - **Business Day Calendars**: the ANBIMA national calendar and a weekend-only calendar
//!
//! ## Example
//!
//! ```rust
//! use renda_core::prelude::*;
//!
//! let calendar = BrazilCalendar::anbima();
//! let issue = Date::from_ymd(2023, 1, 2).unwrap();
//! let asof = calendar.add_business_days(issue, 126);
//!
//! let t = DayCountConvention::Bus252.year_fraction(issue, asof, &calendar);
//! assert!((t - 0.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BrazilCalendar, Calendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{RendaError, RendaResult};
    pub use crate::types::{CashFlow, Date, YearMonth};
}

// Re-export commonly used types at crate root
pub use error::{RendaError, RendaResult};
pub use types::{CashFlow, Date, YearMonth};
