//! Domain types for fixed income valuation.
//!
//! - [`Date`]: Calendar date for financial calculations
//! - [`YearMonth`]: Month key of a monthly published index ("YYYYMM")
//! - [`CashFlow`]: Dated cash flow amount

mod cashflow;
mod date;
mod year_month;

pub use cashflow::CashFlow;
pub use date::Date;
pub use year_month::YearMonth;
