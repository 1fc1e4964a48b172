//! Cash flow schedules.
//!
//! Builds bullet and amortizing (PRICE / SAC) schedules. Amounts for IPCA
//! instruments stay in real terms; callers convert with the index ratio.

mod schedule;

pub use schedule::{
    bullet_cashflow, periodic_rate, AmortizationSchedule, SchedulePeriod,
};
