//! Yield-to-maturity by bracketed bisection.
//!
//! `PV(y) = Σ cf / (1 + y)^t(asof, cf.date)` over cash flows dated on or
//! after the valuation date. The solver looks for `PV(y) = price` inside
//! `[-0.99, 5.0]`, widening the bracket when it does not straddle a root.
//!
//! ```rust
//! use renda_bonds::pricing::YieldSolver;
//! use renda_core::calendars::WeekendCalendar;
//! use renda_core::daycounts::DayCountConvention;
//! use renda_core::{CashFlow, Date};
//!
//! let asof = Date::from_ymd(2024, 1, 1).unwrap();
//! let cfs = [CashFlow::new(Date::from_ymd(2025, 1, 1).unwrap(), 1100.0)];
//! let solver = YieldSolver::new(DayCountConvention::Act365, &WeekendCalendar);
//! let ytm = solver.solve(1000.0, &cfs, asof).unwrap().ytm;
//! assert!((ytm - (1.1_f64.powf(365.0 / 366.0) - 1.0)).abs() < 1e-8);
//! ```

use log::warn;

use renda_core::calendars::Calendar;
use renda_core::daycounts::DayCountConvention;
use renda_core::{CashFlow, Date};
use renda_math::solvers::bisection_expanding;

use super::settings::SolverSettings;
use crate::error::{BondError, BondResult};

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldResult {
    /// The yield, as a decimal annual rate.
    pub ytm: f64,
    /// Bisection steps used.
    pub iterations: u32,
    /// `PV(ytm) - price`.
    pub residual: f64,
    /// Whether the residual reached tolerance before the step limit.
    pub converged: bool,
}

/// Yield solver bound to a day count and calendar.
#[derive(Debug, Clone, Copy)]
pub struct YieldSolver<'a, C: Calendar + ?Sized> {
    convention: DayCountConvention,
    calendar: &'a C,
    settings: SolverSettings,
}

impl<'a, C: Calendar + ?Sized> YieldSolver<'a, C> {
    /// Creates a solver with default settings.
    pub fn new(convention: DayCountConvention, calendar: &'a C) -> Self {
        Self {
            convention,
            calendar,
            settings: SolverSettings::default(),
        }
    }

    /// Replaces the solver settings.
    #[must_use]
    pub fn with_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.settings.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.settings.max_iterations = max_iterations;
        self
    }

    /// Present value of the cash flows on `asof` at yield `y`.
    ///
    /// Flows dated before `asof` are excluded, not discounted at `t = 0`.
    pub fn present_value(&self, cashflows: &[CashFlow], asof: Date, y: f64) -> f64 {
        self.discount_times(cashflows, asof)
            .iter()
            .map(|(t, amount)| amount / (1.0 + y).powf(*t))
            .sum()
    }

    fn discount_times(&self, cashflows: &[CashFlow], asof: Date) -> Vec<(f64, f64)> {
        cashflows
            .iter()
            .filter(|cf| cf.date >= asof)
            .map(|cf| {
                (
                    self.convention.year_fraction(asof, cf.date, self.calendar),
                    cf.amount,
                )
            })
            .collect()
    }

    /// Solves `PV(y) = price`.
    ///
    /// # Errors
    ///
    /// Fails when the price is not positive, no cash flow is dated on or
    /// after `asof`, or no sign-changing bracket is found.
    pub fn solve(&self, price: f64, cashflows: &[CashFlow], asof: Date) -> BondResult<YieldResult> {
        if !(price.is_finite() && price > 0.0) {
            return Err(BondError::numerical(format!("non-positive price {price}")));
        }
        let times = self.discount_times(cashflows, asof);
        if times.is_empty() {
            return Err(BondError::invalid_input(format!(
                "no cash flows on or after {asof}"
            )));
        }

        let objective = |y: f64| -> f64 {
            times
                .iter()
                .map(|(t, amount)| amount / (1.0 + y).powf(*t))
                .sum::<f64>()
                - price
        };

        let result = bisection_expanding(
            objective,
            self.settings.lower_bound,
            self.settings.upper_bound,
            &self.settings.bracket_expansion(),
            &self.settings.solver_config(),
        )?;

        Ok(YieldResult {
            ytm: result.root,
            iterations: result.iterations,
            residual: result.residual,
            converged: result.converged,
        })
    }
}

/// Solves for the yield, returning `None` when no yield can be extracted.
///
/// Cash flows dated before `asof` are excluded rather than counted at
/// `t = 0`; a flow paid on `asof` itself still counts.
pub fn solve_ytm<C: Calendar + ?Sized>(
    price: f64,
    cashflows: &[CashFlow],
    asof: Date,
    convention: DayCountConvention,
    calendar: &C,
    settings: &SolverSettings,
) -> Option<f64> {
    match YieldSolver::new(convention, calendar)
        .with_settings(*settings)
        .solve(price, cashflows, asof)
    {
        Ok(result) => Some(result.ytm),
        Err(err) => {
            warn!("yield extraction failed on {}: {}", asof, err);
            None
        }
    }
}
