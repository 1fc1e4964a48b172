//! Bullet and amortizing schedule construction.

use serde::{Deserialize, Serialize};

use renda_core::calendars::Calendar;
use renda_core::daycounts::DayCountConvention;
use renda_core::{CashFlow, Date};

use crate::error::{BondError, BondResult};
use crate::instruments::Amortization;

/// Converts an annual rate to the rate for a period of `months` months.
///
/// `(1 + annual)^(months / 12) - 1`
pub fn periodic_rate(annual_rate: f64, months: u32) -> f64 {
    (1.0 + annual_rate).powf(f64::from(months) / 12.0) - 1.0
}

/// Single terminal cash flow of a compounding bullet.
///
/// Pays `base · (1 + rate)^t(start, maturity)` on `maturity`.
pub fn bullet_cashflow<C: Calendar + ?Sized>(
    base: f64,
    annual_rate: f64,
    start: Date,
    maturity: Date,
    convention: DayCountConvention,
    calendar: &C,
) -> CashFlow {
    let t = convention.year_fraction(start, maturity, calendar);
    CashFlow::new(maturity, base * (1.0 + annual_rate).powf(t))
}

/// One period of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    /// 1-based period number.
    pub number: u32,
    /// Period start date.
    pub start: Date,
    /// Period end (payment) date.
    pub end: Date,
    /// Balance at the start of the period.
    pub opening_balance: f64,
    /// Interest for the period.
    pub interest: f64,
    /// Principal repaid at the end of the period.
    pub amortization: f64,
    /// Total payment (interest plus amortization).
    pub payment: f64,
    /// Balance after the payment.
    pub closing_balance: f64,
}

/// A PRICE or SAC schedule.
///
/// Period `j` ends `j · frequency` months after issue; the number of periods
/// is `⌊months(issue, maturity) / frequency⌋`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    method: Amortization,
    face_value: f64,
    periodic_rate: f64,
    frequency_months: u32,
    periods: Vec<SchedulePeriod>,
}

impl AmortizationSchedule {
    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// Fails for a bullet method, a zero frequency, or when no whole period
    /// fits between issue and maturity.
    pub fn build(
        method: Amortization,
        face_value: f64,
        annual_rate: f64,
        issue: Date,
        maturity: Date,
        frequency_months: u32,
    ) -> BondResult<Self> {
        if !method.is_amortizing() {
            return Err(BondError::invalid_input(
                "bullet instruments have no amortization schedule",
            ));
        }
        if frequency_months == 0 {
            return Err(BondError::invalid_input("amortization frequency must be positive"));
        }
        let months = issue.months_between(&maturity);
        let total = if months > 0 {
            months as u32 / frequency_months
        } else {
            0
        };
        if total == 0 {
            return Err(BondError::invalid_input(format!(
                "no whole {frequency_months}-month period between {issue} and {maturity}"
            )));
        }

        let i = periodic_rate(annual_rate, frequency_months);
        let n = f64::from(total);
        let installment = if i.abs() < 1e-15 {
            face_value / n
        } else {
            face_value * i / (1.0 - (1.0 + i).powf(-n))
        };
        let constant_amortization = face_value / n;

        let mut periods = Vec::with_capacity(total as usize);
        let mut balance = face_value;
        let mut start = issue;
        for number in 1..=total {
            let end = issue.add_months((number * frequency_months) as i32)?;
            let interest = balance * i;
            let (amortization, payment) = match method {
                Amortization::Price => (installment - interest, installment),
                _ => (constant_amortization, constant_amortization + interest),
            };
            let closing_balance = balance - amortization;
            periods.push(SchedulePeriod {
                number,
                start,
                end,
                opening_balance: balance,
                interest,
                amortization,
                payment,
                closing_balance,
            });
            balance = closing_balance;
            start = end;
        }

        Ok(Self {
            method,
            face_value,
            periodic_rate: i,
            frequency_months,
            periods,
        })
    }

    /// Amortization method.
    pub fn method(&self) -> Amortization {
        self.method
    }

    /// Rate applied per period.
    pub fn periodic_rate(&self) -> f64 {
        self.periodic_rate
    }

    /// Months per period.
    pub fn frequency_months(&self) -> u32 {
        self.frequency_months
    }

    /// Number of periods.
    pub fn total_periods(&self) -> u32 {
        self.periods.len() as u32
    }

    /// All periods in order.
    pub fn periods(&self) -> &[SchedulePeriod] {
        &self.periods
    }

    /// The `k`-th period (1-based).
    pub fn period(&self, number: u32) -> Option<&SchedulePeriod> {
        number
            .checked_sub(1)
            .and_then(|index| self.periods.get(index as usize))
    }

    /// Outstanding balance after `k` periods; `k = 0` is the face value.
    pub fn balance_after(&self, k: u32) -> f64 {
        match k {
            0 => self.face_value,
            k => self
                .periods
                .get((k.min(self.total_periods()) - 1) as usize)
                .map_or(0.0, |period| period.closing_balance),
        }
    }

    /// Number of periods whose payment date is on or before `asof`.
    ///
    /// Payment dates follow [`Date::add_months`], so issues late in the month
    /// pay on clamped month ends.
    pub fn elapsed_periods(&self, asof: Date) -> u32 {
        self.periods.iter().take_while(|period| period.end <= asof).count() as u32
    }

    /// Payments as cash flows.
    pub fn cashflows(&self) -> Vec<CashFlow> {
        self.periods
            .iter()
            .map(|period| CashFlow::new(period.end, period.payment))
            .collect()
    }

    /// Payments dated strictly after `asof`.
    pub fn cashflows_after(&self, asof: Date) -> Vec<CashFlow> {
        self.periods
            .iter()
            .filter(|period| period.end > asof)
            .map(|period| CashFlow::new(period.end, period.payment))
            .collect()
    }
}
