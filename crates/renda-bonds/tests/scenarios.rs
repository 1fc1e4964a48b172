//! Valuation scenarios for every pricing path.

use approx::assert_relative_eq;

use renda_bonds::indices::MonthlyIndex;
use renda_bonds::pricing::Diagnostics;
use renda_bonds::prelude::*;
use renda_core::prelude::*;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

/// IPCA number index growing 0.4% a month from 2021-01.
fn ipca_index() -> MonthlyIndex {
    let mut level = 5_500.0;
    let mut month = ym(2021, 1);
    let mut index = MonthlyIndex::new();
    while month <= ym(2026, 12) {
        index.insert(month, level);
        level *= 1.004;
        month = month.add_months(1);
    }
    index
}

fn ipca_snapshot() -> IndexSnapshot {
    IndexSnapshot::builder().ipca_index(ipca_index()).build()
}

/// Flat IPCA index, so the index ratio is exactly one.
fn flat_ipca_snapshot() -> IndexSnapshot {
    let mut month = ym(2021, 1);
    let mut builder = IndexSnapshot::builder();
    while month <= ym(2026, 12) {
        builder = builder.ipca(month, 1_000.0);
        month = month.add_months(1);
    }
    builder.build()
}

fn prefixed(rate: f64) -> Instrument {
    Instrument::builder()
        .kind(InstrumentKind::Cdb)
        .indexer(Indexer::Pre)
        .rate(rate)
        .day_count(DayCountConvention::Bus252)
        .issue_date(d(2023, 1, 2))
        .maturity_date(d(2026, 1, 2))
        .face_value(1000.0)
        .build()
        .unwrap()
}

fn floating(indexer: Indexer, multiplier: f64, issue: Date) -> Instrument {
    Instrument::builder()
        .kind(InstrumentKind::Cdb)
        .indexer(indexer)
        .rate(multiplier)
        .issue_date(issue)
        .maturity_date(d(2027, 1, 4))
        .face_value(1000.0)
        .build()
        .unwrap()
}

fn ipca_bullet() -> Instrument {
    Instrument::builder()
        .kind(InstrumentKind::Debenture)
        .indexer(Indexer::Ipca)
        .rate(0.065)
        .issue_date(d(2023, 1, 16))
        .maturity_date(d(2028, 1, 17))
        .face_value(1000.0)
        .build()
        .unwrap()
}

fn ipca_amortizing(method: Amortization, rate: f64, face: f64, convention: DayCountConvention) -> Instrument {
    Instrument::builder()
        .kind(InstrumentKind::Cri)
        .indexer(Indexer::Ipca)
        .rate(rate)
        .day_count(convention)
        .issue_date(d(2023, 1, 16))
        .maturity_date(d(2024, 1, 16))
        .amortization(method)
        .face_value(face)
        .build()
        .unwrap()
}

fn constant_rates(calendar: &impl Calendar, start: Date, end: Date, rate: f64) -> renda_bonds::indices::DailyRates {
    calendar
        .business_day_list(start, end)
        .into_iter()
        .map(|day| (day, rate))
        .collect()
}

// =============================================================================
// Pre-fixed
// =============================================================================

#[test]
fn prefixed_on_issue_date_is_face() {
    let calendar = BrazilCalendar::anbima();
    let engine = ValuationEngine::new(&calendar);
    let result = engine
        .value(&prefixed(0.10), d(2023, 1, 2), &IndexSnapshot::empty())
        .unwrap();
    assert_relative_eq!(result.dirty_price(), 1000.0, epsilon = 1e-9);
    assert_eq!(result.accrued(), 0.0);
}

#[test]
fn prefixed_after_half_a_business_year() {
    let calendar = BrazilCalendar::anbima();
    let engine = ValuationEngine::new(&calendar);
    let asof = calendar.add_business_days(d(2023, 1, 2), 126);
    let result = engine
        .value(&prefixed(0.10), asof, &IndexSnapshot::empty())
        .unwrap();
    assert!((result.dirty_price() - 1048.81).abs() < 0.01);
    assert_eq!(result.clean_price(), result.dirty_price());
}

#[test]
fn prefixed_yield_recovers_contract_rate() {
    let calendar = BrazilCalendar::anbima();
    let engine = ValuationEngine::new(&calendar);
    let result = engine
        .value(&prefixed(0.1275), d(2024, 5, 14), &IndexSnapshot::empty())
        .unwrap();
    assert_relative_eq!(result.ytm().unwrap(), 0.1275, epsilon = 1e-8);
    assert!(result.duration().unwrap() > 0.0);
    assert!(result.convexity().unwrap() > 0.0);
}

#[test]
fn prefixed_uses_entry_point() {
    let calendar = BrazilCalendar::anbima();
    let instrument = Instrument::builder()
        .kind(InstrumentKind::Cdb)
        .indexer(Indexer::Pre)
        .rate(0.12)
        .issue_date(d(2023, 1, 2))
        .maturity_date(d(2026, 1, 2))
        .face_value(1000.0)
        .entry(1050.0, d(2023, 6, 1))
        .build()
        .unwrap();
    let result = ValuationEngine::new(&calendar)
        .value(&instrument, d(2023, 6, 1), &IndexSnapshot::empty())
        .unwrap();
    assert_relative_eq!(result.dirty_price(), 1050.0);
    match result.diagnostics() {
        Diagnostics::PreFixed { start_date, .. } => assert_eq!(*start_date, d(2023, 6, 1)),
        other => panic!("unexpected diagnostics {other:?}"),
    }
}

#[test]
fn prefixed_without_maturity_has_no_analytics() {
    let calendar = WeekendCalendar;
    let instrument = Instrument::builder()
        .kind(InstrumentKind::Lci)
        .indexer(Indexer::Pre)
        .rate(0.1)
        .issue_date(d(2024, 1, 1))
        .face_value(1000.0)
        .build()
        .unwrap();
    let result = ValuationEngine::new(&calendar)
        .value(&instrument, d(2024, 6, 3), &IndexSnapshot::empty())
        .unwrap();
    assert!(result.dirty_price() > 1000.0);
    assert_eq!(result.ytm(), None);
    assert_eq!(result.duration(), None);
    assert_eq!(result.convexity(), None);
}

#[test]
fn valuation_before_issue_is_rejected() {
    let calendar = BrazilCalendar::anbima();
    let err = ValuationEngine::new(&calendar)
        .value(&prefixed(0.1), d(2022, 12, 30), &IndexSnapshot::empty())
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Input);
}

// =============================================================================
// CDI / SELIC
// =============================================================================

#[test]
fn cdi_constant_rate_over_ten_days() {
    let calendar = WeekendCalendar;
    let issue = d(2024, 3, 4);
    let asof = calendar.add_business_days(issue, 9);
    let snapshot = IndexSnapshot::builder()
        .daily_series(DailySeries::Cdi, constant_rates(&calendar, issue, asof, 0.05))
        .build();

    let result = ValuationEngine::new(&calendar)
        .value(&floating(Indexer::Cdi, 1.0, issue), asof, &snapshot)
        .unwrap();

    let factor = 1.0005_f64.powi(10);
    assert_relative_eq!(result.dirty_price(), 1000.0 * factor, epsilon = 1e-9);
    assert_relative_eq!(result.accrued(), 1000.0 * (factor - factor / 1.0005), epsilon = 1e-9);
    assert_relative_eq!(
        result.ytm().unwrap(),
        factor.powf(252.0 / 10.0) - 1.0,
        epsilon = 1e-12
    );
    // d ln P / dm = Σ r / (1 + r m)
    assert_relative_eq!(result.duration().unwrap(), 10.0 * 0.0005 / 1.0005, epsilon = 1e-6);
}

#[test]
fn cdi_percentage_multiplier() {
    let calendar = WeekendCalendar;
    let issue = d(2024, 3, 4);
    let asof = d(2024, 3, 8);
    let snapshot = IndexSnapshot::builder()
        .daily_series(DailySeries::Cdi, constant_rates(&calendar, issue, asof, 0.04))
        .build();
    let engine = ValuationEngine::new(&calendar);
    let pct = engine.value(&floating(Indexer::Cdi, 120.0, issue), asof, &snapshot).unwrap();
    let dec = engine.value(&floating(Indexer::Cdi, 1.2, issue), asof, &snapshot).unwrap();
    assert_eq!(pct.dirty_price(), dec.dirty_price());
}

#[test]
fn selic_skips_unpublished_days() {
    let calendar = WeekendCalendar;
    let issue = d(2024, 3, 4);
    let asof = d(2024, 3, 15);
    let mut rates = constant_rates(&calendar, issue, asof, 0.045);
    rates.remove(&d(2024, 3, 7));
    rates.remove(&d(2024, 3, 12));
    let snapshot = IndexSnapshot::builder()
        .daily_series(DailySeries::Selic, rates)
        .build();

    let result = ValuationEngine::new(&calendar)
        .value(&floating(Indexer::Selic, 1.0, issue), asof, &snapshot)
        .unwrap();

    assert_relative_eq!(result.dirty_price(), 1000.0 * 1.00045_f64.powi(8), epsilon = 1e-9);
    match result.diagnostics() {
        Diagnostics::Floating {
            business_days,
            applied_days,
            skipped_days,
            series,
            ..
        } => {
            assert_eq!(*series, DailySeries::Selic);
            assert_eq!(*business_days, 10);
            assert_eq!(*applied_days, 8);
            assert_eq!(*skipped_days, 2);
        }
        other => panic!("unexpected diagnostics {other:?}"),
    }
}

#[test]
fn cdi_without_any_rate_fails() {
    let calendar = WeekendCalendar;
    let issue = d(2024, 3, 4);
    let err = ValuationEngine::new(&calendar)
        .value(&floating(Indexer::Cdi, 1.0, issue), d(2024, 3, 8), &IndexSnapshot::empty())
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::DataUnavailable);
}

#[test]
fn cdi_issued_on_weekend_valued_same_day() {
    let calendar = WeekendCalendar;
    let issue = d(2024, 3, 2);
    let result = ValuationEngine::new(&calendar)
        .value(&floating(Indexer::Cdi, 1.0, issue), issue, &IndexSnapshot::empty())
        .unwrap();
    assert_eq!(result.dirty_price(), 1000.0);
    assert_eq!(result.accrued(), 0.0);
    assert_eq!(result.ytm(), None);
}

// =============================================================================
// IPCA bullet
// =============================================================================

#[test]
fn ipca_bullet_price_and_real_yield() {
    let calendar = BrazilCalendar::anbima();
    let instrument = ipca_bullet();
    let snapshot = ipca_snapshot();
    let asof = d(2024, 3, 15);

    let result = ValuationEngine::new(&calendar)
        .value(&instrument, asof, &snapshot)
        .unwrap();

    let index = snapshot.ipca();
    let issue = instrument.issue_date();
    let ratio = prorata_ipca(index, asof, 2).unwrap() / prorata_ipca(index, issue, 2).unwrap();
    let t = DayCountConvention::Bus252.year_fraction(issue, asof, &calendar);
    let dirty = 1000.0 * ratio * 1.065_f64.powf(t);
    assert_relative_eq!(result.dirty_price(), dirty, epsilon = 1e-9);

    let prev = d(2024, 3, 14);
    let ratio_prev = prorata_ipca(index, prev, 2).unwrap() / prorata_ipca(index, issue, 2).unwrap();
    let t_prev = DayCountConvention::Bus252.year_fraction(issue, prev, &calendar);
    let dirty_prev = 1000.0 * ratio_prev * 1.065_f64.powf(t_prev);
    assert_relative_eq!(result.accrued(), dirty - dirty_prev, epsilon = 1e-9);

    // BUS/252 is additive, so the real yield is the contract rate
    assert_relative_eq!(result.ytm().unwrap(), 0.065, epsilon = 1e-8);
}

#[test]
fn ipca_bullet_accrued_spans_weekend() {
    let calendar = BrazilCalendar::anbima();
    let result = ValuationEngine::new(&calendar)
        .value(&ipca_bullet(), d(2024, 3, 18), &ipca_snapshot())
        .unwrap();
    match result.diagnostics() {
        Diagnostics::InflationBullet { previous_date, .. } => {
            assert_eq!(*previous_date, d(2024, 3, 15));
        }
        other => panic!("unexpected diagnostics {other:?}"),
    }
    assert!(result.accrued() > 0.0);
}

#[test]
fn ipca_bullet_on_issue_has_no_accrued() {
    let calendar = BrazilCalendar::anbima();
    let result = ValuationEngine::new(&calendar)
        .value(&ipca_bullet(), d(2023, 1, 16), &ipca_snapshot())
        .unwrap();
    assert_relative_eq!(result.dirty_price(), 1000.0, epsilon = 1e-9);
    assert_eq!(result.accrued(), 0.0);
}

#[test]
fn ipca_missing_months_fall_back() {
    let calendar = BrazilCalendar::anbima();
    let mut index = ipca_index();
    for month in [ym(2024, 1), ym(2024, 2), ym(2024, 3)] {
        index.remove(&month);
    }
    let snapshot = IndexSnapshot::builder().ipca_index(index).build();
    let result = ValuationEngine::new(&calendar)
        .value(&ipca_bullet(), d(2024, 5, 10), &snapshot)
        .unwrap();
    assert!(result.dirty_price() > 1000.0);
}

#[test]
fn ipca_unresolvable_fails_cleanly() {
    let calendar = BrazilCalendar::anbima();
    let err = ValuationEngine::new(&calendar)
        .value(&ipca_bullet(), d(2024, 5, 10), &IndexSnapshot::empty())
        .unwrap_err();
    assert!(matches!(err, BondError::DataUnavailable { .. }));
}

// =============================================================================
// IPCA amortizing
// =============================================================================

#[test]
fn sac_zero_rate_halfway() {
    let calendar = BrazilCalendar::anbima();
    let instrument = ipca_amortizing(Amortization::Sac, 0.0, 1200.0, DayCountConvention::Bus252);
    let result = ValuationEngine::new(&calendar)
        .value(&instrument, d(2023, 7, 16), &flat_ipca_snapshot())
        .unwrap();

    match result.diagnostics() {
        Diagnostics::InflationAmortizing {
            total_periods,
            elapsed_periods,
            balance_real,
            index_ratio,
            ..
        } => {
            assert_eq!(*total_periods, 12);
            assert_eq!(*elapsed_periods, 6);
            assert_relative_eq!(*balance_real, 600.0, epsilon = 1e-9);
            assert_eq!(*index_ratio, 1.0);
        }
        other => panic!("unexpected diagnostics {other:?}"),
    }
    assert_relative_eq!(result.clean_price(), 600.0, epsilon = 1e-9);
    assert_eq!(result.accrued(), 0.0);
}

#[test]
fn price_schedule_values_balance_times_ratio() {
    let calendar = BrazilCalendar::anbima();
    let instrument = ipca_amortizing(Amortization::Price, 0.07, 1000.0, DayCountConvention::Bus252);
    let snapshot = ipca_snapshot();
    let asof = d(2023, 4, 20);
    let result = ValuationEngine::new(&calendar)
        .value(&instrument, asof, &snapshot)
        .unwrap();

    let schedule = AmortizationSchedule::build(
        Amortization::Price,
        1000.0,
        0.07,
        d(2023, 1, 16),
        d(2024, 1, 16),
        1,
    )
    .unwrap();
    let ratio = ipca_ratio(snapshot.ipca(), d(2023, 1, 16), asof, 2).unwrap();
    assert_relative_eq!(result.clean_price(), schedule.balance_after(3) * ratio, epsilon = 1e-9);

    let period = schedule.period(4).unwrap();
    let frac = calendar.count_business_days(period.start, asof) as f64
        / calendar.count_business_days(period.start, period.end) as f64;
    assert_relative_eq!(result.accrued(), period.interest * ratio * frac, epsilon = 1e-9);

    let ytm = result.ytm().unwrap();
    assert!((ytm - 0.07).abs() < 0.01, "ytm {ytm}");
}

#[test]
fn amortizing_fraction_depends_on_convention() {
    // BUS/252 counts business days; other conventions use a flat 30-day month
    let calendar = BrazilCalendar::anbima();
    let asof = d(2023, 3, 1);
    let bus = ipca_amortizing(Amortization::Sac, 0.06, 1200.0, DayCountConvention::Bus252);
    let act = ipca_amortizing(Amortization::Sac, 0.06, 1200.0, DayCountConvention::Act365);
    let engine = ValuationEngine::new(&calendar);
    let snapshot = flat_ipca_snapshot();

    let fraction = |instrument: &Instrument| match engine.value(instrument, asof, &snapshot).unwrap().diagnostics() {
        Diagnostics::InflationAmortizing { period_fraction, .. } => *period_fraction,
        other => panic!("unexpected diagnostics {other:?}"),
    };

    // current period 2023-02-16 .. 2023-03-16
    let expected_bus = calendar.count_business_days(d(2023, 2, 16), asof) as f64
        / calendar.count_business_days(d(2023, 2, 16), d(2023, 3, 16)) as f64;
    assert_relative_eq!(fraction(&bus), expected_bus);
    assert_relative_eq!(fraction(&act), 13.0 / 30.0);
}

#[test]
fn amortizing_payment_on_clamped_month_end() {
    // issued on Jan 31, the first payment falls on Feb 29
    let calendar = BrazilCalendar::anbima();
    let instrument = Instrument::builder()
        .kind(InstrumentKind::Cri)
        .indexer(Indexer::Ipca)
        .rate(0.0)
        .day_count(DayCountConvention::Act365)
        .issue_date(d(2024, 1, 31))
        .maturity_date(d(2025, 1, 31))
        .amortization(Amortization::Sac)
        .face_value(1200.0)
        .build()
        .unwrap();
    let engine = ValuationEngine::new(&calendar);
    let snapshot = flat_ipca_snapshot();

    for asof in [d(2024, 2, 29), d(2024, 3, 1)] {
        let result = engine.value(&instrument, asof, &snapshot).unwrap();
        match result.diagnostics() {
            Diagnostics::InflationAmortizing {
                elapsed_periods,
                balance_real,
                remaining_cashflows,
                ..
            } => {
                assert_eq!(*elapsed_periods, 1, "on {asof}");
                assert_relative_eq!(*balance_real, 1100.0, epsilon = 1e-9);
                assert_eq!(*remaining_cashflows, 11);
            }
            other => panic!("unexpected diagnostics {other:?}"),
        }
        assert_relative_eq!(result.clean_price(), 1100.0, epsilon = 1e-9);
        assert_eq!(result.accrued(), 0.0);
        let ytm = result.ytm().unwrap();
        assert!(ytm.abs() < 1e-8, "ytm {ytm} on {asof}");
    }
}

#[test]
fn amortizing_after_final_payment() {
    let calendar = BrazilCalendar::anbima();
    let instrument = ipca_amortizing(Amortization::Sac, 0.06, 1200.0, DayCountConvention::Bus252);
    let result = ValuationEngine::new(&calendar)
        .value(&instrument, d(2024, 2, 1), &ipca_snapshot())
        .unwrap();
    assert_relative_eq!(result.clean_price(), 0.0, epsilon = 1e-9);
    assert_eq!(result.accrued(), 0.0);
    assert_eq!(result.ytm(), None);
}

// =============================================================================
// Engine-wide properties
// =============================================================================

#[test]
fn dirty_is_clean_plus_accrued_everywhere() {
    let calendar = BrazilCalendar::anbima();
    let engine = ValuationEngine::new(&calendar);
    let issue = d(2023, 1, 16);
    let cdi = IndexSnapshot::builder()
        .daily_series(DailySeries::Cdi, constant_rates(&calendar, issue, d(2024, 12, 31), 0.0498))
        .build();

    let cases = [
        (prefixed(0.1), IndexSnapshot::empty()),
        (floating(Indexer::Cdi, 1.1, issue), cdi),
        (ipca_bullet(), ipca_snapshot()),
        (
            ipca_amortizing(Amortization::Price, 0.05, 1000.0, DayCountConvention::Bus252),
            ipca_snapshot(),
        ),
        (
            ipca_amortizing(Amortization::Sac, 0.05, 1000.0, DayCountConvention::Act252),
            ipca_snapshot(),
        ),
    ];

    for (instrument, snapshot) in &cases {
        for asof in calendar.business_day_list(d(2023, 1, 16), d(2023, 12, 29)).into_iter().step_by(17) {
            let result = engine.value(instrument, asof, snapshot).unwrap();
            assert!(
                (result.dirty_price() - (result.clean_price() + result.accrued())).abs() < 1e-9,
                "{instrument:?} on {asof}"
            );
        }
    }
}

#[test]
fn repeated_valuation_is_bit_identical() {
    let calendar = BrazilCalendar::anbima();
    let engine = ValuationEngine::new(&calendar);
    let snapshot = ipca_snapshot();
    let first = engine.value(&ipca_bullet(), d(2024, 8, 7), &snapshot).unwrap();
    let second = engine.value(&ipca_bullet(), d(2024, 8, 7), &snapshot).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.dirty_price().to_bits(), second.dirty_price().to_bits());
}

#[test]
fn batch_keeps_per_item_errors() {
    let calendar = BrazilCalendar::anbima();
    let engine = ValuationEngine::new(&calendar);
    let repository = InMemoryIndexerRepository::from_snapshot(&ipca_snapshot());
    let requests = vec![
        ValuationRequest {
            instrument: prefixed(0.1),
            date: d(2023, 6, 1),
        },
        ValuationRequest {
            instrument: prefixed(0.1),
            date: d(2022, 6, 1),
        },
        ValuationRequest {
            instrument: ipca_bullet(),
            date: d(2024, 6, 3),
        },
    ];
    let results = value_batch(&engine, &repository, &requests);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}

#[test]
fn series_covers_business_days() {
    let calendar = BrazilCalendar::anbima();
    let engine = ValuationEngine::new(&calendar);
    let repository = InMemoryIndexerRepository::new();
    let points = value_series(&engine, &repository, &prefixed(0.1), d(2023, 2, 1), d(2023, 2, 28)).unwrap();
    // Carnival Monday and Tuesday (Feb 20-21) are excluded
    assert_eq!(points.len(), 18);
    let prices: Vec<f64> = points
        .iter()
        .map(|point| point.result.as_ref().unwrap().dirty_price())
        .collect();
    assert!(prices.windows(2).all(|w| w[1] > w[0]));
}
