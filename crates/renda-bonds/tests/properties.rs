//! Property tests for the yield solver and pricers.

use proptest::prelude::*;

use renda_bonds::prelude::*;
use renda_core::prelude::*;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn yield_round_trip(
        y0 in -0.5f64..2.0,
        days_out in 30i64..1825,
        amount in 100.0f64..10_000.0,
    ) {
        let calendar = BrazilCalendar::anbima();
        let asof = d(2024, 1, 2);
        let cfs = [CashFlow::new(asof.add_days(days_out), amount)];
        for convention in DayCountConvention::all() {
            let solver = YieldSolver::new(*convention, &calendar);
            let price = solver.present_value(&cfs, asof, y0);
            let ytm = solve_ytm(price, &cfs, asof, *convention, &calendar, &SolverSettings::default());
            prop_assert!(ytm.is_some());
            prop_assert!((ytm.unwrap() - y0).abs() < 1e-6, "{} y0={} ytm={:?}", convention, y0, ytm);
        }
    }

    #[test]
    fn prefixed_dirty_increases_over_business_days(
        rate in 0.001f64..0.5,
        offset in 0i32..700,
    ) {
        let calendar = BrazilCalendar::anbima();
        let issue = d(2023, 1, 2);
        let instrument = Instrument::builder()
            .kind(InstrumentKind::Cdb)
            .indexer(Indexer::Pre)
            .rate(rate)
            .issue_date(issue)
            .maturity_date(d(2026, 1, 2))
            .face_value(1000.0)
            .build()
            .unwrap();
        let engine = ValuationEngine::new(&calendar);
        let snapshot = IndexSnapshot::empty();

        let today = calendar.add_business_days(issue, offset);
        let tomorrow = calendar.add_business_days(today, 1);
        let p0 = engine.value(&instrument, today, &snapshot).unwrap();
        let p1 = engine.value(&instrument, tomorrow, &snapshot).unwrap();
        prop_assert!(p1.dirty_price() > p0.dirty_price());
        prop_assert_eq!(p0.clean_price(), p0.dirty_price());
        prop_assert_eq!(p0.accrued(), 0.0);
    }

    #[test]
    fn valuation_is_pure(
        multiplier in 0.8f64..1.5,
        offset in 1i32..60,
    ) {
        let calendar = BrazilCalendar::anbima();
        let issue = d(2024, 1, 2);
        let asof = calendar.add_business_days(issue, offset);
        let rates = calendar
            .business_day_list(issue, asof)
            .into_iter()
            .map(|day| (day, 0.04))
            .collect();
        let snapshot = IndexSnapshot::builder().daily_series(DailySeries::Cdi, rates).build();
        let instrument = Instrument::builder()
            .kind(InstrumentKind::Lca)
            .indexer(Indexer::Cdi)
            .rate(multiplier)
            .issue_date(issue)
            .face_value(1000.0)
            .build()
            .unwrap();
        let engine = ValuationEngine::new(&calendar);

        let a = engine.value(&instrument, asof, &snapshot).unwrap();
        let b = engine.value(&instrument, asof, &snapshot).unwrap();
        prop_assert_eq!(a, b);
    }
}
