//! Property tests for schedule generation and sensitivity measures.

use approx::assert_relative_eq;
use bondlens_analytics::{
    build_schedule, convexity, macaulay_duration, modified_duration, BondTerms,
};
use bondlens_core::types::{Date, Frequency};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn frequency_strategy() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![1u32, 2, 3, 4, 6, 12])
}

/// (issue, maturity, settlement) with issue < maturity and settlement < maturity.
fn dates_strategy() -> impl Strategy<Value = (Date, Date, Date)> {
    (2000i32..2030, 1u32..=12, 1u32..=31, 1i32..=30, 0.0f64..0.999).prop_map(
        |(year, month, day, tenor_years, settled_fraction)| {
            let day = day.min(28);
            let issue = Date::from_ymd(year, month, day).unwrap();
            let maturity = issue.add_months(tenor_years * 12).unwrap();
            let span = issue.days_between(&maturity);
            let settlement = issue.add_days((span as f64 * settled_fraction) as i64);
            (issue, maturity, settlement)
        },
    )
}

fn terms(issue: Date, maturity: Date, coupon_bps: u32, freq: u32) -> BondTerms {
    BondTerms::builder()
        .issue_date(issue)
        .maturity_date(maturity)
        .coupon_rate(Decimal::new(i64::from(coupon_bps), 4))
        .frequency(Frequency::new(freq).unwrap())
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn schedule_ends_on_maturity_with_principal(
        (issue, maturity, settlement) in dates_strategy(),
        coupon_bps in 0u32..1500,
        freq in frequency_strategy(),
    ) {
        let bond = terms(issue, maturity, coupon_bps, freq);
        let schedule = build_schedule(settlement, &bond).unwrap();

        prop_assert!(!schedule.is_empty());
        let last = schedule.last().unwrap();
        prop_assert_eq!(last.date(), maturity);
        prop_assert!((last.amount() - (1.0 + bond.coupon_payment())).abs() < 1e-12);
    }

    #[test]
    fn times_increase_by_one_period(
        (issue, maturity, settlement) in dates_strategy(),
        freq in frequency_strategy(),
    ) {
        let bond = terms(issue, maturity, 500, freq);
        let schedule = build_schedule(settlement, &bond).unwrap();
        let times = schedule.times();

        prop_assert!(times[0] > 0.0);
        prop_assert!(times[0] <= 1.0 / f64::from(freq) + 1e-12);
        for pair in times.windows(2) {
            prop_assert!((pair[1] - pair[0] - 1.0 / f64::from(freq)).abs() < 1e-9);
        }
        let dates: Vec<Date> = schedule.iter().map(|cf| cf.date()).collect();
        for pair in dates.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        prop_assert!(dates[0] > settlement);
    }

    #[test]
    fn duration_bounded_by_maturity(
        (issue, maturity, settlement) in dates_strategy(),
        coupon_bps in 0u32..1500,
        yield_bps in 1u32..2000,
        freq in frequency_strategy(),
    ) {
        let bond = terms(issue, maturity, coupon_bps, freq);
        let schedule = build_schedule(settlement, &bond).unwrap();
        let y = f64::from(yield_bps) / 10_000.0;
        let frequency = bond.frequency();

        let mac = macaulay_duration(&schedule, y, frequency).unwrap();
        prop_assert!(mac > 0.0);
        prop_assert!(mac <= schedule.time_to_maturity() + 1e-9);

        let md = modified_duration(mac, y, frequency);
        prop_assert!(md < mac);

        let c = convexity(&schedule, y, frequency).unwrap();
        prop_assert!(c > 0.0);
    }
}

#[test]
fn reference_scenario() {
    let issue = Date::from_ymd(2020, 1, 1).unwrap();
    let maturity = Date::from_ymd(2025, 1, 1).unwrap();
    let bond = terms(issue, maturity, 600, 2);
    let settlement = Date::from_ymd(2023, 1, 1).unwrap();

    let schedule = build_schedule(settlement, &bond).unwrap();
    assert_eq!(schedule.len(), 4);
    assert_eq!(
        schedule.as_slice()[0].date(),
        Date::from_ymd(2023, 7, 1).unwrap()
    );

    let mac = macaulay_duration(&schedule, 0.05, Frequency::SEMI_ANNUAL).unwrap();
    assert!(mac < 2.0);
    assert_relative_eq!(mac, 1.915209, epsilon = 1e-6);
}

#[test]
fn zero_coupon_duration_is_time_to_maturity() {
    let issue = Date::from_ymd(2021, 3, 15).unwrap();
    let maturity = Date::from_ymd(2031, 3, 15).unwrap();
    let bond = terms(issue, maturity, 0, 1);
    let schedule = build_schedule(Date::from_ymd(2024, 9, 15).unwrap(), &bond).unwrap();

    let mac = macaulay_duration(&schedule, 0.04, Frequency::ANNUAL).unwrap();
    assert_relative_eq!(mac, schedule.time_to_maturity(), epsilon = 1e-9);
}
