//! Whole-period schedule approximation.
//!
//! Counts the remaining tenor in calendar terms (whole months plus leftover
//! days over 365), rounds it to whole coupon periods and places payment `k`
//! at exactly `k / f` years. The partial first period is ignored, which
//! makes this a quick estimate rather than a settlement-exact schedule.

use bondlens_core::types::{CashFlow, CashFlowSchedule, Date};

use super::schedule::{coupon_date, ensure_not_matured, valuation_start};
use crate::bond::BondTerms;
use crate::error::AnalyticsResult;

/// Remaining tenor in years: whole months / 12 + leftover days / 365.
///
/// # Errors
///
/// Returns an error if month arithmetic leaves the supported date range.
pub fn calendar_tenor_years(settlement: Date, maturity: Date) -> AnalyticsResult<f64> {
    let months = settlement.months_until(&maturity)?;
    let anchor = settlement.add_months(months)?;
    let days = anchor.days_between(&maturity).max(0);
    Ok(f64::from(months) / 12.0 + days as f64 / 365.0)
}

/// Builds a schedule of `round(tenor * f)` evenly spaced payments.
///
/// At least one payment is produced while settlement is before maturity;
/// dates are maturity-anchored like [`build_schedule`](super::build_schedule).
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidSchedule` if settlement is after maturity.
pub fn whole_period_schedule(
    settlement: Date,
    terms: &BondTerms,
) -> AnalyticsResult<CashFlowSchedule> {
    let settlement = valuation_start(settlement, terms);
    let maturity = terms.maturity_date();
    ensure_not_matured(settlement, maturity)?;

    let frequency = terms.frequency();
    let mut schedule = CashFlowSchedule::new(settlement, frequency);
    if settlement == maturity {
        return Ok(schedule);
    }

    let tenor = calendar_tenor_years(settlement, maturity)?;
    let periods = ((tenor * f64::from(frequency.periods_per_year())).round() as u32).max(1);

    let coupon = terms.coupon_payment();
    let face = terms.face_value_f64();
    for n in 1..=periods {
        let date = coupon_date(maturity, frequency, periods - n)?;
        let time_years = f64::from(n) * frequency.period_years();
        if n == periods {
            schedule.push(CashFlow::final_payment(date, time_years, coupon, face));
        } else {
            schedule.push(CashFlow::coupon(date, time_years, coupon));
        }
    }
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondlens_core::types::Frequency;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn bond(maturity: Date) -> BondTerms {
        BondTerms::builder()
            .issue_date(d(2020, 1, 1))
            .maturity_date(maturity)
            .coupon_rate(dec!(0.05))
            .frequency(Frequency::SEMI_ANNUAL)
            .build()
            .unwrap()
    }

    #[test]
    fn test_calendar_tenor() {
        assert_relative_eq!(
            calendar_tenor_years(d(2025, 1, 1), d(2027, 7, 1)).unwrap(),
            2.5
        );
        assert_relative_eq!(
            calendar_tenor_years(d(2025, 1, 1), d(2025, 2, 6)).unwrap(),
            1.0 / 12.0 + 5.0 / 365.0
        );
    }

    #[test]
    fn test_rounds_to_whole_periods() {
        // 2 years 4 months -> 4.67 periods -> 5
        let schedule = whole_period_schedule(d(2025, 1, 1), &bond(d(2027, 5, 1))).unwrap();
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule.times(), vec![0.5, 1.0, 1.5, 2.0, 2.5]);
        assert_eq!(schedule.last().unwrap().date(), d(2027, 5, 1));
        assert_eq!(schedule.as_slice()[0].date(), d(2025, 5, 1));
    }

    #[test]
    fn test_short_tenor_keeps_one_payment() {
        let schedule = whole_period_schedule(d(2025, 1, 1), &bond(d(2025, 2, 1))).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_relative_eq!(schedule.as_slice()[0].amount(), 1.025, epsilon = 1e-12);
    }

    #[test]
    fn test_tenor_counted_from_issue_when_settled_early() {
        let schedule = whole_period_schedule(d(2019, 1, 1), &bond(d(2021, 1, 1))).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.as_slice()[0].date(), d(2020, 7, 1));
    }

    #[test]
    fn test_matured_bond_rejected() {
        assert!(whole_period_schedule(d(2026, 1, 1), &bond(d(2025, 2, 1))).is_err());
    }
}
