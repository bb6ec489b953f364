//! Maturity-anchored coupon schedule generation.
//!
//! Coupon dates are `maturity - k * (12 / frequency)` months for
//! `k = 0, 1, 2, ...`, each computed from the maturity date directly so that
//! month-end clamping never drifts. The first remaining period is measured
//! in actual days; every later payment sits exactly one period further out.
//!
//! ```text
//! t_0 = (period_days - elapsed_days) / period_days / f
//! t_i = t_0 + i / f
//! ```
//!
//! A settlement before the issue date is moved forward to the issue date,
//! so no coupon predates the bond.

use bondlens_core::types::{CashFlow, CashFlowSchedule, Date, Frequency};

use crate::bond::BondTerms;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Coupon date `k` periods before maturity.
pub(crate) fn coupon_date(maturity: Date, frequency: Frequency, k: u32) -> AnalyticsResult<Date> {
    let months = k as i32 * frequency.months_per_period() as i32;
    Ok(maturity.add_months(-months)?)
}

/// Date the schedule is measured from: settlement, or issue if later.
pub(crate) fn valuation_start(settlement: Date, terms: &BondTerms) -> Date {
    settlement.max(terms.issue_date())
}

pub(crate) fn ensure_not_matured(settlement: Date, maturity: Date) -> AnalyticsResult<()> {
    if settlement > maturity {
        return Err(AnalyticsError::InvalidSchedule {
            settlement: settlement.to_string(),
            maturity: maturity.to_string(),
        });
    }
    Ok(())
}

/// Returns `(k, date)` for the latest coupon date on or before settlement;
/// `k` is also the number of payments still to come.
fn locate_previous(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
) -> AnalyticsResult<(u32, Date)> {
    ensure_not_matured(settlement, maturity)?;

    let mut k = 0;
    let mut current = maturity;
    while current > settlement {
        k += 1;
        current = coupon_date(maturity, frequency, k)?;
    }
    Ok((k, current))
}

/// Latest coupon date on or before `settlement`.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidSchedule` if settlement is after maturity.
pub fn previous_coupon_date(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
) -> AnalyticsResult<Date> {
    locate_previous(settlement, maturity, frequency).map(|(_, date)| date)
}

/// First coupon date strictly after `settlement`.
///
/// When settlement falls on maturity this is one period past maturity.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidSchedule` if settlement is after maturity.
pub fn next_coupon_date(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
) -> AnalyticsResult<Date> {
    let previous = previous_coupon_date(settlement, maturity, frequency)?;
    Ok(previous.add_months(frequency.months_per_period() as i32)?)
}

/// Builds the future cash flows of a bond as seen from `settlement`.
///
/// Each entry pays `coupon_rate * face_value / frequency`; the entry dated on
/// maturity also repays `face_value`. A settlement on the maturity date
/// leaves nothing to pay and yields an empty schedule. When settlement
/// precedes the issue date, times are measured from the issue date.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidSchedule` if settlement is after maturity.
///
/// # Example
///
/// ```rust
/// use bondlens_analytics::{build_schedule, BondTerms};
/// use bondlens_core::types::{Date, Frequency};
/// use rust_decimal_macros::dec;
///
/// let terms = BondTerms::builder()
///     .issue_date(Date::from_ymd(2020, 1, 1).unwrap())
///     .maturity_date(Date::from_ymd(2025, 1, 1).unwrap())
///     .coupon_rate(dec!(0.06))
///     .frequency(Frequency::SEMI_ANNUAL)
///     .build()
///     .unwrap();
///
/// let schedule = build_schedule(Date::from_ymd(2023, 1, 1).unwrap(), &terms).unwrap();
/// assert_eq!(schedule.len(), 4);
/// assert_eq!(schedule.times(), vec![0.5, 1.0, 1.5, 2.0]);
/// ```
pub fn build_schedule(settlement: Date, terms: &BondTerms) -> AnalyticsResult<CashFlowSchedule> {
    let settlement = valuation_start(settlement, terms);
    let maturity = terms.maturity_date();
    let frequency = terms.frequency();
    let (remaining, previous) = locate_previous(settlement, maturity, frequency)?;

    let mut schedule = CashFlowSchedule::with_capacity(settlement, frequency, remaining as usize);
    if remaining == 0 {
        return Ok(schedule);
    }

    let next = coupon_date(maturity, frequency, remaining - 1)?;
    let period_days = previous.days_between(&next) as f64;
    let elapsed_days = previous.days_between(&settlement) as f64;
    let first_time =
        (period_days - elapsed_days) / period_days / f64::from(frequency.periods_per_year());

    let coupon = terms.coupon_payment();
    let face = terms.face_value_f64();

    for i in 0..remaining {
        let k = remaining - 1 - i;
        let date = coupon_date(maturity, frequency, k)?;
        let time_years = first_time + f64::from(i) * frequency.period_years();
        if k == 0 {
            schedule.push(CashFlow::final_payment(date, time_years, coupon, face));
        } else {
            schedule.push(CashFlow::coupon(date, time_years, coupon));
        }
    }

    Ok(schedule)
}
