//! One-call risk metrics for a single bond.

use serde::{Deserialize, Serialize};

use bondlens_core::types::{CashFlowSchedule, Date, Frequency};

use super::{priced_sums, scenario_price_change};
use crate::bond::BondTerms;
use crate::cashflows::ScheduleMethod;
use crate::error::AnalyticsResult;

/// Price and yield sensitivities of one bond at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondRiskMetrics {
    /// Present value of remaining cash flows (dirty price per unit of the
    /// schedule's face).
    pub price: f64,
    /// Macaulay duration (years)
    pub macaulay_duration: f64,
    /// Modified duration
    pub modified_duration: f64,
    /// Convexity (years²)
    pub convexity: f64,
    /// Time to the final payment (years)
    pub time_to_maturity: f64,
    /// Number of remaining payments
    pub cash_flow_count: usize,
}

impl BondRiskMetrics {
    /// Estimated fractional price change for a yield move.
    #[must_use]
    pub fn price_change(&self, delta_yield: f64) -> f64 {
        scenario_price_change(self.modified_duration, self.convexity, delta_yield)
    }
}

/// Computes all metrics from an existing schedule with a single discounting
/// pass.
///
/// # Errors
///
/// Fails like [`macaulay_duration`](super::macaulay_duration).
pub fn analyze_schedule(
    schedule: &CashFlowSchedule,
    yield_rate: f64,
    frequency: Frequency,
) -> AnalyticsResult<BondRiskMetrics> {
    let sums = priced_sums(schedule, yield_rate, frequency)?;
    let macaulay = sums.time_weighted / sums.price;
    Ok(BondRiskMetrics {
        price: sums.price,
        macaulay_duration: macaulay,
        modified_duration: super::modified_duration(macaulay, yield_rate, frequency),
        convexity: sums.convexity_weighted / sums.price,
        time_to_maturity: schedule.time_to_maturity(),
        cash_flow_count: schedule.len(),
    })
}

/// Builds the coupon-date schedule and computes all metrics, compounding at
/// the bond's own payment frequency.
///
/// # Errors
///
/// - `AnalyticsError::InvalidSchedule` if settlement is after maturity
/// - the failures of [`analyze_schedule`]
pub fn analyze_bond(
    settlement: Date,
    terms: &BondTerms,
    yield_rate: f64,
) -> AnalyticsResult<BondRiskMetrics> {
    analyze_bond_with(settlement, terms, yield_rate, ScheduleMethod::CouponDates)
}

/// [`analyze_bond`] with an explicit schedule method.
///
/// # Errors
///
/// See [`analyze_bond`].
pub fn analyze_bond_with(
    settlement: Date,
    terms: &BondTerms,
    yield_rate: f64,
    method: ScheduleMethod,
) -> AnalyticsResult<BondRiskMetrics> {
    let schedule = method.build(settlement, terms)?;
    analyze_schedule(&schedule, yield_rate, terms.frequency())
}
