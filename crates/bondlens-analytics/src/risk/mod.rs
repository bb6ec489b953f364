//! Yield sensitivity measures.
//!
//! - **Duration**: Macaulay and modified
//! - **Convexity**: second-order sensitivity on the same discounting
//! - **Scenario**: duration/convexity price-change estimate
//! - **Calculator**: all of the above for one bond in one call
//!
//! Every measure discounts with periodic compounding at the quoted yield:
//!
//! ```text
//! df(t) = (1 + y/f)^(-t·f)
//! ```

pub mod calculator;
pub mod convexity;
pub mod duration;
pub mod scenario;

pub use calculator::{analyze_bond, analyze_bond_with, analyze_schedule, BondRiskMetrics};
pub use convexity::convexity;
pub use duration::{macaulay_duration, modified_duration, present_value};
pub use scenario::{bps_to_decimal, scenario_price_change};

use bondlens_core::types::{CashFlowSchedule, Frequency};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Present values below this are treated as zero.
const ZERO_PRICE_TOLERANCE: f64 = 1e-12;

/// Sums over the discounted cash flows of one schedule.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DiscountedSums {
    /// Σ pv
    pub price: f64,
    /// Σ t·pv
    pub time_weighted: f64,
    /// Σ t·(t + 1/f)·pv
    pub convexity_weighted: f64,
}

/// Discounts every cash flow of `schedule` at `yield_rate`.
pub(crate) fn discounted_sums(
    schedule: &CashFlowSchedule,
    yield_rate: f64,
    frequency: Frequency,
) -> AnalyticsResult<DiscountedSums> {
    let freq = f64::from(frequency.periods_per_year());
    let base = 1.0 + yield_rate / freq;
    if !yield_rate.is_finite() || base <= 0.0 {
        return Err(AnalyticsError::invalid_input(format!(
            "yield {yield_rate} gives a non-positive discount base"
        )));
    }

    let mut sums = DiscountedSums::default();
    for cf in schedule {
        let t = cf.time_years();
        let pv = cf.amount() * base.powf(-t * freq);
        sums.price += pv;
        sums.time_weighted += t * pv;
        sums.convexity_weighted += t * (t + 1.0 / freq) * pv;
    }
    Ok(sums)
}

/// Like [`discounted_sums`] but rejects empty schedules and zero prices.
pub(crate) fn priced_sums(
    schedule: &CashFlowSchedule,
    yield_rate: f64,
    frequency: Frequency,
) -> AnalyticsResult<DiscountedSums> {
    if schedule.is_empty() {
        return Err(AnalyticsError::invalid_input(
            "schedule has no remaining cash flows",
        ));
    }
    let sums = discounted_sums(schedule, yield_rate, frequency)?;
    if sums.price.abs() < ZERO_PRICE_TOLERANCE {
        return Err(AnalyticsError::CalculationFailed(
            "present value of cash flows is zero".to_string(),
        ));
    }
    Ok(sums)
}
