//! Convexity on the duration discounting.
//!
//! ## Formula
//!
//! ```text
//! C = Σ(pv · t · (t + 1/f)) / Σ(pv)
//! ```
//!
//! Expressed in years²; no further `(1 + y/f)²` scaling is applied, so the
//! figure pairs with [`modified_duration`](super::modified_duration) in
//! [`scenario_price_change`](super::scenario_price_change) as reported.

use bondlens_core::types::{CashFlowSchedule, Frequency};

use super::priced_sums;
use crate::error::AnalyticsResult;

/// Convexity of a schedule at `yield_rate`.
///
/// # Errors
///
/// Same failure policy as [`macaulay_duration`](super::macaulay_duration).
pub fn convexity(
    schedule: &CashFlowSchedule,
    yield_rate: f64,
    frequency: Frequency,
) -> AnalyticsResult<f64> {
    let sums = priced_sums(schedule, yield_rate, frequency)?;
    Ok(sums.convexity_weighted / sums.price)
}
