//! Macaulay and modified duration.
//!
//! ## Formula
//!
//! ```text
//! D_mac = Σ(t · pv) / Σ(pv)
//! D_mod = D_mac / (1 + y/f)
//! ```
//!
//! where `pv = cf · (1 + y/f)^(-t·f)`.

use bondlens_core::types::{CashFlowSchedule, Frequency};

use super::{discounted_sums, priced_sums};
use crate::error::AnalyticsResult;

/// Present value of the schedule per its amounts (dirty price per unit face
/// when the schedule was built with face 1).
///
/// An empty schedule is worth zero.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidInput` if `1 + y/f` is not positive.
pub fn present_value(
    schedule: &CashFlowSchedule,
    yield_rate: f64,
    frequency: Frequency,
) -> AnalyticsResult<f64> {
    discounted_sums(schedule, yield_rate, frequency).map(|sums| sums.price)
}

/// Macaulay duration in years.
///
/// # Errors
///
/// - `AnalyticsError::InvalidInput` for an empty schedule or a yield with
///   `1 + y/f <= 0`
/// - `AnalyticsError::CalculationFailed` when the present value is zero
pub fn macaulay_duration(
    schedule: &CashFlowSchedule,
    yield_rate: f64,
    frequency: Frequency,
) -> AnalyticsResult<f64> {
    let sums = priced_sums(schedule, yield_rate, frequency)?;
    Ok(sums.time_weighted / sums.price)
}

/// Converts Macaulay duration to modified duration.
#[must_use]
pub fn modified_duration(macaulay: f64, yield_rate: f64, frequency: Frequency) -> f64 {
    macaulay / (1.0 + yield_rate / f64::from(frequency.periods_per_year()))
}
