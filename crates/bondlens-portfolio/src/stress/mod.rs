//! Parallel rate shock scenarios.
//!
//! Price impact uses the duration-convexity approximation on the fund's
//! weighted modified duration and convexity:
//!
//! ```text
//! ΔP/P ≈ -D_mod × Δy + 0.5 × C × (Δy)²
//! ```

use bondlens_analytics::{bps_to_decimal, scenario_price_change};
use serde::{Deserialize, Serialize};

use crate::analytics::FundSummary;

/// A parallel yield shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateShock {
    /// Display name.
    pub name: String,
    /// Shift in basis points (positive = rates up).
    pub shift_bps: f64,
}

impl RateShock {
    /// Creates a named shock.
    #[must_use]
    pub fn new(name: impl Into<String>, shift_bps: f64) -> Self {
        Self {
            name: name.into(),
            shift_bps,
        }
    }

    /// Creates a shock named after its size, e.g. `-25bp`.
    #[must_use]
    pub fn parallel(shift_bps: f64) -> Self {
        Self::new(format!("{shift_bps:+}bp"), shift_bps)
    }

    /// The ±25, ±50 and ±100 bp ladder, rallies first.
    #[must_use]
    pub fn standard() -> Vec<Self> {
        [-100.0, -50.0, -25.0, 25.0, 50.0, 100.0]
            .into_iter()
            .map(Self::parallel)
            .collect()
    }

    /// Shift as a decimal (100 bps = 0.01).
    #[must_use]
    pub fn shift_decimal(&self) -> f64 {
        bps_to_decimal(self.shift_bps)
    }
}

/// Outcome of one shock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    /// Scenario name.
    pub scenario_name: String,
    /// Shift in basis points.
    pub shift_bps: f64,
    /// Estimated fractional price change (0.0048 = +0.48%).
    pub price_change: f64,
    /// Portfolio ROI before the shock, as a fraction.
    pub roi_before: Option<f64>,
    /// `roi_before + price_change`.
    pub roi_after: Option<f64>,
}

impl StressResult {
    /// Price change in percent.
    #[must_use]
    pub fn price_change_pct(&self) -> f64 {
        self.price_change * 100.0
    }

    /// Returns true if this is a gain.
    #[must_use]
    pub fn is_gain(&self) -> bool {
        self.price_change > 0.0
    }

    /// Returns true if this is a loss.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.price_change < 0.0
    }
}

/// Applies each shock to the fund's weighted modified duration and
/// convexity.
///
/// Returns an empty vector when the summary has no duration data.
#[must_use]
pub fn run_stress(summary: &FundSummary, shocks: &[RateShock], roi: Option<f64>) -> Vec<StressResult> {
    let (Some(modified), Some(convexity)) = (summary.modified_duration, summary.convexity) else {
        return Vec::new();
    };

    shocks
        .iter()
        .map(|shock| {
            let price_change = scenario_price_change(modified, convexity, shock.shift_decimal());
            StressResult {
                scenario_name: shock.name.clone(),
                shift_bps: shock.shift_bps,
                price_change,
                roi_before: roi,
                roi_after: roi.map(|r| r + price_change),
            }
        })
        .collect()
}
