//! Scenario re-pricing from duration and convexity.

/// Estimated fractional price change for a yield move `delta_yield`.
///
/// ```text
/// ΔP/P ≈ -D_mod · Δy + ½ · C · Δy²
/// ```
///
/// `delta_yield` is a decimal (−0.0025 for −25bp). The result is a
/// fraction of price: 0.0047 means +0.47%.
#[must_use]
pub fn scenario_price_change(modified_duration: f64, convexity: f64, delta_yield: f64) -> f64 {
    -modified_duration * delta_yield + 0.5 * convexity * delta_yield * delta_yield
}

/// Converts basis points to a decimal yield change.
#[must_use]
pub fn bps_to_decimal(bps: f64) -> f64 {
    bps / 10_000.0
}
