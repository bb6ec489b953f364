//! Weighted averages with an explicit "undefined" result.

/// `Σ(v·w) / Σw`.
///
/// Returns `None` when the slices differ in length, are empty, or the
/// weights sum to zero. Never divides by zero.
///
/// # Example
///
/// ```rust
/// use bondlens_portfolio::weighted_average;
///
/// assert_eq!(weighted_average(&[2.0, 4.0], &[1.0, 1.0]), Some(3.0));
/// assert_eq!(weighted_average(&[2.0, 4.0, 6.0], &[0.0, 0.0, 0.0]), None);
/// ```
#[must_use]
pub fn weighted_average(values: &[f64], weights: &[f64]) -> Option<f64> {
    if values.len() != weights.len() {
        return None;
    }
    values
        .iter()
        .zip(weights)
        .fold(WeightedSum::new(), |mut acc, (&v, &w)| {
            acc.add(v, w);
            acc
        })
        .value()
}

/// Running numerator and denominator of a weighted average.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedSum {
    weighted: f64,
    weight: f64,
}

impl WeightedSum {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    pub fn add(&mut self, value: f64, weight: f64) {
        self.weighted += value * weight;
        self.weight += weight;
    }

    /// Total weight seen so far.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weight
    }

    /// The weighted average, or `None` if the total weight is zero.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        if self.weight == 0.0 || !self.weight.is_finite() {
            None
        } else {
            Some(self.weighted / self.weight)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_weighted_average() {
        let avg = weighted_average(&[0.05, 0.07], &[3_000_000.0, 1_000_000.0]).unwrap();
        assert_relative_eq!(avg, 0.055, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_weights_undefined() {
        assert_eq!(weighted_average(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn test_empty_and_mismatched() {
        assert_eq!(weighted_average(&[], &[]), None);
        assert_eq!(weighted_average(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn test_accumulator() {
        let mut sum = WeightedSum::new();
        assert_eq!(sum.value(), None);
        sum.add(4.0, 2.0);
        sum.add(1.0, 1.0);
        assert_relative_eq!(sum.total_weight(), 3.0);
        assert_relative_eq!(sum.value().unwrap(), 3.0);
    }

    proptest! {
        #[test]
        fn equal_weights_give_arithmetic_mean(
            values in prop::collection::vec(-100.0f64..100.0, 1..50),
            weight in 0.001f64..1e9,
        ) {
            let weights = vec![weight; values.len()];
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            let avg = weighted_average(&values, &weights).unwrap();
            prop_assert!((avg - mean).abs() < 1e-9);
        }
    }
}
