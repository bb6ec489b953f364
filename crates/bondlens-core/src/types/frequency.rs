//! Coupon payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Coupon payments per year.
///
/// Any count that divides twelve is valid (1, 2, 3, 4, 6, 12), so that
/// every period spans a whole number of months.
///
/// ```rust
/// use bondlens_core::types::Frequency;
///
/// let freq = Frequency::new(4).unwrap();
/// assert_eq!(freq.months_per_period(), 3);
/// assert!(Frequency::new(5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Frequency(u32);

impl Frequency {
    /// Annual payments (1 per year)
    pub const ANNUAL: Self = Self(1);
    /// Semi-annual payments (2 per year)
    pub const SEMI_ANNUAL: Self = Self(2);
    /// Quarterly payments (4 per year)
    pub const QUARTERLY: Self = Self(4);
    /// Monthly payments (12 per year)
    pub const MONTHLY: Self = Self(12);

    /// Creates a frequency from a periods-per-year count.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFrequency` for zero or a count that does
    /// not divide twelve.
    pub fn new(periods_per_year: u32) -> CoreResult<Self> {
        Self::from_periods(i64::from(periods_per_year))
    }

    /// Creates a frequency from a signed count, as read from raw data.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFrequency` for non-positive counts or
    /// counts that do not divide twelve.
    pub fn from_periods(periods_per_year: i64) -> CoreResult<Self> {
        if periods_per_year <= 0 {
            return Err(CoreError::invalid_frequency(
                periods_per_year,
                "must be positive",
            ));
        }
        if 12 % periods_per_year != 0 {
            return Err(CoreError::invalid_frequency(
                periods_per_year,
                "must divide 12",
            ));
        }
        Ok(Self(periods_per_year as u32))
    }

    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        self.0
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.0
    }

    /// Length of one period in years.
    #[must_use]
    pub fn period_years(&self) -> f64 {
        1.0 / f64::from(self.0)
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::SEMI_ANNUAL
    }
}

impl TryFrom<i64> for Frequency {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_periods(value)
    }
}

impl From<Frequency> for u32 {
    fn from(freq: Frequency) -> Self {
        freq.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "Annual"),
            2 => write!(f, "Semi-Annual"),
            3 => write!(f, "Tri-Annual"),
            4 => write!(f, "Quarterly"),
            6 => write!(f, "Bi-Monthly"),
            12 => write!(f, "Monthly"),
            n => write!(f, "{n}x/year"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_periods() {
        assert_eq!(Frequency::ANNUAL.months_per_period(), 12);
        assert_eq!(Frequency::SEMI_ANNUAL.months_per_period(), 6);
        assert_eq!(Frequency::QUARTERLY.months_per_period(), 3);
        assert_eq!(Frequency::MONTHLY.months_per_period(), 1);
        assert_eq!(Frequency::new(3).unwrap().months_per_period(), 4);
        assert_eq!(Frequency::new(6).unwrap().months_per_period(), 2);
    }

    #[test]
    fn test_rejects_unsupported_counts() {
        assert!(Frequency::new(0).is_err());
        assert!(Frequency::new(5).is_err());
        assert!(Frequency::new(24).is_err());
        assert!(Frequency::from_periods(-2).is_err());
    }

    #[test]
    fn test_period_years() {
        assert!((Frequency::QUARTERLY.period_years() - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_display() {
        assert_eq!(Frequency::SEMI_ANNUAL.to_string(), "Semi-Annual");
        assert_eq!(Frequency::new(3).unwrap().to_string(), "Tri-Annual");
    }

    #[test]
    fn test_serde_validates() {
        let freq: Frequency = serde_json::from_str("4").unwrap();
        assert_eq!(freq, Frequency::QUARTERLY);
        assert_eq!(serde_json::to_string(&freq).unwrap(), "4");
        assert!(serde_json::from_str::<Frequency>("7").is_err());
    }
}
