//! Day count conventions.
//!
//! Conventions turn a pair of dates into a day count and a year fraction.
//! Bondlens uses them for remaining tenor; coupon schedules measure the
//! first period in actual days regardless of convention.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`Thirty360US`]: 30/360 US (Bond Basis)
//!
//! # Usage
//!
//! ```rust
//! use bondlens_core::daycounts::{DayCount, Thirty360US};
//! use bondlens_core::types::Date;
//!
//! let dc = Thirty360US;
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! assert_eq!(dc.day_count(start, end), 180);
//! ```

mod act360;
mod act365;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use thirty360::Thirty360US;

use crate::types::Date;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention (e.g., "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    ///
    /// ACT conventions count calendar days; 30/360 assumes 30-day months.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
///
/// Serialises as its display name, so configuration files read
/// `day_count = "ACT/365"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayCountConvention {
    /// Actual/360
    #[default]
    Act360,

    /// Actual/365 Fixed
    Act365Fixed,

    /// 30/360 US (Bond Basis)
    Thirty360US,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::Thirty360US => Box::new(Thirty360US),
        }
    }

    /// Returns the conventional name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365",
            DayCountConvention::Thirty360US => "30/360",
        }
    }

    /// Year fraction between two dates as `f64`.
    #[must_use]
    pub fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.to_day_count()
            .year_fraction(start, end)
            .to_f64()
            .unwrap_or(0.0)
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = DayCountParseError;

    /// Parses conventional names ("ACT/360", "30/360") and common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_uppercase();
        let normalized = normalized.trim();

        match normalized {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),

            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365" => {
                Ok(DayCountConvention::Act365Fixed)
            }

            "30/360" | "30/360 US" | "30U/360" | "BOND" | "THIRTY360" => {
                Ok(DayCountConvention::Thirty360US)
            }

            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for DayCountConvention {
    type Error = DayCountParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayCountConvention> for String {
    fn from(dc: DayCountConvention) -> Self {
        dc.name().to_string()
    }
}

/// Error type for parsing day count conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCountParseError(pub String);

impl std::fmt::Display for DayCountParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown day count convention: '{}'", self.0)
    }
}

impl std::error::Error for DayCountParseError {}
