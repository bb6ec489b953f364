//! Static terms of a fixed-coupon bond.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bondlens_core::daycounts::DayCountConvention;
use bondlens_core::types::{Date, Frequency};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Immutable terms of one bond.
///
/// Built through [`BondTerms::builder`], which enforces
/// `issue_date < maturity_date`, a non-negative coupon, a positive face
/// value and a payment frequency that divides twelve.
///
/// # Example
///
/// ```rust
/// use bondlens_analytics::BondTerms;
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
/// assert!((terms.coupon_payment() - 0.03).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTerms {
    issue_date: Date,
    maturity_date: Date,
    coupon_rate: Decimal,
    frequency: Frequency,
    face_value: Decimal,
    day_count: DayCountConvention,
}

impl BondTerms {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BondTermsBuilder {
        BondTermsBuilder::default()
    }

    /// Issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Annual coupon rate as a decimal fraction.
    #[must_use]
    pub fn coupon_rate(&self) -> Decimal {
        self.coupon_rate
    }

    /// Payment frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Face value.
    #[must_use]
    pub fn face_value(&self) -> Decimal {
        self.face_value
    }

    /// Day count convention used for tenor.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Coupon paid each period: `coupon_rate * face_value / frequency`.
    #[must_use]
    pub fn coupon_payment(&self) -> f64 {
        let per_period = self.coupon_rate * self.face_value
            / Decimal::from(self.frequency.periods_per_year());
        per_period.to_f64().unwrap_or(0.0)
    }

    /// Face value as `f64`.
    #[must_use]
    pub fn face_value_f64(&self) -> f64 {
        self.face_value.to_f64().unwrap_or(0.0)
    }

    /// Remaining tenor in years under the bond's day count, floored at zero.
    #[must_use]
    pub fn remaining_term_years(&self, settlement: Date) -> f64 {
        self.day_count
            .year_fraction_f64(settlement, self.maturity_date)
            .max(0.0)
    }
}

/// Builder for [`BondTerms`].
#[derive(Debug, Clone, Default)]
pub struct BondTermsBuilder {
    issue_date: Option<Date>,
    maturity_date: Option<Date>,
    coupon_rate: Option<Decimal>,
    periods_per_year: Option<i64>,
    face_value: Option<Decimal>,
    day_count: Option<DayCountConvention>,
}

impl BondTermsBuilder {
    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the annual coupon rate (0.0625 = 6.25%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: Decimal) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets an already validated frequency.
    #[must_use]
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.periods_per_year = Some(i64::from(freq.periods_per_year()));
        self
    }

    /// Sets a raw payments-per-year count, validated on build.
    #[must_use]
    pub fn periods_per_year(mut self, periods: i64) -> Self {
        self.periods_per_year = Some(periods);
        self
    }

    /// Sets the face value (default 1).
    #[must_use]
    pub fn face_value(mut self, value: Decimal) -> Self {
        self.face_value = Some(value);
        self
    }

    /// Sets the day count convention (default ACT/360).
    #[must_use]
    pub fn day_count(mut self, dc: DayCountConvention) -> Self {
        self.day_count = Some(dc);
        self
    }

    /// Builds the terms.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidTerms` if a field is missing or the
    /// values are inconsistent.
    pub fn build(self) -> AnalyticsResult<BondTerms> {
        let issue_date = self
            .issue_date
            .ok_or_else(|| AnalyticsError::invalid_terms("missing issue_date"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| AnalyticsError::invalid_terms("missing maturity_date"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| AnalyticsError::invalid_terms("missing coupon_rate"))?;
        let periods = self
            .periods_per_year
            .ok_or_else(|| AnalyticsError::invalid_terms("missing payment frequency"))?;

        let frequency = Frequency::from_periods(periods)?;
        if maturity_date <= issue_date {
            return Err(AnalyticsError::invalid_terms(format!(
                "maturity {maturity_date} must be after issue {issue_date}"
            )));
        }
        if coupon_rate < Decimal::ZERO {
            return Err(AnalyticsError::invalid_terms("coupon_rate cannot be negative"));
        }
        let face_value = self.face_value.unwrap_or(Decimal::ONE);
        if face_value <= Decimal::ZERO {
            return Err(AnalyticsError::invalid_terms("face_value must be positive"));
        }

        Ok(BondTerms {
            issue_date,
            maturity_date,
            coupon_rate,
            frequency,
            face_value,
            day_count: self.day_count.unwrap_or_default(),
        })
    }
}
