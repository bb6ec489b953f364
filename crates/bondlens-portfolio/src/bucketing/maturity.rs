//! Maturity bucketing of a fund's included holdings.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::analytics::{FundHolding, FundSummary, WeightedSum};

/// Remaining-term bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaturityBucket {
    /// 0 to 1 year
    ZeroToOne,
    /// 1 to 3 years
    OneToThree,
    /// 3 to 5 years
    ThreeToFive,
    /// 5 to 7 years
    FiveToSeven,
    /// 7 to 10 years
    SevenToTen,
    /// 10 to 20 years
    TenToTwenty,
    /// 20 to 30 years
    TwentyToThirty,
    /// Over 30 years
    ThirtyPlus,
}

impl MaturityBucket {
    /// Classify a remaining term in years. Upper bounds are inclusive.
    #[must_use]
    pub fn from_years(years: f64) -> Self {
        match years {
            y if y <= 1.0 => Self::ZeroToOne,
            y if y <= 3.0 => Self::OneToThree,
            y if y <= 5.0 => Self::ThreeToFive,
            y if y <= 7.0 => Self::FiveToSeven,
            y if y <= 10.0 => Self::SevenToTen,
            y if y <= 20.0 => Self::TenToTwenty,
            y if y <= 30.0 => Self::TwentyToThirty,
            _ => Self::ThirtyPlus,
        }
    }

    /// Returns the label for this bucket.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::ZeroToOne => "0-1Y",
            Self::OneToThree => "1-3Y",
            Self::ThreeToFive => "3-5Y",
            Self::FiveToSeven => "5-7Y",
            Self::SevenToTen => "7-10Y",
            Self::TenToTwenty => "10-20Y",
            Self::TwentyToThirty => "20-30Y",
            Self::ThirtyPlus => "30Y+",
        }
    }

    /// Returns all buckets in order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::ZeroToOne,
            Self::OneToThree,
            Self::ThreeToFive,
            Self::FiveToSeven,
            Self::SevenToTen,
            Self::TenToTwenty,
            Self::TwentyToThirty,
            Self::ThirtyPlus,
        ]
    }
}

impl fmt::Display for MaturityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Aggregates for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketMetrics {
    /// Bucket.
    pub bucket: MaturityBucket,
    /// Number of holdings.
    pub count: usize,
    /// Total face amount.
    pub face_amount: Decimal,
    /// Share of the fund's face amount (%).
    pub weight_pct: f64,
    /// Face-weighted modified duration within the bucket.
    pub modified_duration: Option<f64>,
}

/// Holdings grouped by remaining term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaturityDistribution {
    /// Non-empty buckets, shortest first.
    pub buckets: Vec<BucketMetrics>,
    /// Total face amount across all buckets.
    pub total_face_amount: Decimal,
}

impl MaturityDistribution {
    /// Metrics for one bucket, if it has holdings.
    #[must_use]
    pub fn get(&self, bucket: MaturityBucket) -> Option<&BucketMetrics> {
        self.buckets.iter().find(|m| m.bucket == bucket)
    }
}

/// Buckets the summary's included holdings by remaining term.
#[must_use]
pub fn bucket_by_maturity(summary: &FundSummary) -> MaturityDistribution {
    let total_face_amount = summary.total_face_amount;
    if total_face_amount.is_zero() {
        return MaturityDistribution::default();
    }

    let mut grouped: BTreeMap<MaturityBucket, Vec<&FundHolding>> = BTreeMap::new();
    for holding in &summary.holdings {
        grouped
            .entry(MaturityBucket::from_years(holding.remaining_term_years))
            .or_default()
            .push(holding);
    }

    let total = total_face_amount.to_f64().unwrap_or(0.0);
    let buckets = grouped
        .into_iter()
        .map(|(bucket, holdings)| {
            let face_amount: Decimal = holdings.iter().map(|h| h.face_amount).sum();
            let mut duration = WeightedSum::new();
            for h in &holdings {
                duration.add(h.metrics.modified_duration, h.weight());
            }
            BucketMetrics {
                bucket,
                count: holdings.len(),
                face_amount,
                weight_pct: face_amount.to_f64().unwrap_or(0.0) / total * 100.0,
                modified_duration: duration.value(),
            }
        })
        .collect();

    MaturityDistribution {
        buckets,
        total_face_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fund_summary;
    use crate::types::PortfolioRow;
    use approx::assert_relative_eq;
    use bondlens_core::types::Date;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_years() {
        assert_eq!(MaturityBucket::from_years(0.5), MaturityBucket::ZeroToOne);
        assert_eq!(MaturityBucket::from_years(1.0), MaturityBucket::ZeroToOne);
        assert_eq!(MaturityBucket::from_years(1.1), MaturityBucket::OneToThree);
        assert_eq!(MaturityBucket::from_years(8.0), MaturityBucket::SevenToTen);
        assert_eq!(MaturityBucket::from_years(50.0), MaturityBucket::ThirtyPlus);
    }

    #[test]
    fn test_labels_in_order() {
        let labels: Vec<_> = MaturityBucket::all().iter().map(MaturityBucket::label).collect();
        assert_eq!(labels.first(), Some(&"0-1Y"));
        assert_eq!(labels.last(), Some(&"30Y+"));
        assert_eq!(labels.len(), 8);
    }

    #[test]
    fn test_bucket_by_maturity() {
        let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
        let row = |name: &str, maturity: Date, term: f64, face| {
            PortfolioRow::new(name)
                .with_issue_date(d(2020, 1, 1))
                .with_maturity_date(maturity)
                .with_coupon_rate(dec!(0.05))
                .with_ytm(0.05)
                .with_frequency(2)
                .with_remaining_term(term)
                .with_position("SSS", face, None)
        };
        let rows = vec![
            row("short", d(2024, 7, 1), 0.5, dec!(1_000_000)),
            row("mid", d(2027, 1, 1), 4.0, dec!(2_000_000)),
            row("mid2", d(2028, 1, 1), 5.0, dec!(1_000_000)),
        ];
        let summary = fund_summary(&rows, "SSS", d(2023, 1, 1)).unwrap();
        let dist = bucket_by_maturity(&summary);

        assert_eq!(dist.buckets.len(), 2);
        assert_eq!(dist.buckets[0].bucket, MaturityBucket::ZeroToOne);
        let mid = dist.get(MaturityBucket::ThreeToFive).unwrap();
        assert_eq!(mid.count, 2);
        assert_eq!(mid.face_amount, dec!(3_000_000));
        assert_relative_eq!(mid.weight_pct, 75.0, epsilon = 1e-12);

        let total_pct: f64 = dist.buckets.iter().map(|b| b.weight_pct).sum();
        assert_relative_eq!(total_pct, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let rows = vec![PortfolioRow::new("x").with_position("SSS", dec!(100), None)];
        let summary = fund_summary(&rows, "SSS", Date::from_ymd(2023, 1, 1).unwrap()).unwrap();
        assert!(bucket_by_maturity(&summary).buckets.is_empty());
    }
}
