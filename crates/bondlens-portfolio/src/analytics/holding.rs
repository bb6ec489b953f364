//! Per-holding analytics for one fund.

use bondlens_analytics::{analyze_bond_with, BondRiskMetrics};
use bondlens_core::types::Date;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    AnalyticsConfig, FundPosition, PortfolioRow, SkipReason, SkippedRow, TermSource,
};

/// A row held by a fund, with everything needed for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundHolding {
    /// Row reference.
    pub reference: String,
    /// Maturity date.
    pub maturity_date: Date,
    /// Face amount held by the fund (aggregation weight).
    pub face_amount: Decimal,
    /// Settlement cost basis for the fund, if known.
    pub settlement_amount: Option<Decimal>,
    /// Annual coupon rate as a decimal fraction.
    pub coupon_rate: f64,
    /// Yield to maturity as a decimal fraction.
    pub ytm: f64,
    /// Remaining term in years.
    pub remaining_term_years: f64,
    /// Per-unit price, durations and convexity.
    pub metrics: BondRiskMetrics,
}

impl FundHolding {
    /// Face amount as the `f64` weight used in averages.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.face_amount.to_f64().unwrap_or(0.0)
    }
}

/// Evaluates one row for `fund`.
///
/// Returns `None` when the fund does not hold the row (face amount ≤ 0).
/// Otherwise returns the holding, or the reason it must be skipped.
#[must_use]
pub fn analyze_holding(
    row: &PortfolioRow,
    fund: &str,
    settlement: Date,
    config: &AnalyticsConfig,
) -> Option<Result<FundHolding, SkippedRow>> {
    let position = row.position(fund).filter(|p| p.face_amount > Decimal::ZERO)?;
    Some(
        evaluate(row, position, settlement, config)
            .map_err(|reason| SkippedRow::new(row.reference.clone(), reason)),
    )
}

fn evaluate(
    row: &PortfolioRow,
    position: &FundPosition,
    settlement: Date,
    config: &AnalyticsConfig,
) -> Result<FundHolding, SkipReason> {
    let terms = row.terms()?;
    let ytm = row.yield_rate()?;
    // Nothing left to discount on or after maturity
    if settlement >= terms.maturity_date() {
        return Err(SkipReason::Matured(terms.maturity_date().to_string()));
    }
    let metrics = analyze_bond_with(settlement, &terms, ytm, config.schedule_method)?;

    let remaining_term_years = match config.term_source {
        TermSource::PreferColumn => row
            .remaining_term_years
            .filter(|t| t.is_finite())
            .unwrap_or_else(|| terms.remaining_term_years(settlement)),
        TermSource::Computed => terms.remaining_term_years(settlement),
    };

    Ok(FundHolding {
        reference: row.reference.clone(),
        maturity_date: terms.maturity_date(),
        face_amount: position.face_amount,
        settlement_amount: position.settlement_amount,
        coupon_rate: terms.coupon_rate().to_f64().unwrap_or(0.0),
        ytm,
        remaining_term_years,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn row() -> PortfolioRow {
        PortfolioRow::new("FXTN-2025")
            .with_issue_date(d(2020, 1, 1))
            .with_maturity_date(d(2025, 1, 1))
            .with_coupon_rate(dec!(0.06))
            .with_ytm(0.05)
            .with_frequency(2)
            .with_remaining_term(1.95)
            .with_position("SSS", dec!(5_000_000), Some(dec!(5_100_000)))
            .with_position("EC", dec!(0), None)
    }

    #[test]
    fn test_not_held() {
        let config = AnalyticsConfig::default();
        assert!(analyze_holding(&row(), "EC", d(2023, 1, 1), &config).is_none());
        assert!(analyze_holding(&row(), "MPF", d(2023, 1, 1), &config).is_none());
    }

    #[test]
    fn test_held_row() {
        let config = AnalyticsConfig::default();
        let holding = analyze_holding(&row(), "SSS", d(2023, 1, 1), &config)
            .unwrap()
            .unwrap();

        assert_eq!(holding.face_amount, dec!(5_000_000));
        assert_relative_eq!(holding.coupon_rate, 0.06);
        assert_relative_eq!(holding.remaining_term_years, 1.95);
        assert_relative_eq!(holding.metrics.macaulay_duration, 1.915209, epsilon = 1e-6);
        assert_relative_eq!(holding.weight(), 5_000_000.0);
    }

    #[test]
    fn test_computed_term_source() {
        let config = AnalyticsConfig::default().with_term_source(TermSource::Computed);
        let holding = analyze_holding(&row(), "SSS", d(2023, 1, 1), &config)
            .unwrap()
            .unwrap();
        // ACT/360: 731 days
        assert_relative_eq!(holding.remaining_term_years, 731.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matured_row_is_skipped() {
        let config = AnalyticsConfig::default();
        let skipped = analyze_holding(&row(), "SSS", d(2025, 1, 1), &config)
            .unwrap()
            .unwrap_err();
        assert_eq!(skipped.reference, "FXTN-2025");
        assert!(matches!(skipped.reason, SkipReason::Matured(_)));

        let skipped = analyze_holding(&row(), "SSS", d(2026, 1, 1), &config)
            .unwrap()
            .unwrap_err();
        assert!(matches!(skipped.reason, SkipReason::Matured(_)));
    }

    #[test]
    fn test_missing_ytm_is_skipped() {
        let mut row = row();
        row.ytm = None;
        let skipped = analyze_holding(&row, "SSS", d(2023, 1, 1), &AnalyticsConfig::default())
            .unwrap()
            .unwrap_err();
        assert_eq!(skipped.reason, SkipReason::missing("YTM"));
    }
}
