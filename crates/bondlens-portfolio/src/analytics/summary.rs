//! Fund-level summary statistics.

use bondlens_core::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::holding::{analyze_holding, FundHolding};
use super::parallel::maybe_parallel_map;
use super::weighted::WeightedSum;
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{AnalyticsConfig, PortfolioRow, SkippedRow};

/// Face-weighted statistics for one fund.
///
/// Percent-style fields (`wair_pct`, `waytm_pct`) are the weighted decimal
/// fraction times 100. Every average is `None` when the fund has no
/// includable holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSummary {
    /// Fund name.
    pub fund: String,
    /// Settlement date the analytics were computed for.
    pub settlement_date: Date,
    /// Total face amount of included holdings.
    pub total_face_amount: Decimal,
    /// Total settlement amount of included holdings that report one.
    pub total_settlement_amount: Decimal,
    /// Weighted average interest rate (%).
    pub wair_pct: Option<f64>,
    /// Weighted average remaining term (years).
    pub wat_years: Option<f64>,
    /// Weighted average yield to maturity (%).
    pub waytm_pct: Option<f64>,
    /// Weighted Macaulay duration (years).
    pub macaulay_duration: Option<f64>,
    /// Weighted modified duration.
    pub modified_duration: Option<f64>,
    /// Weighted convexity.
    pub convexity: Option<f64>,
    /// Included holdings, in row order.
    pub holdings: Vec<FundHolding>,
    /// Held rows that were excluded, in row order.
    pub skipped: Vec<SkippedRow>,
}

impl FundSummary {
    /// Number of included holdings.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Number of held rows that were excluded.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Returns true if no holding contributed to the averages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

#[derive(Default)]
struct Accumulators {
    coupon: WeightedSum,
    term: WeightedSum,
    ytm: WeightedSum,
    macaulay: WeightedSum,
    modified: WeightedSum,
    convexity: WeightedSum,
}

impl Accumulators {
    fn add(&mut self, holding: &FundHolding) {
        let w = holding.weight();
        self.coupon.add(holding.coupon_rate, w);
        self.term.add(holding.remaining_term_years, w);
        self.ytm.add(holding.ytm, w);
        self.macaulay.add(holding.metrics.macaulay_duration, w);
        self.modified.add(holding.metrics.modified_duration, w);
        self.convexity.add(holding.metrics.convexity, w);
    }
}

/// Summarises `fund` with the default configuration.
///
/// # Errors
///
/// Returns `PortfolioError::UnknownFund` if no row has a position entry for
/// `fund`.
///
/// # Example
///
/// ```rust
/// use bondlens_core::types::Date;
/// use bondlens_portfolio::{fund_summary, PortfolioRow};
/// use rust_decimal_macros::dec;
///
/// let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
/// let rows = vec![
///     PortfolioRow::new("A")
///         .with_issue_date(d(2020, 1, 1))
///         .with_maturity_date(d(2025, 1, 1))
///         .with_coupon_rate(dec!(0.06))
///         .with_ytm(0.05)
///         .with_frequency(2)
///         .with_position("SSS", dec!(1_000_000), None),
///     // No frequency: excluded and counted
///     PortfolioRow::new("B")
///         .with_issue_date(d(2021, 6, 1))
///         .with_maturity_date(d(2031, 6, 1))
///         .with_coupon_rate(dec!(0.08))
///         .with_ytm(0.07)
///         .with_position("SSS", dec!(3_000_000), None),
/// ];
///
/// let summary = fund_summary(&rows, "SSS", d(2023, 1, 1)).unwrap();
/// assert_eq!(summary.holding_count(), 1);
/// assert_eq!(summary.skipped_count(), 1);
/// assert!((summary.wair_pct.unwrap() - 6.0).abs() < 1e-9);
/// ```
pub fn fund_summary(
    rows: &[PortfolioRow],
    fund: &str,
    settlement: Date,
) -> PortfolioResult<FundSummary> {
    fund_summary_with_config(rows, fund, settlement, &AnalyticsConfig::default())
}

/// Summarises `fund`, computing per-row metrics according to `config`.
///
/// Rows the fund does not hold are ignored. Held rows that cannot produce
/// metrics are logged, recorded in [`FundSummary::skipped`] and left out of
/// every numerator and denominator. The reduction runs in row order, so the
/// result does not depend on whether the per-row step ran in parallel.
///
/// # Errors
///
/// Returns `PortfolioError::UnknownFund` if no row has a position entry for
/// `fund`.
pub fn fund_summary_with_config(
    rows: &[PortfolioRow],
    fund: &str,
    settlement: Date,
    config: &AnalyticsConfig,
) -> PortfolioResult<FundSummary> {
    if !rows.iter().any(|row| row.has_fund(fund)) {
        return Err(PortfolioError::unknown_fund(fund));
    }

    let evaluated = maybe_parallel_map(rows, config, |row| {
        analyze_holding(row, fund, settlement, config)
    });

    let mut acc = Accumulators::default();
    let mut holdings = Vec::new();
    let mut skipped = Vec::new();
    let mut total_face_amount = Decimal::ZERO;
    let mut total_settlement_amount = Decimal::ZERO;

    for result in evaluated.into_iter().flatten() {
        match result {
            Ok(holding) => {
                acc.add(&holding);
                total_face_amount += holding.face_amount;
                total_settlement_amount += holding.settlement_amount.unwrap_or(Decimal::ZERO);
                holdings.push(holding);
            }
            Err(skip) => {
                warn!(fund, reference = %skip.reference, reason = %skip.reason, "skipping row");
                skipped.push(skip);
            }
        }
    }

    debug!(
        fund,
        %settlement,
        holdings = holdings.len(),
        skipped = skipped.len(),
        "computed fund summary"
    );

    Ok(FundSummary {
        fund: fund.to_string(),
        settlement_date: settlement,
        total_face_amount,
        total_settlement_amount,
        wair_pct: acc.coupon.value().map(|v| v * 100.0),
        wat_years: acc.term.value(),
        waytm_pct: acc.ytm.value().map(|v| v * 100.0),
        macaulay_duration: acc.macaulay.value(),
        modified_duration: acc.modified.value(),
        convexity: acc.convexity.value(),
        holdings,
        skipped,
    })
}

/// Summarises several funds over the same rows.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidInput` if `funds` is empty, or the first
/// `PortfolioError::UnknownFund` encountered.
pub fn fund_summaries<S: AsRef<str>>(
    rows: &[PortfolioRow],
    funds: &[S],
    settlement: Date,
    config: &AnalyticsConfig,
) -> PortfolioResult<Vec<FundSummary>> {
    if funds.is_empty() {
        return Err(PortfolioError::invalid_input("no funds selected"));
    }
    funds
        .iter()
        .map(|fund| fund_summary_with_config(rows, fund.as_ref(), settlement, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SkipReason, TermSource};
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn bond(reference: &str, coupon: Decimal, ytm: f64, maturity: Date) -> PortfolioRow {
        PortfolioRow::new(reference)
            .with_issue_date(d(2020, 1, 1))
            .with_maturity_date(maturity)
            .with_coupon_rate(coupon)
            .with_ytm(ytm)
            .with_frequency(2)
    }

    fn rows() -> Vec<PortfolioRow> {
        vec![
            bond("A", dec!(0.06), 0.05, d(2025, 1, 1))
                .with_remaining_term(2.0)
                .with_position("SSS", dec!(1_000_000), Some(dec!(1_010_000)))
                .with_position("EC", dec!(2_000_000), None),
            bond("B", dec!(0.04), 0.045, d(2030, 1, 1))
                .with_remaining_term(7.0)
                .with_position("SSS", dec!(3_000_000), Some(dec!(2_900_000)))
                .with_position("EC", dec!(0), None),
        ]
    }

    #[test]
    fn test_weighted_statistics() {
        let summary = fund_summary(&rows(), "SSS", d(2023, 1, 1)).unwrap();

        assert_eq!(summary.holding_count(), 2);
        assert_eq!(summary.skipped_count(), 0);
        assert_eq!(summary.total_face_amount, dec!(4_000_000));
        assert_eq!(summary.total_settlement_amount, dec!(3_910_000));
        // (0.06 * 1 + 0.04 * 3) / 4 = 0.045
        assert_relative_eq!(summary.wair_pct.unwrap(), 4.5, epsilon = 1e-9);
        // (2 * 1 + 7 * 3) / 4 = 5.75
        assert_relative_eq!(summary.wat_years.unwrap(), 5.75, epsilon = 1e-12);
        // (0.05 * 1 + 0.045 * 3) / 4 = 0.04625
        assert_relative_eq!(summary.waytm_pct.unwrap(), 4.625, epsilon = 1e-9);

        let a = &summary.holdings[0].metrics;
        let b = &summary.holdings[1].metrics;
        assert_relative_eq!(
            summary.macaulay_duration.unwrap(),
            (a.macaulay_duration + 3.0 * b.macaulay_duration) / 4.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            summary.convexity.unwrap(),
            (a.convexity + 3.0 * b.convexity) / 4.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_face_rows_are_not_holdings() {
        let summary = fund_summary(&rows(), "EC", d(2023, 1, 1)).unwrap();
        assert_eq!(summary.holding_count(), 1);
        assert_eq!(summary.skipped_count(), 0);
        assert_relative_eq!(summary.wair_pct.unwrap(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_skipped_row_excluded_everywhere() {
        let mut rows = rows();
        rows[1].frequency = None;

        let summary = fund_summary(&rows, "SSS", d(2023, 1, 1)).unwrap();
        assert_eq!(summary.holding_count(), 1);
        assert_eq!(summary.skipped_count(), 1);
        assert_eq!(summary.skipped[0].reference, "B");
        assert_eq!(summary.skipped[0].reason, SkipReason::missing("Coupon_Freq"));
        assert_eq!(summary.total_face_amount, dec!(1_000_000));
        assert_relative_eq!(summary.wair_pct.unwrap(), 6.0, epsilon = 1e-9);
        assert_relative_eq!(summary.wat_years.unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(summary.waytm_pct.unwrap(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_all_rows_skipped_gives_undefined_averages() {
        let mut rows = rows();
        for row in &mut rows {
            row.coupon_rate = None;
        }
        let summary = fund_summary(&rows, "SSS", d(2023, 1, 1)).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.skipped_count(), 2);
        assert_eq!(summary.wair_pct, None);
        assert_eq!(summary.modified_duration, None);
        assert_eq!(summary.total_face_amount, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_fund() {
        let err = fund_summary(&rows(), "NVPF", d(2023, 1, 1)).unwrap_err();
        assert_eq!(err, PortfolioError::unknown_fund("NVPF"));
    }

    #[test]
    fn test_computed_term_source() {
        let config = AnalyticsConfig::sequential().with_term_source(TermSource::Computed);
        let summary = fund_summary_with_config(&rows(), "EC", d(2023, 1, 1), &config).unwrap();
        assert_relative_eq!(summary.wat_years.unwrap(), 731.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fund_summaries() {
        let config = AnalyticsConfig::default();
        let summaries = fund_summaries(&rows(), &["SSS", "EC"], d(2023, 1, 1), &config).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].fund, "SSS");
        assert_eq!(summaries[1].fund, "EC");

        let empty: [&str; 0] = [];
        assert!(fund_summaries(&rows(), &empty, d(2023, 1, 1), &config).is_err());
    }
}
