//! Portfolio row: one bond and its positions across funds.

use bondlens_analytics::BondTerms;
use bondlens_core::daycounts::DayCountConvention;
use bondlens_core::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::SkipReason;
use crate::error::{PortfolioError, PortfolioResult};

/// A fund's position in one bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FundPosition {
    /// Face (nominal) amount held. This is the aggregation weight.
    pub face_amount: Decimal,
    /// Settlement cost basis, when supplied.
    pub settlement_amount: Option<Decimal>,
}

impl FundPosition {
    /// Creates a position with a face amount and optional cost basis.
    #[must_use]
    pub fn new(face_amount: Decimal, settlement_amount: Option<Decimal>) -> Self {
        Self {
            face_amount,
            settlement_amount,
        }
    }
}

/// One bond as delivered by ingestion.
///
/// Term fields stay optional because source sheets are messy; they are
/// validated together by [`PortfolioRow::terms`] instead of being allowed to
/// poison downstream sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRow {
    /// ISIN, reference or issuer used to identify the row in reports.
    pub reference: String,
    /// Issue date.
    pub issue_date: Option<Date>,
    /// Maturity date.
    pub maturity_date: Option<Date>,
    /// Annual coupon rate as a decimal fraction.
    pub coupon_rate: Option<Decimal>,
    /// Market yield to maturity as a decimal fraction.
    pub ytm: Option<f64>,
    /// Raw payments-per-year value, validated when terms are built.
    pub frequency: Option<i64>,
    /// Precomputed remaining tenor in years.
    pub remaining_term_years: Option<f64>,
    /// Day count used when the tenor has to be computed.
    pub day_count: DayCountConvention,
    /// Positions keyed by fund name.
    pub positions: BTreeMap<String, FundPosition>,
}

impl PortfolioRow {
    /// Creates an empty row with the given reference.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            issue_date: None,
            maturity_date: None,
            coupon_rate: None,
            ytm: None,
            frequency: None,
            remaining_term_years: None,
            day_count: DayCountConvention::default(),
            positions: BTreeMap::new(),
        }
    }

    /// Sets the issue date.
    #[must_use]
    pub fn with_issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn with_maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the coupon rate.
    #[must_use]
    pub fn with_coupon_rate(mut self, rate: Decimal) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the yield to maturity.
    #[must_use]
    pub fn with_ytm(mut self, ytm: f64) -> Self {
        self.ytm = Some(ytm);
        self
    }

    /// Sets the payments per year.
    #[must_use]
    pub fn with_frequency(mut self, periods: i64) -> Self {
        self.frequency = Some(periods);
        self
    }

    /// Sets the precomputed remaining term.
    #[must_use]
    pub fn with_remaining_term(mut self, years: f64) -> Self {
        self.remaining_term_years = Some(years);
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Adds or replaces a fund position.
    #[must_use]
    pub fn with_position(
        mut self,
        fund: impl Into<String>,
        face_amount: Decimal,
        settlement_amount: Option<Decimal>,
    ) -> Self {
        self.positions.insert(
            fund.into(),
            FundPosition::new(face_amount, settlement_amount),
        );
        self
    }

    /// Position of `fund`, if the row has a column for it.
    #[must_use]
    pub fn position(&self, fund: &str) -> Option<&FundPosition> {
        self.positions.get(fund)
    }

    /// Face amount held by `fund`, zero when absent.
    #[must_use]
    pub fn face_amount(&self, fund: &str) -> Decimal {
        self.position(fund).map_or(Decimal::ZERO, |p| p.face_amount)
    }

    /// Returns true if `fund` holds a positive face amount.
    #[must_use]
    pub fn holds(&self, fund: &str) -> bool {
        self.face_amount(fund) > Decimal::ZERO
    }

    /// Returns true if the row carries any position entry for `fund`.
    #[must_use]
    pub fn has_fund(&self, fund: &str) -> bool {
        self.positions.contains_key(fund)
    }

    /// Fund names present on this row.
    pub fn funds(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    /// Validates the term fields into per-unit [`BondTerms`].
    ///
    /// # Errors
    ///
    /// Returns the first missing field, or `SkipReason::InvalidTerms` when
    /// the values are inconsistent.
    pub fn terms(&self) -> Result<BondTerms, SkipReason> {
        let issue = self
            .issue_date
            .ok_or_else(|| SkipReason::missing("Issue_Date"))?;
        let maturity = self
            .maturity_date
            .ok_or_else(|| SkipReason::missing("Maturity_Date"))?;
        let coupon = self.coupon_rate.ok_or_else(|| SkipReason::missing("Coupon"))?;
        let frequency = self
            .frequency
            .ok_or_else(|| SkipReason::missing("Coupon_Freq"))?;

        Ok(BondTerms::builder()
            .issue_date(issue)
            .maturity_date(maturity)
            .coupon_rate(coupon)
            .periods_per_year(frequency)
            .day_count(self.day_count)
            .build()?)
    }

    /// Yield to maturity, rejecting blanks and non-finite values.
    ///
    /// # Errors
    ///
    /// Returns `SkipReason::MissingField("YTM")`.
    pub fn yield_rate(&self) -> Result<f64, SkipReason> {
        self.ytm
            .filter(|y| y.is_finite())
            .ok_or_else(|| SkipReason::missing("YTM"))
    }

    /// Multiplies every face and settlement amount by a flat FX rate.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidFxRate` if `rate` is not positive.
    pub fn convert_currency(&mut self, rate: Decimal) -> PortfolioResult<()> {
        if rate <= Decimal::ZERO {
            return Err(PortfolioError::invalid_fx_rate(rate));
        }
        for position in self.positions.values_mut() {
            position.face_amount *= rate;
            position.settlement_amount = position.settlement_amount.map(|s| s * rate);
        }
        Ok(())
    }
}

/// Applies [`PortfolioRow::convert_currency`] to every row.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidFxRate` if `rate` is not positive; no row
/// is modified in that case.
pub fn convert_currency(rows: &mut [PortfolioRow], rate: Decimal) -> PortfolioResult<()> {
    if rate <= Decimal::ZERO {
        return Err(PortfolioError::invalid_fx_rate(rate));
    }
    rows.iter_mut().try_for_each(|row| row.convert_currency(rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn complete_row() -> PortfolioRow {
        PortfolioRow::new("RTB-2028")
            .with_issue_date(d(2023, 3, 1))
            .with_maturity_date(d(2028, 3, 1))
            .with_coupon_rate(dec!(0.0625))
            .with_ytm(0.058)
            .with_frequency(2)
            .with_position("SSS", dec!(1_000_000), Some(dec!(990_000)))
            .with_position("EC", dec!(0), None)
    }

    #[test]
    fn test_positions() {
        let row = complete_row();
        assert!(row.holds("SSS"));
        assert!(!row.holds("EC"));
        assert!(row.has_fund("EC"));
        assert!(!row.has_fund("MPF"));
        assert_eq!(row.face_amount("MPF"), Decimal::ZERO);
        assert_eq!(row.funds().collect::<Vec<_>>(), vec!["EC", "SSS"]);
    }

    #[test]
    fn test_terms_valid() {
        let terms = complete_row().terms().unwrap();
        assert_eq!(terms.coupon_rate(), dec!(0.0625));
        assert_eq!(terms.frequency().periods_per_year(), 2);
        assert_eq!(terms.face_value(), Decimal::ONE);
    }

    #[test]
    fn test_terms_missing_frequency() {
        let mut row = complete_row();
        row.frequency = None;
        assert_eq!(row.terms().unwrap_err(), SkipReason::missing("Coupon_Freq"));
    }

    #[test]
    fn test_terms_invalid_frequency() {
        let row = complete_row().with_frequency(5);
        assert!(matches!(row.terms(), Err(SkipReason::InvalidTerms(_))));
    }

    #[test]
    fn test_yield_rate() {
        let mut row = complete_row();
        assert_eq!(row.yield_rate().unwrap(), 0.058);
        row.ytm = Some(f64::NAN);
        assert_eq!(row.yield_rate().unwrap_err(), SkipReason::missing("YTM"));
    }

    #[test]
    fn test_convert_currency() {
        let mut rows = vec![complete_row()];
        convert_currency(&mut rows, dec!(56.5)).unwrap();
        let pos = rows[0].position("SSS").unwrap();
        assert_eq!(pos.face_amount, dec!(56_500_000));
        assert_eq!(pos.settlement_amount, Some(dec!(55_935_000)));

        let err = convert_currency(&mut rows, dec!(0)).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidFxRate { .. }));
        assert_eq!(rows[0].face_amount("SSS"), dec!(56_500_000));
    }
}
