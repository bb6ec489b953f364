//! CSV holdings loader.

use std::io::Read;
use std::path::Path;

use bondlens_core::daycounts::DayCountConvention;
use bondlens_portfolio::{convert_currency, FundPosition, PortfolioRow};
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cell;
use crate::columns::ColumnMap;
use crate::error::{FileError, FileResult};

/// Options applied while loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Flat rate multiplied into every face and settlement amount.
    pub fx_rate: Option<Decimal>,
    /// Day count assigned to every row.
    pub day_count: DayCountConvention,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            fx_rate: None,
            day_count: DayCountConvention::Act360,
        }
    }
}

impl LoadOptions {
    /// Sets the FX rate.
    #[must_use]
    pub fn with_fx_rate(mut self, rate: Decimal) -> Self {
        self.fx_rate = Some(rate);
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }
}

/// Rows and the fund names found in the header, in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedPortfolio {
    /// Parsed rows, in file order.
    pub rows: Vec<PortfolioRow>,
    /// Fund names.
    pub funds: Vec<String>,
}

fn field<'r>(record: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
    index.and_then(|i| record.get(i))
}

fn text(record: &StringRecord, index: Option<usize>) -> Option<String> {
    field(record, index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_row(
    record: &StringRecord,
    columns: &ColumnMap,
    line: usize,
    day_count: DayCountConvention,
) -> PortfolioRow {
    let reference = text(record, columns.isin)
        .or_else(|| text(record, columns.reference))
        .or_else(|| text(record, columns.issuer))
        .unwrap_or_else(|| format!("row {line}"));

    let mut row = PortfolioRow::new(reference).with_day_count(day_count);
    row.maturity_date = field(record, Some(columns.maturity)).and_then(cell::date);
    row.issue_date = field(record, Some(columns.issue)).and_then(cell::date);
    row.coupon_rate = field(record, Some(columns.coupon)).and_then(cell::decimal);
    row.ytm = field(record, Some(columns.ytm)).and_then(cell::float);
    row.frequency = field(record, Some(columns.frequency)).and_then(cell::frequency);
    row.remaining_term_years = field(record, columns.remaining_term).and_then(cell::float);

    for fund in &columns.funds {
        let face = field(record, Some(fund.face))
            .and_then(cell::decimal)
            .unwrap_or(Decimal::ZERO);
        let settlement = field(record, fund.settlement).and_then(cell::decimal);
        row.positions
            .insert(fund.name.clone(), FundPosition::new(face, settlement));
    }
    row
}

/// Reads holdings from any CSV source.
///
/// Blank lines and rows with every cell empty are ignored. Cells that cannot
/// be parsed become missing fields on the row.
///
/// # Errors
///
/// - `FileError::MissingColumn` if a required column is absent
/// - `FileError::InvalidFxRate` if `options.fx_rate` is not positive
/// - `FileError::Csv` for malformed CSV
pub fn read_portfolio<R: Read>(reader: R, options: &LoadOptions) -> FileResult<LoadedPortfolio> {
    if let Some(rate) = options.fx_rate {
        if rate <= Decimal::ZERO {
            return Err(FileError::InvalidFxRate {
                rate: rate.to_string(),
            });
        }
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut rows = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        // Line 1 is the header
        rows.push(parse_row(&record, &columns, i + 2, options.day_count));
    }

    if let Some(rate) = options.fx_rate {
        convert_currency(&mut rows, rate).map_err(|_| FileError::InvalidFxRate {
            rate: rate.to_string(),
        })?;
        debug!(%rate, "applied FX conversion");
    }

    let funds = columns.fund_names();
    info!(rows = rows.len(), funds = ?funds, "loaded portfolio");
    Ok(LoadedPortfolio { rows, funds })
}

/// Loads holdings from a CSV file.
///
/// # Errors
///
/// `FileError::Io` if the file cannot be opened, otherwise as
/// [`read_portfolio`].
pub fn load_portfolio_csv(path: impl AsRef<Path>, options: &LoadOptions) -> FileResult<LoadedPortfolio> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening holdings file");
    let file = std::fs::File::open(path)?;
    read_portfolio(std::io::BufReader::new(file), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SHEET: &str = "\
ISIN,Issuer,Issue_Date,Maturity_Date,Coupon,YTM,Coupon_Freq,Remaining_Term_Yrs,Face_Amount_SSS,Settlement_Amount_SSS,Face_Amount_EC
PH0000001,ROP,2020-01-01,2025-01-01,0.06,0.05,2,2.0,\"1,000,000\",\"1,015,000.50\",500000
,ACME Corp,01/15/2021,01/15/2031,6.5%,0.071,Quarterly,,250000,,-
,,2022-06-01,2027-06-01,0.05,N/A,,4.4,100,,0
";

    #[test]
    fn test_reads_rows_and_funds() {
        let loaded = read_portfolio(SHEET.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(loaded.funds, vec!["SSS", "EC"]);
        assert_eq!(loaded.rows.len(), 3);

        let first = &loaded.rows[0];
        assert_eq!(first.reference, "PH0000001");
        assert_eq!(first.coupon_rate, Some(dec!(0.06)));
        assert_eq!(first.frequency, Some(2));
        assert_eq!(first.remaining_term_years, Some(2.0));
        let sss = first.position("SSS").unwrap();
        assert_eq!(sss.face_amount, dec!(1_000_000));
        assert_eq!(sss.settlement_amount, Some(dec!(1_015_000.50)));
        assert_eq!(first.face_amount("EC"), dec!(500_000));
    }

    #[test]
    fn test_lenient_cells() {
        let loaded = read_portfolio(SHEET.as_bytes(), &LoadOptions::default()).unwrap();

        let second = &loaded.rows[1];
        assert_eq!(second.reference, "ACME Corp");
        assert_eq!(second.coupon_rate, Some(dec!(0.065)));
        assert_eq!(second.frequency, Some(4));
        assert_eq!(second.issue_date, Some(bondlens_core::types::Date::from_ymd(2021, 1, 15).unwrap()));
        assert_eq!(second.remaining_term_years, None);
        assert!(!second.holds("EC"));

        let third = &loaded.rows[2];
        assert_eq!(third.reference, "row 4");
        assert_eq!(third.ytm, None);
        assert_eq!(third.frequency, None);
    }

    #[test]
    fn test_fx_rate() {
        let options = LoadOptions::default().with_fx_rate(dec!(58.25));
        let loaded = read_portfolio(SHEET.as_bytes(), &options).unwrap();
        assert_eq!(loaded.rows[0].face_amount("SSS"), dec!(58_250_000));

        let options = LoadOptions::default().with_fx_rate(dec!(-1));
        let err = read_portfolio(SHEET.as_bytes(), &options).unwrap_err();
        assert!(matches!(err, FileError::InvalidFxRate { .. }));
    }

    #[test]
    fn test_day_count_option() {
        let options = LoadOptions::default().with_day_count(DayCountConvention::Thirty360US);
        let loaded = read_portfolio(SHEET.as_bytes(), &options).unwrap();
        assert!(loaded
            .rows
            .iter()
            .all(|r| r.day_count == DayCountConvention::Thirty360US));
    }
}
