//! File loading feeding the portfolio analytics.

use approx::assert_relative_eq;
use bondlens_core::types::Date;
use bondlens_ext_file::{load_portfolio_csv, FileError, LoadOptions};
use bondlens_portfolio::fund_summary;
use rust_decimal_macros::dec;
use std::io::Write;

const HOLDINGS: &str = "\
ISIN,Issue_Date,Maturity_Date,Coupon,YTM,Coupon_Freq,Remaining_Term_Yrs,SSS_Outstanding,EC_Outstanding
PH-A,2020-01-01,2025-01-01,6%,0.05,2,2.0,10000000,2000000
PH-B,2020-03-15,2030-03-15,0.0425,0.055,2,7.2,5000000,0
PH-C,2021-01-01,2031-01-01,0.09,0.08,,8.0,50000000,0

";

fn write_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_and_summarize() {
    let file = write_file(HOLDINGS);
    let loaded = load_portfolio_csv(file.path(), &LoadOptions::default()).unwrap();

    assert_eq!(loaded.funds, vec!["SSS", "EC"]);
    assert_eq!(loaded.rows.len(), 3);

    let settlement = Date::from_ymd(2023, 1, 1).unwrap();
    let summary = fund_summary(&loaded.rows, "SSS", settlement).unwrap();
    assert_eq!(summary.holding_count(), 2);
    assert_eq!(summary.skipped_count(), 1);
    assert_eq!(summary.skipped[0].reference, "PH-C");
    assert_eq!(summary.total_face_amount, dec!(15_000_000));

    let expected_wair = (6.0 * 10.0 + 4.25 * 5.0) / 15.0;
    assert_relative_eq!(summary.wair_pct.unwrap(), expected_wair, epsilon = 1e-9);
    let expected_wat = (2.0 * 10.0 + 7.2 * 5.0) / 15.0;
    assert_relative_eq!(summary.wat_years.unwrap(), expected_wat, epsilon = 1e-9);
}

#[test]
fn test_fx_rate_scales_face() {
    let file = write_file(HOLDINGS);
    let options = LoadOptions::default().with_fx_rate(dec!(2));
    let loaded = load_portfolio_csv(file.path(), &options).unwrap();
    assert_eq!(loaded.rows[0].face_amount("EC"), dec!(4_000_000));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_portfolio_csv(dir.path().join("absent.csv"), &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, FileError::Io(_)));
}

#[test]
fn test_missing_required_column() {
    let file = write_file("ISIN,Maturity_Date,Coupon,YTM,SSS_Outstanding\nPH-A,2025-01-01,0.06,0.05,100\n");
    let err = load_portfolio_csv(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Coupon_Freq"));
}

#[test]
fn test_missing_issue_date_column_fails_the_load() {
    let file = write_file(
        "ISIN,Maturity_Date,Coupon,YTM,Coupon_Freq,SSS_Outstanding\n\
         PH-A,2025-01-01,0.06,0.05,2,100\n\
         PH-B,2030-03-15,0.0425,0.055,2,200\n",
    );
    let err = load_portfolio_csv(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, FileError::MissingColumn { .. }));
    assert!(err.to_string().contains("Issue_Date"));
}
