//! Maturity report: which holdings mature in a calendar window.

use bondlens_core::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::PortfolioRow;

/// Calendar window relative to an as-of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityWindow {
    /// Every maturity on or after the as-of date.
    #[default]
    All,
    /// Maturities in the as-of date's calendar month.
    Month,
    /// Maturities in the as-of date's calendar year.
    Year,
}

impl MaturityWindow {
    /// Returns true if `maturity` falls in this window.
    #[must_use]
    pub fn contains(&self, maturity: Date, as_of: Date) -> bool {
        match self {
            Self::All => maturity >= as_of,
            Self::Month => maturity.year_month() == as_of.year_month(),
            Self::Year => maturity.year() == as_of.year(),
        }
    }
}

impl fmt::Display for MaturityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl FromStr for MaturityWindow {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(PortfolioError::invalid_input(format!(
                "unknown maturity window '{other}'"
            ))),
        }
    }
}

/// One maturing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityEntry {
    /// Row reference.
    pub reference: String,
    /// Maturity date.
    pub maturity_date: Date,
    /// Face amount per selected fund, aligned with [`MaturityReport::funds`].
    pub amounts: Vec<Decimal>,
    /// Sum across the selected funds.
    pub total: Decimal,
}

/// Holdings maturing in a window, with per-fund totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityReport {
    /// Window applied.
    pub window: MaturityWindow,
    /// Reference date of the window.
    pub as_of: Date,
    /// Selected funds, in the order given.
    pub funds: Vec<String>,
    /// Maturing rows, earliest first.
    pub entries: Vec<MaturityEntry>,
    /// Total per fund, aligned with `funds`.
    pub fund_totals: Vec<Decimal>,
    /// Sum of all fund totals.
    pub grand_total: Decimal,
    /// Rows without a maturity date.
    pub skipped: usize,
}

/// Lists rows held by any of `funds` that mature inside `window`.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidInput` if `funds` is empty.
pub fn maturity_report<S: AsRef<str>>(
    rows: &[PortfolioRow],
    funds: &[S],
    window: MaturityWindow,
    as_of: Date,
) -> PortfolioResult<MaturityReport> {
    if funds.is_empty() {
        return Err(PortfolioError::invalid_input("no funds selected"));
    }

    let mut entries = Vec::new();
    let mut skipped = 0;
    for row in rows {
        if !funds.iter().any(|f| row.holds(f.as_ref())) {
            continue;
        }
        let Some(maturity_date) = row.maturity_date else {
            skipped += 1;
            continue;
        };
        if !window.contains(maturity_date, as_of) {
            continue;
        }
        let amounts: Vec<Decimal> = funds.iter().map(|f| row.face_amount(f.as_ref())).collect();
        entries.push(MaturityEntry {
            reference: row.reference.clone(),
            maturity_date,
            total: amounts.iter().copied().sum(),
            amounts,
        });
    }
    entries.sort_by(|a, b| {
        a.maturity_date
            .cmp(&b.maturity_date)
            .then_with(|| a.reference.cmp(&b.reference))
    });

    let fund_totals: Vec<Decimal> = (0..funds.len())
        .map(|i| entries.iter().map(|e| e.amounts[i]).sum())
        .collect();
    let grand_total = fund_totals.iter().copied().sum();

    debug!(%window, %as_of, entries = entries.len(), skipped, "built maturity report");

    Ok(MaturityReport {
        window,
        as_of,
        funds: funds.iter().map(|f| f.as_ref().to_string()).collect(),
        entries,
        fund_totals,
        grand_total,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn rows() -> Vec<PortfolioRow> {
        vec![
            PortfolioRow::new("B")
                .with_maturity_date(d(2024, 3, 20))
                .with_position("SSS", dec!(100), None)
                .with_position("EC", dec!(50), None),
            PortfolioRow::new("A")
                .with_maturity_date(d(2024, 3, 5))
                .with_position("SSS", dec!(200), None),
            PortfolioRow::new("C")
                .with_maturity_date(d(2024, 11, 1))
                .with_position("EC", dec!(25), None),
            PortfolioRow::new("old")
                .with_maturity_date(d(2023, 12, 31))
                .with_position("SSS", dec!(10), None),
            PortfolioRow::new("undated").with_position("SSS", dec!(10), None),
            PortfolioRow::new("other fund")
                .with_maturity_date(d(2024, 3, 10))
                .with_position("MPF", dec!(999), None),
        ]
    }

    #[test]
    fn test_month_window() {
        let report = maturity_report(&rows(), &["SSS", "EC"], MaturityWindow::Month, d(2024, 3, 15))
            .unwrap();
        let refs: Vec<_> = report.entries.iter().map(|e| e.reference.as_str()).collect();
        assert_eq!(refs, vec!["A", "B"]);
        assert_eq!(report.entries[1].amounts, vec![dec!(100), dec!(50)]);
        assert_eq!(report.entries[1].total, dec!(150));
        assert_eq!(report.fund_totals, vec![dec!(300), dec!(50)]);
        assert_eq!(report.grand_total, dec!(350));
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_year_and_all_windows() {
        let year = maturity_report(&rows(), &["EC"], MaturityWindow::Year, d(2024, 1, 1)).unwrap();
        assert_eq!(year.entries.len(), 2);

        let all = maturity_report(&rows(), &["SSS"], MaturityWindow::All, d(2024, 3, 6)).unwrap();
        let refs: Vec<_> = all.entries.iter().map(|e| e.reference.as_str()).collect();
        assert_eq!(refs, vec!["B"]);
    }

    #[test]
    fn test_window_parse() {
        assert_eq!("Month".parse::<MaturityWindow>().unwrap(), MaturityWindow::Month);
        assert!("decade".parse::<MaturityWindow>().is_err());
    }

    #[test]
    fn test_requires_funds() {
        let none: [&str; 0] = [];
        assert!(maturity_report(&rows(), &none, MaturityWindow::All, d(2024, 1, 1)).is_err());
    }
}
