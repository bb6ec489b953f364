//! Header resolution for the holdings sheet.

use csv::StringRecord;

use crate::error::{FileError, FileResult};

const FACE_PREFIX: &str = "face_amount_";
const OUTSTANDING_SUFFIX: &str = "_outstanding";
const SETTLEMENT_PREFIX: &str = "settlement_amount_";

/// Face and settlement column indexes for one fund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FundColumns {
    /// Fund name as written in the header.
    pub name: String,
    /// `Face_Amount_<FUND>` or `<FUND>_Outstanding`.
    pub face: usize,
    /// `Settlement_Amount_<FUND>`, if present.
    pub settlement: Option<usize>,
}

/// Column indexes resolved from a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub maturity: usize,
    pub coupon: usize,
    pub ytm: usize,
    pub frequency: usize,
    pub issue: usize,
    pub remaining_term: Option<usize>,
    pub isin: Option<usize>,
    pub reference: Option<usize>,
    pub issuer: Option<usize>,
    pub funds: Vec<FundColumns>,
}

fn normalize(header: &str) -> String {
    header.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

fn find(headers: &[String], names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
}

fn require(headers: &[String], names: &[&str]) -> FileResult<usize> {
    find(headers, names).ok_or_else(|| FileError::missing_column(names.join(" or ")))
}

/// Fund name carried by a face column header, in its original spelling.
fn face_fund(raw: &str, normalized: &str) -> Option<String> {
    let raw = raw.trim().trim_start_matches('\u{feff}');
    let name = if normalized.starts_with(FACE_PREFIX) {
        &raw[FACE_PREFIX.len()..]
    } else if normalized.ends_with(OUTSTANDING_SUFFIX) {
        &raw[..raw.len() - OUTSTANDING_SUFFIX.len()]
    } else {
        return None;
    };
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

impl ColumnMap {
    /// Resolves required and optional columns.
    ///
    /// # Errors
    ///
    /// Returns `FileError::MissingColumn` for an absent required column or
    /// when no fund face column exists.
    pub fn from_headers(record: &StringRecord) -> FileResult<Self> {
        let headers: Vec<String> = record.iter().map(normalize).collect();

        let maturity = require(&headers, &["Maturity_Date"])?;
        let coupon = require(&headers, &["Coupon"])?;
        let ytm = require(&headers, &["YTM"])?;
        let frequency = require(&headers, &["Coupon_Freq", "Interest_Payment_Schedule"])?;
        let issue = require(&headers, &["Issue_Date", "Issue_Value_Date"])?;

        let mut funds: Vec<FundColumns> = Vec::new();
        for (index, raw) in record.iter().enumerate() {
            let Some(name) = face_fund(raw, &headers[index]) else {
                continue;
            };
            if funds.iter().any(|f| f.name.eq_ignore_ascii_case(&name)) {
                continue;
            }
            let settlement_header = format!("{SETTLEMENT_PREFIX}{}", name.to_ascii_lowercase());
            funds.push(FundColumns {
                settlement: headers.iter().position(|h| *h == settlement_header),
                name,
                face: index,
            });
        }
        if funds.is_empty() {
            return Err(FileError::missing_column(
                "Face_Amount_<FUND> or <FUND>_Outstanding",
            ));
        }

        Ok(Self {
            maturity,
            coupon,
            ytm,
            frequency,
            issue,
            remaining_term: find(&headers, &["Remaining_Term_Yrs"]),
            isin: find(&headers, &["ISIN"]),
            reference: find(&headers, &["Reference"]),
            issuer: find(&headers, &["Issuer"]),
            funds,
        })
    }

    /// Fund names in header order.
    pub fn fund_names(&self) -> Vec<String> {
        self.funds.iter().map(|f| f.name.clone()).collect()
    }
}
