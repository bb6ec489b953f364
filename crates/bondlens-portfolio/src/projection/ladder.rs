//! Month-by-month projection of coupon and principal receipts.

use bondlens_analytics::build_schedule;
use bondlens_core::types::{CashFlow, Date};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::analytics::parallel::maybe_parallel_filter_map;
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{AnalyticsConfig, PortfolioRow, SkipReason, SkippedRow};

/// Receipts falling in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashflow {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Coupon receipts.
    pub coupon: f64,
    /// Principal redemptions.
    pub principal: f64,
    /// Running coupon total up to and including this month.
    pub cumulative_coupon: f64,
    /// Running principal total up to and including this month.
    pub cumulative_principal: f64,
}

impl MonthlyCashflow {
    /// Coupon plus principal for the month.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.coupon + self.principal
    }

    /// Running total of all receipts.
    #[must_use]
    pub fn cumulative_total(&self) -> f64 {
        self.cumulative_coupon + self.cumulative_principal
    }

    /// `YYYY-MM` label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Monthly receipts for a set of funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowLadder {
    /// Settlement date the projection starts after.
    pub settlement_date: Date,
    /// Funds whose face amounts were summed.
    pub funds: Vec<String>,
    /// Months with at least one receipt, earliest first.
    pub months: Vec<MonthlyCashflow>,
    /// Held rows that could not be scheduled.
    pub skipped: Vec<SkippedRow>,
}

impl CashflowLadder {
    /// Total coupon receipts.
    #[must_use]
    pub fn total_coupon(&self) -> f64 {
        self.months.last().map_or(0.0, |m| m.cumulative_coupon)
    }

    /// Total principal redemptions.
    #[must_use]
    pub fn total_principal(&self) -> f64 {
        self.months.last().map_or(0.0, |m| m.cumulative_principal)
    }
}

fn project_row<S: AsRef<str>>(
    row: &PortfolioRow,
    funds: &[S],
    settlement: Date,
) -> Option<Result<Vec<CashFlow>, SkippedRow>> {
    let face: Decimal = funds
        .iter()
        .map(|f| row.face_amount(f.as_ref()))
        .filter(|amount| *amount > Decimal::ZERO)
        .sum();
    if face <= Decimal::ZERO {
        return None;
    }

    let projected = row
        .terms()
        .and_then(|terms| build_schedule(settlement, &terms).map_err(SkipReason::from))
        .map(|schedule| {
            let scale = face.to_f64().unwrap_or(0.0);
            schedule.iter().map(|cf| cf.scaled(scale)).collect()
        });
    Some(projected.map_err(|reason| SkippedRow::new(row.reference.clone(), reason)))
}

/// Projects every row held by `funds` and buckets the receipts by month.
///
/// Each row's per-unit schedule is scaled by its face amount summed over the
/// selected funds. Payments are those strictly after `settlement`.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidInput` if `funds` is empty.
pub fn cashflow_ladder<S: AsRef<str> + Sync>(
    rows: &[PortfolioRow],
    funds: &[S],
    settlement: Date,
    config: &AnalyticsConfig,
) -> PortfolioResult<CashflowLadder> {
    if funds.is_empty() {
        return Err(PortfolioError::invalid_input("no funds selected"));
    }

    let projected = maybe_parallel_filter_map(rows, config, |row| {
        project_row(row, funds, settlement)
    });

    let mut by_month: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();
    let mut skipped = Vec::new();
    for result in projected {
        match result {
            Ok(flows) => {
                for cf in flows {
                    let entry = by_month.entry(cf.date().year_month()).or_default();
                    entry.0 += cf.coupon_amount();
                    entry.1 += cf.principal_amount();
                }
            }
            Err(skip) => {
                warn!(reference = %skip.reference, reason = %skip.reason, "row left out of ladder");
                skipped.push(skip);
            }
        }
    }

    let mut cumulative_coupon = 0.0;
    let mut cumulative_principal = 0.0;
    let months: Vec<MonthlyCashflow> = by_month
        .into_iter()
        .map(|((year, month), (coupon, principal))| {
            cumulative_coupon += coupon;
            cumulative_principal += principal;
            MonthlyCashflow {
                year,
                month,
                coupon,
                principal,
                cumulative_coupon,
                cumulative_principal,
            }
        })
        .collect();

    debug!(%settlement, months = months.len(), skipped = skipped.len(), "built cash flow ladder");

    Ok(CashflowLadder {
        settlement_date: settlement,
        funds: funds.iter().map(|f| f.as_ref().to_string()).collect(),
        months,
        skipped,
    })
}
