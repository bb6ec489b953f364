//! # Bondlens Portfolio
//!
//! Fund-level analytics over rows of bond holdings.
//!
//! A [`PortfolioRow`] carries one bond's terms as they arrived from
//! ingestion plus the face and settlement amounts each fund holds. For a
//! chosen fund and settlement date, [`fund_summary`] computes per-bond
//! duration and convexity and reduces them to face-weighted statistics.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: settlement date and rows are explicit inputs
//! - **Explicit validation**: rows with missing or invalid terms are skipped
//!   and recorded instead of propagating NaN into the averages
//! - **Config-driven parallelism**: optional rayon support with
//!   threshold-based switching; reductions stay sequential
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bondlens_portfolio::prelude::*;
//!
//! let summary = fund_summary(&rows, "SSS", settlement)?;
//! println!("WAIR {:.4}%  WAT {:.2}y", summary.wair_pct.unwrap_or(0.0), summary.wat_years.unwrap_or(0.0));
//!
//! for result in run_stress(&summary, &RateShock::standard(), Some(0.06)) {
//!     println!("{}: {:+.4}%", result.scenario_name, result.price_change_pct());
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Per-holding metrics, weighted averages, fund summaries
//! - [`bucketing`] - Remaining-term buckets
//! - [`projection`] - Maturity reports and monthly cash flow ladders
//! - [`stress`] - Parallel rate shocks
//! - [`types`] - Rows, positions, skip records and configuration
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based per-row processing for large portfolios

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod bucketing;
pub mod error;
pub mod projection;
pub mod stress;
pub mod types;

pub use error::{PortfolioError, PortfolioResult};

pub use types::{
    convert_currency, AnalyticsConfig, FundPosition, PortfolioRow, SkipReason, SkippedRow,
    TermSource,
};

pub use analytics::{
    analyze_holding, fund_summaries, fund_summary, fund_summary_with_config, weighted_average,
    FundHolding, FundSummary, WeightedSum,
};

pub use bucketing::{bucket_by_maturity, BucketMetrics, MaturityBucket, MaturityDistribution};

pub use projection::{
    cashflow_ladder, maturity_report, CashflowLadder, MaturityEntry, MaturityReport,
    MaturityWindow, MonthlyCashflow,
};

pub use stress::{run_stress, RateShock, StressResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        fund_summaries, fund_summary, fund_summary_with_config, weighted_average, FundHolding,
        FundSummary,
    };
    pub use crate::bucketing::{bucket_by_maturity, MaturityBucket};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::projection::{cashflow_ladder, maturity_report, MaturityWindow};
    pub use crate::stress::{run_stress, RateShock, StressResult};
    pub use crate::types::{AnalyticsConfig, PortfolioRow, SkipReason, SkippedRow, TermSource};
}
