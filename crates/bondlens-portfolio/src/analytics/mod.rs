//! Per-holding analytics and their fund-level aggregation.

pub mod parallel;

mod holding;
mod summary;
mod weighted;

pub use holding::{analyze_holding, FundHolding};
pub use summary::{fund_summaries, fund_summary, fund_summary_with_config, FundSummary};
pub use weighted::{weighted_average, WeightedSum};
