//! Core types for portfolio analytics.

mod config;
mod row;
mod skip;

pub use config::{AnalyticsConfig, TermSource};
pub use row::{convert_currency, FundPosition, PortfolioRow};
pub use skip::{SkipReason, SkippedRow};
