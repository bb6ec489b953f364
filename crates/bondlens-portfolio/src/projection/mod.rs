//! Calendar projections: maturity reports and monthly cash flow ladders.

mod ladder;
mod maturities;

pub use ladder::{cashflow_ladder, CashflowLadder, MonthlyCashflow};
pub use maturities::{maturity_report, MaturityEntry, MaturityReport, MaturityWindow};
