//! Domain types for bond analytics.
//!
//! - [`Date`]: Calendar date with month arithmetic
//! - [`Frequency`]: Coupon payments per year
//! - [`CashFlow`]: Dated payment positioned on the year axis
//! - [`CashFlowSchedule`]: Ordered future payments from a settlement date

mod cashflow;
mod date;
mod frequency;

pub use cashflow::{CashFlow, CashFlowSchedule, CashFlowType};
pub use date::Date;
pub use frequency::Frequency;
