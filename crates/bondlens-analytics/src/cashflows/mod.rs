//! Cash flow schedule generation.
//!
//! - [`build_schedule`]: coupon-date schedule with an actual-day first period
//! - [`whole_period_schedule`]: rounded whole-period approximation
//! - [`ScheduleMethod`]: selects between the two at the portfolio layer

mod schedule;
mod whole_period;

pub use schedule::{build_schedule, next_coupon_date, previous_coupon_date};
pub use whole_period::{calendar_tenor_years, whole_period_schedule};

use bondlens_core::types::{CashFlowSchedule, Date};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bond::BondTerms;
use crate::error::AnalyticsResult;

/// Which schedule builder to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMethod {
    /// Maturity-anchored coupon dates, actual-day first period.
    #[default]
    CouponDates,
    /// Tenor rounded to whole periods.
    WholePeriods,
}

impl ScheduleMethod {
    /// Builds a schedule with this method.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidSchedule` if settlement is after maturity.
    pub fn build(self, settlement: Date, terms: &BondTerms) -> AnalyticsResult<CashFlowSchedule> {
        match self {
            ScheduleMethod::CouponDates => build_schedule(settlement, terms),
            ScheduleMethod::WholePeriods => whole_period_schedule(settlement, terms),
        }
    }
}

impl fmt::Display for ScheduleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleMethod::CouponDates => write!(f, "coupon_dates"),
            ScheduleMethod::WholePeriods => write!(f, "whole_periods"),
        }
    }
}
