//! # Bondlens Analytics
//!
//! Bond cash-flow scheduling and yield sensitivity:
//!
//! - **Terms**: [`BondTerms`], validated static data for one bond
//! - **Cash Flows**: [`build_schedule`] turns terms and a settlement date into
//!   the remaining coupon and principal payments
//! - **Risk**: Macaulay/modified duration, convexity and scenario re-pricing
//!
//! All functions are pure: settlement date, yield and terms are explicit
//! inputs and nothing is cached.
//!
//! ## Usage
//!
//! ```rust
//! use bondlens_analytics::prelude::*;
//! use bondlens_core::types::{Date, Frequency};
//! use rust_decimal_macros::dec;
//!
//! let terms = BondTerms::builder()
//!     .issue_date(Date::from_ymd(2020, 1, 1).unwrap())
//!     .maturity_date(Date::from_ymd(2025, 1, 1).unwrap())
//!     .coupon_rate(dec!(0.06))
//!     .frequency(Frequency::SEMI_ANNUAL)
//!     .build()
//!     .unwrap();
//!
//! let settlement = Date::from_ymd(2023, 1, 1).unwrap();
//! let schedule = build_schedule(settlement, &terms).unwrap();
//! let mac = macaulay_duration(&schedule, 0.05, Frequency::SEMI_ANNUAL).unwrap();
//! let md = modified_duration(mac, 0.05, Frequency::SEMI_ANNUAL);
//! let c = convexity(&schedule, 0.05, Frequency::SEMI_ANNUAL).unwrap();
//!
//! let rally = scenario_price_change(md, c, -0.0025);
//! assert!(rally > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bond;
pub mod cashflows;
pub mod error;
pub mod risk;

pub use bond::{BondTerms, BondTermsBuilder};
pub use cashflows::{
    build_schedule, next_coupon_date, previous_coupon_date, whole_period_schedule, ScheduleMethod,
};
pub use error::{AnalyticsError, AnalyticsResult};
pub use risk::{
    analyze_bond, analyze_bond_with, analyze_schedule, bps_to_decimal, convexity, macaulay_duration,
    modified_duration, present_value, scenario_price_change, BondRiskMetrics,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{BondTerms, BondTermsBuilder};
    pub use crate::cashflows::{build_schedule, whole_period_schedule, ScheduleMethod};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::risk::{
        analyze_bond, convexity, macaulay_duration, modified_duration, present_value,
        scenario_price_change, BondRiskMetrics,
    };
}
