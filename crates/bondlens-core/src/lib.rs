//! # Bondlens Core
//!
//! Foundational types shared by every bondlens crate:
//!
//! - **Types**: [`Date`], [`Frequency`], [`CashFlow`] and [`CashFlowSchedule`]
//! - **Day Count Conventions**: ACT/360, ACT/365 and 30/360 year fractions
//! - **Errors**: [`CoreError`] for invalid dates and frequencies
//!
//! ## Example
//!
//! ```rust
//! use bondlens_core::prelude::*;
//!
//! let maturity = Date::from_ymd(2030, 8, 31).unwrap();
//! let frequency = Frequency::new(2).unwrap();
//! let previous = maturity.add_months(-(frequency.months_per_period() as i32)).unwrap();
//! assert_eq!(previous, Date::from_ymd(2030, 2, 28).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{CashFlow, CashFlowSchedule, CashFlowType, Date, Frequency};
}

// Re-export commonly used types at crate root
pub use daycounts::DayCountConvention;
pub use error::{CoreError, CoreResult};
pub use types::{CashFlow, CashFlowSchedule, CashFlowType, Date, Frequency};
