//! # Bondlens Ext File
//!
//! CSV ingestion of bond holdings for bondlens.
//!
//! One row per bond, with term columns and one face column per fund:
//! - `Maturity_Date`, `Coupon`, `YTM`, `Coupon_Freq` (required)
//! - `Issue_Date`, `Remaining_Term_Yrs`, `ISIN`, `Reference`, `Issuer` (optional)
//! - `Face_Amount_<FUND>` or `<FUND>_Outstanding`, with an optional
//!   `Settlement_Amount_<FUND>`
//!
//! Header matching ignores case. Unparseable cells load as missing fields and
//! are reported later as skipped rows; only structural problems fail the load.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cell;
mod columns;
mod error;
mod portfolio;

pub use error::{FileError, FileResult};
pub use portfolio::{load_portfolio_csv, read_portfolio, LoadOptions, LoadedPortfolio};
