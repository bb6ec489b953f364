//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod fund;
pub mod ladder;
pub mod maturities;
pub mod schedule;
pub mod stats;
pub mod stress;

pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use fund::FundArgs;
pub use ladder::LadderArgs;
pub use maturities::MaturitiesArgs;
pub use schedule::ScheduleArgs;
pub use stats::StatsArgs;
pub use stress::StressArgs;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use bondlens_analytics::{BondTerms, ScheduleMethod};
use bondlens_core::daycounts::DayCountConvention;
use bondlens_core::types::Date;
use bondlens_ext_file::{load_portfolio_csv, LoadOptions, LoadedPortfolio};
use bondlens_portfolio::{AnalyticsConfig, TermSource};

use crate::cli::OutputFormat;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::print_warning;

/// Settings shared by every command after flags and file are merged.
pub struct Context {
    /// Effective output format.
    pub format: OutputFormat,
    /// Suppress notes on stderr.
    pub quiet: bool,
    /// Loaded configuration.
    pub config: CliConfig,
    /// `--config` value, if given.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Decimal places for ratios.
    pub fn precision(&self) -> usize {
        self.config.precision
    }

    /// Prints a note to stderr unless `--quiet`.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            print_warning(message);
        }
    }
}

/// Parses a date in any of the accepted layouts.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse_flexible(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an optional date, defaulting to today.
pub fn date_or_today(s: Option<&str>) -> CliResult<Date> {
    s.map_or_else(|| Ok(Date::today()), parse_date)
}

/// Validates a coupon rate given in percent.
pub fn validate_coupon(coupon: f64) -> CliResult<f64> {
    if !(0.0..=100.0).contains(&coupon) {
        return Err(CliError::InvalidCoupon(coupon));
    }
    Ok(coupon)
}

/// Validates a yield given in percent.
pub fn validate_yield(yield_value: f64) -> CliResult<f64> {
    if !(-10.0..=100.0).contains(&yield_value) {
        return Err(CliError::InvalidYield(yield_value));
    }
    Ok(yield_value)
}

/// Single bond definition shared by `schedule` and `analyze`.
#[derive(Args, Debug)]
pub struct BondArgs {
    /// Annual coupon rate (as percentage, e.g., 6.0 for 6%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Maturity date (YYYY-MM-DD)
    #[arg(short, long)]
    pub maturity: String,

    /// Issue date (YYYY-MM-DD). Defaults to 10 years before maturity, or the
    /// settlement date if that is earlier.
    #[arg(short, long)]
    pub issue: Option<String>,

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,

    /// Coupon payments per year (1, 2, 3, 4, 6 or 12)
    #[arg(long, default_value = "2")]
    pub frequency: i64,

    /// Face value. Defaults to 100 so amounts and price read per 100 of par
    #[arg(long, default_value = "100")]
    pub face: Decimal,

    /// Round the tenor to whole periods instead of walking coupon dates
    #[arg(long)]
    pub whole_periods: bool,
}

impl BondArgs {
    /// Validated terms and settlement date.
    pub fn terms(&self) -> Result<(BondTerms, Date)> {
        let coupon = validate_coupon(self.coupon)?;
        let maturity = parse_date(&self.maturity)?;
        let settlement = date_or_today(self.settlement.as_deref())?;
        let issue = match &self.issue {
            Some(s) => parse_date(s)?,
            None => maturity.add_months(-120)?.min(settlement),
        };
        let coupon_rate = Decimal::from_f64(coupon / 100.0)
            .ok_or_else(|| anyhow::anyhow!("Invalid coupon: {coupon}"))?;

        let terms = BondTerms::builder()
            .issue_date(issue)
            .maturity_date(maturity)
            .coupon_rate(coupon_rate)
            .periods_per_year(self.frequency)
            .face_value(self.face)
            .build()?;
        Ok((terms, settlement))
    }

    /// Schedule builder selected by `--whole-periods`.
    pub fn method(&self) -> ScheduleMethod {
        if self.whole_periods {
            ScheduleMethod::WholePeriods
        } else {
            ScheduleMethod::CouponDates
        }
    }
}

/// Holdings file options shared by the portfolio commands.
#[derive(Args, Debug)]
pub struct HoldingsArgs {
    /// Holdings CSV file
    pub file: PathBuf,

    /// Multiply face and settlement amounts by this FX rate
    #[arg(long)]
    pub fx_rate: Option<Decimal>,

    /// Day count for computed remaining terms (ACT/360, ACT/365, 30/360)
    #[arg(long)]
    pub day_count: Option<DayCountConvention>,
}

impl HoldingsArgs {
    /// Loads the file with flags taking precedence over the configuration.
    pub fn load(&self, ctx: &Context) -> Result<LoadedPortfolio> {
        let mut options =
            LoadOptions::default().with_day_count(self.day_count.unwrap_or(ctx.config.day_count));
        if let Some(rate) = self.fx_rate.or(ctx.config.fx_rate) {
            options = options.with_fx_rate(rate);
        }
        Ok(load_portfolio_csv(&self.file, &options)?)
    }
}

/// Per-bond analytics overrides shared by the fund-level commands.
#[derive(Args, Debug)]
pub struct AnalyticsArgs {
    /// Always compute remaining term from the maturity date
    #[arg(long)]
    pub computed_terms: bool,

    /// Round tenors to whole periods instead of walking coupon dates
    #[arg(long)]
    pub whole_periods: bool,
}

impl AnalyticsArgs {
    /// Configuration from the file with flag overrides applied.
    pub fn config(&self, ctx: &Context) -> AnalyticsConfig {
        let mut config = ctx.config.analytics.clone();
        if self.computed_terms {
            config = config.with_term_source(TermSource::Computed);
        }
        if self.whole_periods {
            config = config.with_schedule_method(ScheduleMethod::WholePeriods);
        }
        config
    }
}

/// Resolves requested fund names against the file.
///
/// Falls back to the configured funds, then to every fund in the file.
/// Matching ignores case and returns the file's spelling.
pub fn select_funds(
    requested: &[String],
    ctx: &Context,
    loaded: &LoadedPortfolio,
) -> CliResult<Vec<String>> {
    let wanted = if !requested.is_empty() {
        requested
    } else if !ctx.config.funds.is_empty() {
        ctx.config.funds.as_slice()
    } else {
        return Ok(loaded.funds.clone());
    };

    wanted
        .iter()
        .map(|fund| {
            loaded
                .funds
                .iter()
                .find(|f| f.eq_ignore_ascii_case(fund))
                .cloned()
                .ok_or_else(|| CliError::UnknownFund {
                    fund: fund.clone(),
                    available: loaded.funds.join(", "),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(funds: &[&str]) -> Context {
        let mut config = CliConfig::default();
        config.funds = funds.iter().map(|f| f.to_string()).collect();
        Context {
            format: OutputFormat::Table,
            quiet: true,
            config,
            config_path: None,
        }
    }

    fn loaded() -> LoadedPortfolio {
        LoadedPortfolio {
            rows: Vec::new(),
            funds: vec!["SSS".into(), "EC".into(), "MPF".into()],
        }
    }

    #[test]
    fn test_select_funds() {
        let all = select_funds(&[], &context(&[]), &loaded()).unwrap();
        assert_eq!(all, vec!["SSS", "EC", "MPF"]);

        let configured = select_funds(&[], &context(&["mpf"]), &loaded()).unwrap();
        assert_eq!(configured, vec!["MPF"]);

        let requested = select_funds(&["ec".into()], &context(&["MPF"]), &loaded()).unwrap();
        assert_eq!(requested, vec!["EC"]);

        let err = select_funds(&["GSIS".into()], &context(&[]), &loaded()).unwrap_err();
        assert!(matches!(err, CliError::UnknownFund { .. }));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2023-01-01").unwrap(),
            Date::from_ymd(2023, 1, 1).unwrap()
        );
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_bond_args_default_issue() {
        let args = BondArgs {
            coupon: 6.0,
            maturity: "2025-01-01".into(),
            issue: None,
            settlement: Some("2023-01-01".into()),
            frequency: 2,
            face: Decimal::ONE_HUNDRED,
            whole_periods: false,
        };
        let (terms, settlement) = args.terms().unwrap();
        assert_eq!(terms.issue_date(), Date::from_ymd(2015, 1, 1).unwrap());
        assert_eq!(settlement, Date::from_ymd(2023, 1, 1).unwrap());
        assert_eq!(args.method(), ScheduleMethod::CouponDates);
    }

    #[test]
    fn test_bond_args_default_issue_not_after_settlement() {
        let args = BondArgs {
            coupon: 5.0,
            maturity: "2045-01-01".into(),
            issue: None,
            settlement: Some("2026-03-01".into()),
            frequency: 2,
            face: Decimal::ONE_HUNDRED,
            whole_periods: false,
        };
        let (terms, settlement) = args.terms().unwrap();
        assert_eq!(terms.issue_date(), settlement);

        let schedule = bondlens_analytics::build_schedule(settlement, &terms).unwrap();
        assert_eq!(schedule.settlement(), settlement);
        assert_eq!(schedule.len(), 38);
    }

    #[test]
    fn test_face_defaults_to_one_hundred() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            bond: BondArgs,
        }

        let wrapper =
            Wrapper::try_parse_from(["bondlens", "--coupon", "6", "--maturity", "2030-01-01"])
                .unwrap();
        assert_eq!(wrapper.bond.face, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_bond_args_rejects_bad_frequency() {
        let args = BondArgs {
            coupon: 6.0,
            maturity: "2025-01-01".into(),
            issue: None,
            settlement: Some("2023-01-01".into()),
            frequency: 5,
            face: Decimal::ONE_HUNDRED,
            whole_periods: false,
        };
        assert!(args.terms().is_err());
    }
}
