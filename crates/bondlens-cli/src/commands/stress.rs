//! Stress command implementation.
//!
//! Applies parallel rate shocks to a fund's weighted modified duration and
//! convexity.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondlens_portfolio::{fund_summary_with_config, run_stress, FundSummary, RateShock, StressResult};

use crate::cli::OutputFormat;
use crate::commands::fund::report_skipped;
use crate::commands::{date_or_today, select_funds, AnalyticsArgs, Context, HoldingsArgs};
use crate::output::{fmt_opt, fmt_pct, print_header, print_json, print_output};

/// Arguments for the stress command.
#[derive(Args, Debug)]
pub struct StressArgs {
    #[command(flatten)]
    pub holdings: HoldingsArgs,

    /// Fund to stress. Defaults to the first configured or detected fund.
    #[arg(long)]
    pub fund: Option<String>,

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,

    /// Fund ROI (as percentage) carried through each scenario
    #[arg(long, allow_hyphen_values = true)]
    pub roi: Option<f64>,

    /// Shifts in basis points, e.g. -50,-25,25,50
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub shock_bps: Vec<f64>,

    #[command(flatten)]
    pub analytics: AnalyticsArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct StressRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Shift (bp)")]
    shift_bps: f64,
    #[tabled(rename = "Price Change")]
    price_change: String,
    #[tabled(rename = "ROI Before")]
    roi_before: String,
    #[tabled(rename = "ROI After")]
    roi_after: String,
}

#[derive(Debug, Serialize)]
struct StressReport<'a> {
    fund: &'a str,
    modified_duration: Option<f64>,
    convexity: Option<f64>,
    results: &'a [StressResult],
}

fn pct_or_na(value: Option<f64>, p: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| fmt_pct(v, p))
}

/// Execute the stress command.
pub fn execute(args: StressArgs, ctx: &Context) -> Result<()> {
    let loaded = args.holdings.load(ctx)?;
    let requested: Vec<String> = args.fund.into_iter().collect();
    let fund = select_funds(&requested, ctx, &loaded)?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("No fund columns found"))?;
    let settlement = date_or_today(args.settlement.as_deref())?;
    let config = args.analytics.config(ctx);

    let summary: FundSummary = fund_summary_with_config(&loaded.rows, &fund, settlement, &config)?;
    report_skipped(ctx, &fund, &summary.skipped);

    let shifts = if args.shock_bps.is_empty() {
        ctx.config.stress.shocks_bps.clone()
    } else {
        args.shock_bps
    };
    let shocks: Vec<RateShock> = shifts.into_iter().map(RateShock::parallel).collect();
    let roi = args.roi.or(ctx.config.stress.roi).map(|r| r / 100.0);

    let results = run_stress(&summary, &shocks, roi);
    if results.is_empty() {
        ctx.warn(&format!("{fund}: no holdings with duration data, nothing to stress"));
    }

    let p = ctx.precision();
    if ctx.format == OutputFormat::Json {
        return print_json(&StressReport {
            fund: &fund,
            modified_duration: summary.modified_duration,
            convexity: summary.convexity,
            results: &results,
        });
    }

    let rows: Vec<StressRow> = results
        .iter()
        .map(|r| StressRow {
            scenario: r.scenario_name.clone(),
            shift_bps: r.shift_bps,
            price_change: fmt_pct(r.price_change, p),
            roi_before: pct_or_na(r.roi_before, p),
            roi_after: pct_or_na(r.roi_after, p),
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header(&format!(
            "Rate Shocks for {fund} (modified duration {}, convexity {})",
            fmt_opt(summary.modified_duration, p),
            fmt_opt(summary.convexity, p)
        ));
    }
    print_output(&rows, ctx.format)
}
