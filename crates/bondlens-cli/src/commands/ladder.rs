//! Ladder command implementation.
//!
//! Projects coupon and principal receipts month by month.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondlens_portfolio::cashflow_ladder;

use crate::cli::OutputFormat;
use crate::commands::fund::report_skipped;
use crate::commands::{date_or_today, select_funds, AnalyticsArgs, Context, HoldingsArgs};
use crate::output::{print_header, print_json, print_output};

/// Arguments for the ladder command.
#[derive(Args, Debug)]
pub struct LadderArgs {
    #[command(flatten)]
    pub holdings: HoldingsArgs,

    /// Settlement date (YYYY-MM-DD). Receipts after this date are projected.
    #[arg(short, long)]
    pub settlement: Option<String>,

    /// Funds to include (repeatable). Defaults to every fund in the file.
    #[arg(long = "fund")]
    pub funds: Vec<String>,

    #[command(flatten)]
    pub analytics: AnalyticsArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct LadderRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Coupon")]
    coupon: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Cum. Coupon")]
    cumulative_coupon: String,
    #[tabled(rename = "Cum. Principal")]
    cumulative_principal: String,
    #[tabled(rename = "Cum. Total")]
    cumulative_total: String,
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Execute the ladder command.
pub fn execute(args: LadderArgs, ctx: &Context) -> Result<()> {
    let loaded = args.holdings.load(ctx)?;
    let funds = select_funds(&args.funds, ctx, &loaded)?;
    let settlement = date_or_today(args.settlement.as_deref())?;
    let config = args.analytics.config(ctx);

    let ladder = cashflow_ladder(&loaded.rows, &funds, settlement, &config)?;
    report_skipped(ctx, &funds.join("+"), &ladder.skipped);

    if ctx.format == OutputFormat::Json {
        return print_json(&ladder);
    }

    let rows: Vec<LadderRow> = ladder
        .months
        .iter()
        .map(|m| LadderRow {
            month: m.label(),
            coupon: money(m.coupon),
            principal: money(m.principal),
            total: money(m.total()),
            cumulative_coupon: money(m.cumulative_coupon),
            cumulative_principal: money(m.cumulative_principal),
            cumulative_total: money(m.cumulative_total()),
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header(&format!(
            "Cash Flow Ladder for {} after {settlement}",
            funds.join(", ")
        ));
    }
    print_output(&rows, ctx.format)
}
