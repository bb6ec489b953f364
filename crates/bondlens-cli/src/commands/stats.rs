//! Stats command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondlens_portfolio::fund_summaries;

use crate::cli::OutputFormat;
use crate::commands::fund::report_skipped;
use crate::commands::{date_or_today, select_funds, AnalyticsArgs, Context, HoldingsArgs};
use crate::output::{fmt_amount, fmt_opt, print_header, print_json, print_output};

/// Arguments for the stats command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub holdings: HoldingsArgs,

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,

    /// Funds to report (repeatable). Defaults to every fund in the file.
    #[arg(long = "fund")]
    pub funds: Vec<String>,

    #[command(flatten)]
    pub analytics: AnalyticsArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct StatsRow {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Holdings")]
    holdings: usize,
    #[tabled(rename = "Skipped")]
    skipped: usize,
    #[tabled(rename = "Face Amount")]
    face: String,
    #[tabled(rename = "WAIR %")]
    wair: String,
    #[tabled(rename = "WAT (yrs)")]
    wat: String,
    #[tabled(rename = "WAYTM %")]
    waytm: String,
    #[tabled(rename = "Mac Dur")]
    macaulay: String,
    #[tabled(rename = "Mod Dur")]
    modified: String,
    #[tabled(rename = "Convexity")]
    convexity: String,
}

/// Execute the stats command.
pub fn execute(args: StatsArgs, ctx: &Context) -> Result<()> {
    let loaded = args.holdings.load(ctx)?;
    let funds = select_funds(&args.funds, ctx, &loaded)?;
    let settlement = date_or_today(args.settlement.as_deref())?;
    let config = args.analytics.config(ctx);

    let summaries = fund_summaries(&loaded.rows, &funds, settlement, &config)?;
    for summary in &summaries {
        report_skipped(ctx, &summary.fund, &summary.skipped);
    }

    if ctx.format == OutputFormat::Json {
        return print_json(&summaries);
    }

    let p = ctx.precision();
    let rows: Vec<StatsRow> = summaries
        .iter()
        .map(|s| StatsRow {
            fund: s.fund.clone(),
            holdings: s.holding_count(),
            skipped: s.skipped_count(),
            face: fmt_amount(s.total_face_amount),
            wair: fmt_opt(s.wair_pct, p),
            wat: fmt_opt(s.wat_years, p),
            waytm: fmt_opt(s.waytm_pct, p),
            macaulay: fmt_opt(s.macaulay_duration, p),
            modified: fmt_opt(s.modified_duration, p),
            convexity: fmt_opt(s.convexity, p),
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header(&format!("Fund Statistics as of {settlement}"));
    }
    print_output(&rows, ctx.format)
}
