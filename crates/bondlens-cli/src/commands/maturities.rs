//! Maturities command implementation.

use anyhow::Result;
use clap::Args;

use bondlens_portfolio::{maturity_report, MaturityWindow};

use crate::cli::OutputFormat;
use crate::commands::{date_or_today, select_funds, Context, HoldingsArgs};
use crate::output::{fmt_amount, print_grid, print_header, print_json};

/// Arguments for the maturities command.
#[derive(Args, Debug)]
pub struct MaturitiesArgs {
    #[command(flatten)]
    pub holdings: HoldingsArgs,

    /// Reference date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Window: all (maturing on or after the date), month, or year
    #[arg(short, long, default_value = "all")]
    pub window: MaturityWindow,

    /// Funds to include (repeatable). Defaults to every fund in the file.
    #[arg(long = "fund")]
    pub funds: Vec<String>,
}

/// Execute the maturities command.
pub fn execute(args: MaturitiesArgs, ctx: &Context) -> Result<()> {
    let loaded = args.holdings.load(ctx)?;
    let funds = select_funds(&args.funds, ctx, &loaded)?;
    let as_of = date_or_today(args.as_of.as_deref())?;

    let report = maturity_report(&loaded.rows, &funds, args.window, as_of)?;
    if report.skipped > 0 {
        ctx.warn(&format!("{} row(s) without a maturity date", report.skipped));
    }

    if ctx.format == OutputFormat::Json {
        return print_json(&report);
    }

    let mut headers = vec!["Reference".to_string(), "Maturity".to_string()];
    headers.extend(report.funds.iter().cloned());
    headers.push("Total".to_string());

    let mut rows: Vec<Vec<String>> = report
        .entries
        .iter()
        .map(|entry| {
            let mut row = vec![entry.reference.clone(), entry.maturity_date.to_string()];
            row.extend(entry.amounts.iter().copied().map(fmt_amount));
            row.push(fmt_amount(entry.total));
            row
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        if !rows.is_empty() {
            let mut totals = vec!["Total".to_string(), String::new()];
            totals.extend(report.fund_totals.iter().copied().map(fmt_amount));
            totals.push(fmt_amount(report.grand_total));
            rows.push(totals);
        }
        print_header(&format!(
            "Maturities ({} as of {as_of}): {} holding(s)",
            report.window,
            report.entries.len()
        ));
    }
    print_grid(&headers, &rows, ctx.format)
}
