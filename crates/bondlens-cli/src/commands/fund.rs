//! Fund command implementation.
//!
//! Prints one fund's weighted statistics and its holdings.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondlens_portfolio::{fund_summary_with_config, FundSummary, SkippedRow};

use crate::cli::OutputFormat;
use crate::commands::{date_or_today, select_funds, AnalyticsArgs, Context, HoldingsArgs};
use crate::output::{fmt_amount, fmt_f64, fmt_opt, print_header, print_json, print_output, KeyValue};

/// Arguments for the fund command.
#[derive(Args, Debug)]
pub struct FundArgs {
    #[command(flatten)]
    pub holdings: HoldingsArgs,

    /// Fund to summarize. Defaults to the first configured or detected fund.
    #[arg(long)]
    pub fund: Option<String>,

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,

    #[command(flatten)]
    pub analytics: AnalyticsArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct HoldingRow {
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Maturity")]
    maturity: String,
    #[tabled(rename = "Face")]
    face: String,
    #[tabled(rename = "Coupon %")]
    coupon_pct: String,
    #[tabled(rename = "YTM %")]
    ytm_pct: String,
    #[tabled(rename = "Term (yrs)")]
    term_years: String,
    #[tabled(rename = "Mac Dur")]
    macaulay: String,
    #[tabled(rename = "Mod Dur")]
    modified: String,
    #[tabled(rename = "Convexity")]
    convexity: String,
}

/// Headline figures of a summary.
pub(crate) fn summary_table(summary: &FundSummary, p: usize) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Fund", summary.fund.clone()),
        KeyValue::new("Settlement", summary.settlement_date.to_string()),
        KeyValue::new("Holdings", summary.holding_count().to_string()),
        KeyValue::new("Skipped", summary.skipped_count().to_string()),
        KeyValue::new("Face Amount", fmt_amount(summary.total_face_amount)),
        KeyValue::new("Settlement Amount", fmt_amount(summary.total_settlement_amount)),
        KeyValue::new("WAIR %", fmt_opt(summary.wair_pct, p)),
        KeyValue::new("WAT (yrs)", fmt_opt(summary.wat_years, p)),
        KeyValue::new("WAYTM %", fmt_opt(summary.waytm_pct, p)),
        KeyValue::new("Macaulay Duration", fmt_opt(summary.macaulay_duration, p)),
        KeyValue::new("Modified Duration", fmt_opt(summary.modified_duration, p)),
        KeyValue::new("Convexity", fmt_opt(summary.convexity, p)),
    ]
}

/// Reports skipped rows on stderr.
pub(crate) fn report_skipped(ctx: &Context, label: &str, skipped: &[SkippedRow]) {
    if skipped.is_empty() {
        return;
    }
    ctx.warn(&format!("{label}: {} row(s) skipped", skipped.len()));
    for row in skipped {
        ctx.warn(&format!("  {row}"));
    }
}

/// Execute the fund command.
pub fn execute(args: FundArgs, ctx: &Context) -> Result<()> {
    let loaded = args.holdings.load(ctx)?;
    let requested: Vec<String> = args.fund.into_iter().collect();
    let fund = select_funds(&requested, ctx, &loaded)?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("No fund columns found"))?;
    let settlement = date_or_today(args.settlement.as_deref())?;
    let config = args.analytics.config(ctx);

    let summary = fund_summary_with_config(&loaded.rows, &fund, settlement, &config)?;
    report_skipped(ctx, &fund, &summary.skipped);

    let p = ctx.precision();
    match ctx.format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Minimal => {
            println!(
                "WAIR: {}, WAT: {}, WAYTM: {}, Modified: {}, Convexity: {}",
                fmt_opt(summary.wair_pct, p),
                fmt_opt(summary.wat_years, p),
                fmt_opt(summary.waytm_pct, p),
                fmt_opt(summary.modified_duration, p),
                fmt_opt(summary.convexity, p)
            );
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<HoldingRow> = summary
                .holdings
                .iter()
                .map(|h| HoldingRow {
                    reference: h.reference.clone(),
                    maturity: h.maturity_date.to_string(),
                    face: fmt_amount(h.face_amount),
                    coupon_pct: fmt_f64(h.coupon_rate * 100.0, p),
                    ytm_pct: fmt_f64(h.ytm * 100.0, p),
                    term_years: fmt_f64(h.remaining_term_years, p),
                    macaulay: fmt_f64(h.metrics.macaulay_duration, p),
                    modified: fmt_f64(h.metrics.modified_duration, p),
                    convexity: fmt_f64(h.metrics.convexity, p),
                })
                .collect();

            if ctx.format == OutputFormat::Csv {
                return print_output(&rows, ctx.format);
            }
            print_header(&format!("Fund {fund}"));
            print_output(&summary_table(&summary, p), ctx.format)?;
            print_header("Holdings");
            print_output(&rows, ctx.format)?;
        }
    }

    Ok(())
}
