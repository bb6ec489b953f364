//! Analyze command implementation.
//!
//! Calculates price, durations and convexity for a single bond.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondlens_analytics::{analyze_bond_with, bps_to_decimal, BondRiskMetrics};
use bondlens_core::types::Date;

use crate::cli::OutputFormat;
use crate::commands::{validate_yield, BondArgs, Context};
use crate::output::{fmt_f64, fmt_pct, print_header, print_json, print_output, KeyValue};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Yield to maturity (as percentage). Defaults to the coupon rate.
    #[arg(short, long = "yield")]
    pub yield_value: Option<f64>,

    /// Yield shifts in basis points to estimate price changes for
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub shock_bps: Vec<f64>,
}

#[derive(Debug, Serialize, Tabled)]
struct ShockRow {
    #[tabled(rename = "Shift (bp)")]
    shift_bps: f64,
    #[tabled(rename = "Price Change")]
    price_change: String,
}

#[derive(Debug, Serialize)]
struct ShockEstimate {
    shift_bps: f64,
    price_change: f64,
}

#[derive(Debug, Serialize)]
struct AnalyzeReport {
    settlement: Date,
    maturity: Date,
    coupon_pct: f64,
    yield_pct: f64,
    #[serde(flatten)]
    metrics: BondRiskMetrics,
    shocks: Vec<ShockEstimate>,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let (terms, settlement) = args.bond.terms()?;
    let yield_pct = match args.yield_value {
        Some(y) => validate_yield(y)?,
        None => args.bond.coupon,
    };
    let metrics = analyze_bond_with(settlement, &terms, yield_pct / 100.0, args.bond.method())?;

    let shocks: Vec<ShockEstimate> = args
        .shock_bps
        .iter()
        .map(|&shift_bps| ShockEstimate {
            shift_bps,
            price_change: metrics.price_change(bps_to_decimal(shift_bps)),
        })
        .collect();

    let p = ctx.precision();
    match ctx.format {
        OutputFormat::Json => {
            let report = AnalyzeReport {
                settlement,
                maturity: terms.maturity_date(),
                coupon_pct: args.bond.coupon,
                yield_pct,
                metrics,
                shocks,
            };
            print_json(&report)?;
        }
        OutputFormat::Minimal => {
            println!(
                "Macaulay: {}, Modified: {}, Convexity: {}",
                fmt_f64(metrics.macaulay_duration, p),
                fmt_f64(metrics.modified_duration, p),
                fmt_f64(metrics.convexity, p)
            );
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let face = terms.face_value_f64();
            let results = vec![
                KeyValue::new("Coupon", format!("{}%", args.bond.coupon)),
                KeyValue::new("Frequency", terms.frequency().to_string()),
                KeyValue::new("Maturity", terms.maturity_date().to_string()),
                KeyValue::new("Settlement", settlement.to_string()),
                KeyValue::new("Yield to Maturity", format!("{yield_pct:.p$}%")),
                KeyValue::new("Price", fmt_f64(metrics.price, p)),
                KeyValue::new("Price (per 100)", fmt_f64(metrics.price / face * 100.0, p)),
                KeyValue::new("Payments Remaining", metrics.cash_flow_count.to_string()),
                KeyValue::new("Time to Maturity", fmt_f64(metrics.time_to_maturity, p)),
                KeyValue::new("Macaulay Duration", fmt_f64(metrics.macaulay_duration, p)),
                KeyValue::new("Modified Duration", fmt_f64(metrics.modified_duration, p)),
                KeyValue::new("Convexity", fmt_f64(metrics.convexity, p)),
            ];

            if ctx.format == OutputFormat::Table {
                print_header("Bond Analytics");
            }
            print_output(&results, ctx.format)?;

            if !shocks.is_empty() && ctx.format == OutputFormat::Table {
                let rows: Vec<ShockRow> = shocks
                    .iter()
                    .map(|s| ShockRow {
                        shift_bps: s.shift_bps,
                        price_change: fmt_pct(s.price_change, p),
                    })
                    .collect();
                print_header("Scenario Price Change");
                print_output(&rows, ctx.format)?;
            }
        }
    }

    Ok(())
}
