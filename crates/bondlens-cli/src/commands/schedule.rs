//! Schedule command implementation.
//!
//! Prints the remaining cash flows of a single bond.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::commands::{BondArgs, Context};
use crate::output::{print_header, print_output};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub bond: BondArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time (yrs)")]
    time_years: String,
    #[tabled(rename = "Coupon")]
    coupon: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, ctx: &Context) -> Result<()> {
    let (terms, settlement) = args.bond.terms()?;
    let schedule = args.bond.method().build(settlement, &terms)?;
    debug!(payments = schedule.len(), %settlement, "built schedule");

    if ctx.format == OutputFormat::Json {
        return crate::output::print_json(&schedule.as_slice());
    }

    let precision = ctx.precision();
    let rows: Vec<ScheduleRow> = schedule
        .iter()
        .map(|cf| ScheduleRow {
            date: cf.date().to_string(),
            time_years: format!("{:.precision$}", cf.time_years()),
            coupon: format!("{:.precision$}", cf.coupon_amount()),
            principal: format!("{:.precision$}", cf.principal_amount()),
            total: format!("{:.precision$}", cf.amount()),
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header(&format!(
            "Cash Flows after {settlement} ({} remaining)",
            rows.len()
        ));
    }
    print_output(&rows, ctx.format)
}
