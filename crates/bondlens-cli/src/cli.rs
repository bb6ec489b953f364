//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{
    AnalyzeArgs, ConfigArgs, FundArgs, LadderArgs, MaturitiesArgs, ScheduleArgs, StatsArgs,
    StressArgs,
};

/// Bondlens - duration, convexity and weighted averages for bond funds
#[derive(Parser)]
#[command(name = "bondlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format [default: table, or `format` from the config file]
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file
    #[arg(long, global = true, env = "BONDLENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the remaining cash flow schedule of a single bond
    Schedule(ScheduleArgs),

    /// Price a single bond and compute durations and convexity
    Analyze(AnalyzeArgs),

    /// Summarize one fund from a holdings file
    Fund(FundArgs),

    /// Weighted statistics for every fund in a holdings file
    Stats(StatsArgs),

    /// Parallel rate shocks on a fund's duration and convexity
    Stress(StressArgs),

    /// Holdings maturing this month, this year, or at any future date
    Maturities(MaturitiesArgs),

    /// Monthly coupon and principal receipts
    Ladder(LadderArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (key figures only)
    Minimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bondlens",
            "stats",
            "book.csv",
            "--settlement",
            "2023-01-01",
            "-vv",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Stats(_)));
    }
}
