//! Bondlens CLI - duration and weighted-average analytics for bond funds.
//!
//! # Usage
//!
//! ```bash
//! # Remaining cash flows of a bond
//! bondlens schedule --coupon 6 --issue 2020-01-01 --maturity 2025-01-01 --settlement 2023-01-01
//!
//! # Durations and convexity, with a 25bp rally estimate
//! bondlens analyze --coupon 6 --maturity 2025-01-01 --yield 5 --shock-bps=-25
//!
//! # Fund statistics from a holdings sheet
//! bondlens stats holdings.csv --settlement 2023-01-01
//! bondlens fund holdings.csv --fund SSS --settlement 2023-01-01
//! bondlens stress holdings.csv --fund SSS --roi 5.5
//! bondlens maturities holdings.csv --window year
//! bondlens ladder holdings.csv --fund SSS --fund EC
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::CliConfig;

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // `config init` may point --config at a file that does not exist yet
    let config = match (&cli.command, cli.config.as_deref()) {
        (Commands::Config(_), Some(path)) if !path.exists() => CliConfig::default(),
        (_, path) => CliConfig::load(path)?,
    };

    let ctx = Context {
        format: cli.format.unwrap_or(config.format),
        quiet: cli.quiet,
        config,
        config_path: cli.config,
    };

    match cli.command {
        Commands::Schedule(args) => commands::schedule::execute(args, &ctx)?,
        Commands::Analyze(args) => commands::analyze::execute(args, &ctx)?,
        Commands::Fund(args) => commands::fund::execute(args, &ctx)?,
        Commands::Stats(args) => commands::stats::execute(args, &ctx)?,
        Commands::Stress(args) => commands::stress::execute(args, &ctx)?,
        Commands::Maturities(args) => commands::maturities::execute(args, &ctx)?,
        Commands::Ladder(args) => commands::ladder::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}
