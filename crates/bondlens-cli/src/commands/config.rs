//! Config command implementation.
//!
//! Shows, locates and initialises the TOML configuration file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;
use crate::output::{print_info, print_json, print_success};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file location
    Path,

    /// Write a configuration file with default settings
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

fn config_path(ctx: &Context) -> Result<PathBuf> {
    ctx.config_path
        .clone()
        .or_else(default_config_path)
        .ok_or_else(|| CliError::Config("Could not determine config directory".into()).into())
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
        ConfigCommand::Init(init) => execute_init(init, ctx),
    }
}

fn execute_show(ctx: &Context) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => print_json(&ctx.config),
        _ => {
            print!("{}", ctx.config.to_toml()?);
            Ok(())
        }
    }
}

fn execute_path(ctx: &Context) -> Result<()> {
    let path = config_path(ctx)?;
    if ctx.format == OutputFormat::Minimal || ctx.quiet {
        println!("{}", path.display());
        return Ok(());
    }
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

fn execute_init(args: InitArgs, ctx: &Context) -> Result<()> {
    let path = config_path(ctx)?;
    if path.exists() && !args.force {
        return Err(CliError::Config(format!(
            "{} already exists; use --force to overwrite",
            path.display()
        ))
        .into());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, CliConfig::default().to_toml()?)?;
    if !ctx.quiet {
        print_success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}
