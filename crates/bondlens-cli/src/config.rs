//! Configuration file handling.
//!
//! Settings come from a TOML file; command-line flags override them.

use std::path::{Path, PathBuf};

use bondlens_core::daycounts::DayCountConvention;
use bondlens_portfolio::{AnalyticsConfig, RateShock};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Decimal places for ratios and durations
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Funds reported when a command is given none
    #[serde(default)]
    pub funds: Vec<String>,

    /// Day count for computed remaining terms
    #[serde(default)]
    pub day_count: DayCountConvention,

    /// FX rate applied to face and settlement amounts on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fx_rate: Option<Decimal>,

    /// Per-bond analytics settings
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Stress scenario defaults
    #[serde(default)]
    pub stress: StressSettings,
}

/// `[stress]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressSettings {
    /// Parallel shifts in basis points
    #[serde(default = "default_shocks")]
    pub shocks_bps: Vec<f64>,

    /// Fund ROI in percent, carried through the scenarios
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
}

fn default_precision() -> usize {
    4
}

fn default_shocks() -> Vec<f64> {
    RateShock::standard().iter().map(|s| s.shift_bps).collect()
}

impl Default for StressSettings {
    fn default() -> Self {
        Self {
            shocks_bps: default_shocks(),
            roi: None,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
            funds: Vec::new(),
            day_count: DayCountConvention::default(),
            fx_rate: None,
            analytics: AnalyticsConfig::default(),
            stress: StressSettings::default(),
        }
    }
}

impl CliConfig {
    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Loads `explicit` if given (it must exist), otherwise the default
    /// location if present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            info!(path = %path.display(), "loading configuration");
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "loading configuration");
                Self::from_file(&path)
            }
            _ => {
                debug!("using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }

    fn validate(&self) -> CliResult<()> {
        if self.precision > 12 {
            return Err(CliError::Config(format!(
                "precision {} is out of range (0-12)",
                self.precision
            )));
        }
        if let Some(rate) = self.fx_rate {
            if rate <= Decimal::ZERO {
                return Err(CliError::Config(format!("fx_rate must be positive, got {rate}")));
            }
        }
        if self.stress.shocks_bps.iter().any(|s| !s.is_finite()) {
            return Err(CliError::Config("stress.shocks_bps must be finite".into()));
        }
        Ok(())
    }
}

/// `<config dir>/bondlens/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("bondlens").join("config.toml"))
}
