//! CLI configuration.
//!
//! ```toml
//! [display]
//! value_decimals = 4
//! coefficient_decimals = 6
//!
//! [sampler]
//! padding_fraction = 0.1
//! steps = 100
//!
//! [forecast]
//! horizon = 1
//! clamp_negative = true
//! ```

use std::path::Path;

use growthcast_math::forecast::ForecastConfig;
use growthcast_math::sampling::SamplerConfig;
use growthcast_math::trace::RenderOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "growthcast.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Trace and value precision
    #[serde(default)]
    pub display: DisplayConfig,

    /// Curve sampling grid
    #[serde(default)]
    pub sampler: SamplerSection,

    /// Forecast defaults
    #[serde(default)]
    pub forecast: ForecastSection,
}

/// Display precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Decimals for values
    #[serde(default = "default_value_decimals")]
    pub value_decimals: usize,

    /// Decimals for coefficients and basis values
    #[serde(default = "default_coefficient_decimals")]
    pub coefficient_decimals: usize,
}

/// Sampling grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerSection {
    /// Padding on each side, as a fraction of the data range
    #[serde(default = "default_padding_fraction")]
    pub padding_fraction: f64,

    /// Steps across the data range
    #[serde(default = "default_steps")]
    pub steps: usize,
}

/// Forecast defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSection {
    /// Years to project
    #[serde(default = "default_horizon")]
    pub horizon: usize,

    /// Replace negative projections with the smallest observed value
    #[serde(default = "default_true")]
    pub clamp_negative: bool,
}

fn default_value_decimals() -> usize {
    4
}

fn default_coefficient_decimals() -> usize {
    6
}

fn default_padding_fraction() -> f64 {
    0.1
}

fn default_steps() -> usize {
    100
}

fn default_horizon() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            value_decimals: default_value_decimals(),
            coefficient_decimals: default_coefficient_decimals(),
        }
    }
}

impl Default for SamplerSection {
    fn default() -> Self {
        Self {
            padding_fraction: default_padding_fraction(),
            steps: default_steps(),
        }
    }
}

impl Default for ForecastSection {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            clamp_negative: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Loads `explicit` if given, else the default file if it exists, else
    /// built-in defaults.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let path = match explicit {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };
        debug!("Loading configuration from {}", path.display());
        Self::from_file(path)
    }

    /// Trace rendering options.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_value_decimals(self.display.value_decimals)
            .with_coefficient_decimals(self.display.coefficient_decimals)
    }

    /// Curve sampling grid.
    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig::default()
            .with_padding_fraction(self.sampler.padding_fraction)
            .with_steps(self.sampler.steps)
    }

    /// Forecast settings.
    pub fn forecast_config(&self) -> ForecastConfig {
        ForecastConfig::default()
            .with_horizon(self.forecast.horizon)
            .with_clamp_negative(self.forecast.clamp_negative)
    }
}
