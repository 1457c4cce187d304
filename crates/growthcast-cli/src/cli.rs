//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CurveArgs, ExampleArgs, ForecastArgs, InterpolateArgs, ValidateArgs};

/// Growthcast - Interpolate, plot and project small time series
#[derive(Parser)]
#[command(name = "growthcast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./growthcast.toml when present)
    #[arg(short, long, global = true, env = "GROWTHCAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Interpolate a value and show how it was derived
    Interpolate(InterpolateArgs),

    /// Check input without interpolating
    Validate(ValidateArgs),

    /// Sample the interpolated curve for plotting
    Curve(CurveArgs),

    /// Project a yearly series past its last year
    Forecast(ForecastArgs),

    /// Run the built-in example for a method
    Example(ExampleArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Minimal output (just the values)
    Minimal,
}
