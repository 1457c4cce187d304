//! CLI command implementations.

pub mod curve;
pub mod example;
pub mod forecast;
pub mod interpolate;
pub mod validate;

// Re-export submodules for convenience
pub use curve::CurveArgs;
pub use example::ExampleArgs;
pub use forecast::ForecastArgs;
pub use interpolate::InterpolateArgs;
pub use validate::ValidateArgs;

use clap::{Args, ValueEnum};
use growthcast_math::interpolation::InterpolationMethod;
use growthcast_math::validation::{parse_inputs, ParsedInputs, RawValue};

use crate::cli::OutputFormat;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Settings shared by every command.
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Loaded configuration.
    pub config: CliConfig,
}

/// Interpolation method choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodChoice {
    /// Linear interpolation
    #[value(name = "linear")]
    Linear,
    /// Lagrange polynomial
    #[value(name = "lagrange")]
    Lagrange,
    /// Newton divided-difference polynomial
    #[value(name = "newton", aliases = ["polynomial", "newton-polynomial"])]
    Newton,
    /// Natural cubic spline (linear below three points)
    #[value(name = "spline", aliases = ["cubic", "natural-cubic-spline"])]
    Spline,
}

impl From<MethodChoice> for InterpolationMethod {
    fn from(choice: MethodChoice) -> Self {
        match choice {
            MethodChoice::Linear => InterpolationMethod::Linear,
            MethodChoice::Lagrange => InterpolationMethod::Lagrange,
            MethodChoice::Newton => InterpolationMethod::NewtonPolynomial,
            MethodChoice::Spline => InterpolationMethod::NaturalCubicSpline,
        }
    }
}

/// Data points and method.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// Interpolation method
    #[arg(short, long, value_enum, default_value = "linear")]
    pub method: MethodChoice,

    /// X values (comma-separated, e.g., "2019,2020,2021")
    #[arg(short, long, allow_hyphen_values = true)]
    pub x: String,

    /// Y values (comma-separated, e.g., "12.5,15,21")
    #[arg(short, long, allow_hyphen_values = true)]
    pub y: String,
}

impl DataArgs {
    /// Selected method.
    pub fn method(&self) -> InterpolationMethod {
        self.method.into()
    }

    /// Validates the lists together with a query point.
    pub fn parse_with(&self, at: &str) -> CliResult<ParsedInputs> {
        let x = raw_list(&self.x);
        let y = raw_list(&self.y);
        Ok(parse_inputs(&x, &y, &RawValue::from(at), self.method())?)
    }

    /// Parses both lists as numbers without the interpolation checks.
    pub fn parse_numbers(&self) -> CliResult<(Vec<f64>, Vec<f64>)> {
        Ok((
            parse_numbers(&self.x, "x")?,
            parse_numbers(&self.y, "y")?,
        ))
    }
}

/// Splits a comma-separated list into raw entries.
pub fn raw_list(s: &str) -> Vec<RawValue> {
    s.split(',').map(RawValue::from).collect()
}

/// Parses a comma-separated list of numbers.
pub fn parse_numbers(s: &str, field: &'static str) -> CliResult<Vec<f64>> {
    raw_list(s)
        .into_iter()
        .map(|raw| {
            raw.parse().ok_or_else(|| CliError::InvalidNumber {
                field,
                value: raw.to_string(),
            })
        })
        .collect()
}
