//! Forecast command implementation.
//!
//! Projects a yearly series past its last year and reports the implied
//! growth.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use growthcast_math::forecast::forecast;
use tabled::Tabled;
use tracing::info;

use crate::cli::OutputFormat;
use crate::commands::{Context, DataArgs};
use crate::output::{format_list, format_percent, print_header, print_json, print_table, KeyValue};

/// Arguments for the forecast command.
#[derive(Args, Debug)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Years to project (overrides the configuration)
    #[arg(short = 'n', long)]
    pub horizon: Option<usize>,

    /// Keep negative projections instead of replacing them
    #[arg(long)]
    pub no_clamp: bool,
}

#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Projected")]
    value: String,
    #[tabled(rename = "Growth")]
    growth: String,
    #[tabled(rename = "Clamped")]
    clamped: String,
}

/// Execute the forecast command.
pub fn execute(args: ForecastArgs, ctx: &Context) -> Result<ExitCode> {
    let (xs, ys) = args.data.parse_numbers()?;

    let mut config = ctx.config.forecast_config();
    if let Some(horizon) = args.horizon {
        config = config.with_horizon(horizon);
    }
    if args.no_clamp {
        config = config.with_clamp_negative(false);
    }

    info!(
        "Forecasting {} year(s) from {}",
        config.horizon,
        format_list(&xs)
    );
    let result = forecast(args.data.method(), &xs, &ys, &config)?;

    match ctx.format {
        OutputFormat::Table => {
            print_header("Forecast");
            print_table(&[
                KeyValue::new("Method", result.method_used.to_string()),
                KeyValue::new("Equation", result.equation.clone()),
                KeyValue::new(
                    "Historical Range",
                    format!("{} - {}", result.historical_range.0, result.historical_range.1),
                ),
                KeyValue::new("Data Points", result.data_points.to_string()),
            ]);

            print_header("Predictions");
            let rows: Vec<PredictionRow> = result
                .predictions
                .iter()
                .map(|p| PredictionRow {
                    year: p.x.to_string(),
                    value: p.rounded.to_string(),
                    growth: format_percent(p.growth_rate),
                    clamped: if p.clamped { "yes" } else { "" }.to_string(),
                })
                .collect();
            print_table(&rows);

            print_header("Statistics");
            print_table(&[
                KeyValue::new("Average Growth", format_percent(result.average_growth_rate)),
                KeyValue::new("Total Growth", format_percent(result.total_growth)),
            ]);
        }
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Minimal => {
            for p in &result.predictions {
                println!("{} {}", p.x, p.rounded);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
