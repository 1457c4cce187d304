//! Curve command implementation.
//!
//! Samples the interpolated curve over the padded data range for plotting.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use growthcast_math::sampling::{sample_curve, CurvePoint};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::cli::OutputFormat;
use crate::commands::{interpolate, Context, DataArgs};
use crate::output::{print_header, print_json, print_table};

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Interpolated point to plot alongside the curve
    #[arg(short, long, allow_hyphen_values = true)]
    pub at: String,

    /// Steps across the data range (overrides the configuration)
    #[arg(long)]
    pub steps: Option<usize>,
}

#[derive(Tabled)]
struct CurveRow {
    #[tabled(rename = "x")]
    x: String,
    #[tabled(rename = "y")]
    y: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CurveOutput<'a> {
    method: String,
    method_used: String,
    point: CurvePoint,
    curve: &'a [CurvePoint],
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, ctx: &Context) -> Result<ExitCode> {
    let inputs = args.data.parse_with(&args.at)?;
    let result = interpolate::run(&args.data, &inputs)?;

    let mut config = ctx.config.sampler_config();
    if let Some(steps) = args.steps {
        config = config.with_steps(steps);
    }

    let sampler = sample_curve(
        args.data.method(),
        &inputs.xs,
        &inputs.ys,
        Some(result.value),
        &config,
    )?;
    info!(
        "Sampling {} points from x = {} in steps of {}",
        sampler.len(),
        sampler.start(),
        sampler.step()
    );
    let points = sampler.to_vec()?;

    let decimals = ctx.config.display.value_decimals;
    match ctx.format {
        OutputFormat::Table => {
            print_header(&format!("{} Curve", result.method_used));
            let rows: Vec<CurveRow> = points
                .iter()
                .map(|p| CurveRow {
                    x: format!("{:.*}", decimals, p.x),
                    y: format!("{:.*}", decimals, p.y),
                })
                .collect();
            print_table(&rows);
            println!(
                "Interpolated point: ({}, {})",
                inputs.x_to_predict,
                result.display_value(decimals)
            );
        }
        OutputFormat::Json => {
            print_json(&CurveOutput {
                method: result.requested.tag().to_string(),
                method_used: result.method_used.tag().to_string(),
                point: CurvePoint {
                    x: inputs.x_to_predict,
                    y: result.value,
                },
                curve: &points,
            })?;
        }
        OutputFormat::Minimal => {
            for p in &points {
                println!("{} {}", p.x, p.y);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
