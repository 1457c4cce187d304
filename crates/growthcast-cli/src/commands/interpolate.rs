//! Interpolate command implementation.
//!
//! Validates the input, interpolates one value and prints the derivation.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use growthcast_math::interpolation::{interpolate, Interpolation};
use growthcast_math::validation::ParsedInputs;
use serde::Serialize;
use tracing::info;

use crate::cli::OutputFormat;
use crate::commands::{Context, DataArgs};
use crate::output::{print_divider, print_header, print_json, print_table, print_warning, KeyValue};

/// Arguments for the interpolate command.
#[derive(Args, Debug)]
pub struct InterpolateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Where to interpolate
    #[arg(short, long, allow_hyphen_values = true)]
    pub at: String,

    /// Print only the result, not the derivation
    #[arg(long)]
    pub no_steps: bool,
}

/// JSON shape of an interpolation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    #[serde(flatten)]
    result: &'a Interpolation,
    display_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rendered_steps: Option<Vec<String>>,
}

/// Execute the interpolate command.
pub fn execute(args: InterpolateArgs, ctx: &Context) -> Result<ExitCode> {
    let inputs = args.data.parse_with(&args.at)?;
    let result = run(&args.data, &inputs)?;
    report(&result, ctx, !args.no_steps)?;
    Ok(ExitCode::SUCCESS)
}

/// Interpolates already validated input.
pub fn run(data: &DataArgs, inputs: &ParsedInputs) -> Result<Interpolation> {
    let method = data.method();
    info!(
        "Interpolating {} points with {method} at x = {}",
        inputs.xs.len(),
        inputs.x_to_predict
    );
    Ok(interpolate(method, &inputs.xs, &inputs.ys, inputs.x_to_predict)?)
}

/// Prints an interpolation in the selected format.
pub fn report(result: &Interpolation, ctx: &Context, show_steps: bool) -> Result<()> {
    let options = ctx.config.render_options();
    let display_value = result.display_value(options.value_decimals);

    match ctx.format {
        OutputFormat::Table => {
            if result.fallback() {
                print_warning(&format!(
                    "{} was not applicable; the result comes from {}",
                    result.requested, result.method_used
                ));
            }

            print_header("Interpolation");
            print_table(&[
                KeyValue::new("Method", result.requested.to_string()),
                KeyValue::new("Method Used", result.method_used.to_string()),
                KeyValue::new("Value", display_value),
            ]);

            if show_steps {
                print_header("Derivation");
                for line in result.render_steps(&options) {
                    println!("{}", line);
                }
                print_divider();
            }
        }
        OutputFormat::Json => {
            print_json(&Report {
                result,
                display_value,
                rendered_steps: show_steps.then(|| result.render_steps(&options)),
            })?;
        }
        OutputFormat::Minimal => {
            println!("{}", display_value);
        }
    }

    Ok(())
}
