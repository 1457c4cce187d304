//! Example command implementation.
//!
//! Runs a method on its built-in demonstration dataset.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use growthcast_math::datasets::{example_for, ExampleData};
use growthcast_math::validation::RawValue;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::{interpolate, Context, DataArgs, MethodChoice};
use crate::output::{print_header, print_json, print_table, KeyValue};

/// Arguments for the example command.
#[derive(Args, Debug)]
pub struct ExampleArgs {
    /// Interpolation method
    #[arg(short, long, value_enum, default_value = "linear")]
    pub method: MethodChoice,

    /// Print only the result, not the derivation
    #[arg(long)]
    pub no_steps: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExampleOutput<'a> {
    data: &'a ExampleData,
    value: f64,
    method_used: String,
}

fn join(values: &[RawValue]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Execute the example command.
pub fn execute(args: ExampleArgs, ctx: &Context) -> Result<ExitCode> {
    let example = example_for(args.method.into());
    let data = DataArgs {
        method: args.method,
        x: join(&example.x),
        y: join(&example.y),
    };
    let at = example.x_to_predict.to_string();

    let inputs = data.parse_with(&at)?;
    let result = interpolate::run(&data, &inputs)?;

    match ctx.format {
        OutputFormat::Table => {
            print_header(&format!("{} Example", data.method()));
            print_table(&[
                KeyValue::new("x", data.x.clone()),
                KeyValue::new("y", data.y.clone()),
                KeyValue::new("Predict at", at),
            ]);
            interpolate::report(&result, ctx, !args.no_steps)?;
        }
        OutputFormat::Json => {
            print_json(&ExampleOutput {
                data: &example,
                value: result.value,
                method_used: result.method_used.tag().to_string(),
            })?;
        }
        OutputFormat::Minimal => interpolate::report(&result, ctx, false)?,
    }

    Ok(ExitCode::SUCCESS)
}
