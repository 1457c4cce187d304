//! Validate command implementation.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use growthcast_math::validation::{validate, RawValue};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::commands::{raw_list, Context, DataArgs};
use crate::output::{print_error, print_json, print_success};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Where the caller intends to interpolate
    #[arg(short, long, allow_hyphen_values = true)]
    pub at: String,
}

/// Execute the validate command. Invalid input exits with a failure code.
pub fn execute(args: ValidateArgs, ctx: &Context) -> Result<ExitCode> {
    let method = args.data.method();
    let outcome = validate(
        &raw_list(&args.data.x),
        &raw_list(&args.data.y),
        &RawValue::from(args.at.as_str()),
        method,
    );
    debug!("Validation for {method}: {outcome:?}");

    let message = outcome.error_message.as_deref().unwrap_or_default();
    match ctx.format {
        OutputFormat::Table => {
            if outcome.is_valid {
                print_success(&format!("Input is valid for {method}"));
            } else {
                print_error(message);
            }
        }
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Minimal => {
            if outcome.is_valid {
                println!("valid");
            } else {
                println!("{}", message);
            }
        }
    }

    Ok(if outcome.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
