//! Growthcast CLI - Command-line interface for small time-series projection.
//!
//! # Usage
//!
//! ```bash
//! # Interpolate with a step-by-step derivation
//! growthcast interpolate --method spline --x 1,2,3,5,7 --y 3,3.5,5,8,6 --at 6
//!
//! # Check input without computing anything
//! growthcast validate --method linear --x 1,2,2 --y 1,2,3 --at 1.5
//!
//! # Sample the curve for plotting
//! growthcast --format json curve --method lagrange --x 0,1,2,4 --y 1,3,-2,5 --at 3
//!
//! # Project three years ahead
//! growthcast forecast --method linear --x 2021,2022,2023 --y 100,120,140 --horizon 3
//!
//! # Run a built-in example
//! growthcast example --method newton
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::CliConfig;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;
    let ctx = Context {
        format: cli.format,
        config,
    };

    // Execute command
    let code = match cli.command {
        Commands::Interpolate(args) => commands::interpolate::execute(args, &ctx)?,
        Commands::Validate(args) => commands::validate::execute(args, &ctx)?,
        Commands::Curve(args) => commands::curve::execute(args, &ctx)?,
        Commands::Forecast(args) => commands::forecast::execute(args, &ctx)?,
        Commands::Example(args) => commands::example::execute(args, &ctx)?,
    };

    Ok(code)
}

/// Logs go to stderr so stdout stays clean for results. `log` records from
/// the engine are picked up by the subscriber as well.
fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(log_filter(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// `RUST_LOG` directives, or `growthcast=info` without them; `--verbose`
/// adds `growthcast=debug` on top.
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    let base = env
        .map(str::trim)
        .filter(|directives| !directives.is_empty() && EnvFilter::try_new(directives).is_ok())
        .unwrap_or("growthcast=info");

    if verbose {
        EnvFilter::new(format!("{base},growthcast=debug"))
    } else {
        EnvFilter::new(base)
    }
}
