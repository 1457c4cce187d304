//! CLI error types.

use std::path::PathBuf;

use growthcast_math::validation::ValidationError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input rejected by the validator.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A list entry that is not a number.
    #[error("Invalid {field} value: '{value}'. Must be a number.")]
    InvalidNumber {
        /// Which argument held the value.
        field: &'static str,
        /// The rejected text.
        value: String,
    },

    /// Configuration error.
    #[error("Configuration error in {}: {reason}", path.display())]
    Config {
        /// File being read.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
