//! Error types for interpolation operations.

use thiserror::Error;

use crate::validation::ValidationError;

/// A specialized Result type for interpolation operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur while interpolating, sampling or forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Division by zero or near-zero value.
    #[error("Division by zero or near-zero value: {value:.2e}")]
    DivisionByZero {
        /// The near-zero value.
        value: f64,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// The x and y sequences have different lengths.
    #[error("xs and ys must have same length: {xs} vs {ys}")]
    LengthMismatch {
        /// Number of x values.
        xs: usize,
        /// Number of y values.
        ys: usize,
    },

    /// Method tag did not name a known interpolation method.
    #[error("Method not recognized: {tag}")]
    UnknownMethod {
        /// The rejected tag.
        tag: String,
    },

    /// The sampling domain has zero width.
    #[error("Cannot sample an empty domain [{min}, {max}]")]
    EmptyDomain {
        /// Lower bound of the data.
        min: f64,
        /// Upper bound of the data.
        max: f64,
    },

    /// The data failed a user-facing validation check.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates an unknown method error.
    #[must_use]
    pub fn unknown_method(tag: impl Into<String>) -> Self {
        Self::UnknownMethod { tag: tag.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::insufficient_data(3, 2);
        assert!(err.to_string().contains("at least 3, got 2"));

        let err = MathError::unknown_method("quadratic");
        assert_eq!(err.to_string(), "Method not recognized: quadratic");
    }
}
