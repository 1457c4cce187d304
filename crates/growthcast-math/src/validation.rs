//! Input validation.
//!
//! Callers typically hold raw form or command-line input: a mix of strings
//! and numbers. [`validate`] checks it before any interpolator runs and
//! reports the first problem as a user-facing message; [`parse_inputs`]
//! runs the same checks and hands back the parsed values.
//!
//! Checks run in order and stop at the first failure:
//!
//! 1. at least two x values
//! 2. as many y values as x values
//! 3. no empty entries
//! 4. every entry is a finite number
//! 5. no repeated x value
//! 6. three or more points for the natural cubic spline

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interpolation::InterpolationMethod;

/// A value as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// An already numeric value.
    Number(f64),
    /// Text still to be parsed.
    Text(String),
}

impl RawValue {
    /// Returns true for blank text.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// Parses the value; `None` unless it is a finite number.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Why input was rejected. The display text is meant for end users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Fewer than two data points.
    #[error("At least 2 data points are required for interpolation.")]
    InsufficientPoints {
        /// Points supplied.
        actual: usize,
    },

    /// x and y differ in length.
    #[error("X and Y must contain the same number of values ({xs} vs {ys}).")]
    LengthMismatch {
        /// Number of x values.
        xs: usize,
        /// Number of y values.
        ys: usize,
    },

    /// An entry is blank.
    #[error("All X, Y and prediction values are required.")]
    MissingValue,

    /// An entry is not a finite number.
    #[error("All values must be numbers.")]
    NotNumeric,

    /// Two x values are equal.
    #[error("X values must be unique. Duplicate values are not allowed.")]
    DuplicateX,

    /// The spline was asked for with fewer than three points.
    #[error("Natural cubic spline interpolation requires at least 3 data points.")]
    SplineNeedsThreePoints,

    /// Forecast x values are not consecutive whole years.
    #[error("Years must be consecutive.")]
    NonConsecutiveYears,

    /// A forecast y value is zero or negative.
    #[error("User counts must be positive numbers.")]
    NonPositiveCount,
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    /// True when the input may be interpolated.
    pub is_valid: bool,
    /// User-facing reason when invalid.
    pub error_message: Option<String>,
}

impl<T> From<Result<T, ValidationError>> for ValidationOutcome {
    fn from(result: Result<T, ValidationError>) -> Self {
        match result {
            Ok(_) => Self {
                is_valid: true,
                error_message: None,
            },
            Err(err) => Self {
                is_valid: false,
                error_message: Some(err.to_string()),
            },
        }
    }
}

/// Parsed, validated input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInputs {
    /// x values in input order.
    pub xs: Vec<f64>,
    /// y values in input order.
    pub ys: Vec<f64>,
    /// Query point.
    pub x_to_predict: f64,
}

/// Validates raw input for `method`.
///
/// # Example
///
/// ```rust
/// use growthcast_math::interpolation::InterpolationMethod;
/// use growthcast_math::validation::{validate, RawValue};
///
/// let x: Vec<RawValue> = ["1", "2", "2"].into_iter().map(RawValue::from).collect();
/// let y: Vec<RawValue> = ["1", "2", "3"].into_iter().map(RawValue::from).collect();
///
/// let outcome = validate(&x, &y, &"1.5".into(), InterpolationMethod::Linear);
/// assert!(!outcome.is_valid);
/// ```
pub fn validate(
    x: &[RawValue],
    y: &[RawValue],
    x_to_predict: &RawValue,
    method: InterpolationMethod,
) -> ValidationOutcome {
    parse_inputs(x, y, x_to_predict, method).into()
}

/// Validates raw input and returns the parsed numbers.
pub fn parse_inputs(
    x: &[RawValue],
    y: &[RawValue],
    x_to_predict: &RawValue,
    method: InterpolationMethod,
) -> Result<ParsedInputs, ValidationError> {
    if x.len() < 2 {
        return Err(ValidationError::InsufficientPoints { actual: x.len() });
    }
    if x.len() != y.len() {
        return Err(ValidationError::LengthMismatch {
            xs: x.len(),
            ys: y.len(),
        });
    }

    let all = || x.iter().chain(y).chain(std::iter::once(x_to_predict));

    if all().any(RawValue::is_missing) {
        return Err(ValidationError::MissingValue);
    }
    if all().any(|v| v.parse().is_none()) {
        return Err(ValidationError::NotNumeric);
    }

    let parse_all = |values: &[RawValue]| -> Result<Vec<f64>, ValidationError> {
        values
            .iter()
            .map(|v| v.parse().ok_or(ValidationError::NotNumeric))
            .collect()
    };
    let xs = parse_all(x)?;
    let ys = parse_all(y)?;
    let x_to_predict = x_to_predict.parse().ok_or(ValidationError::NotNumeric)?;

    let mut seen = HashSet::with_capacity(xs.len());
    // "1", "1.0" and "-0" collapse onto the same key
    if !xs.iter().all(|v| seen.insert(format!("{}", v + 0.0))) {
        return Err(ValidationError::DuplicateX);
    }

    if xs.len() < method.minimum_points() {
        return Err(ValidationError::SplineNeedsThreePoints);
    }

    Ok(ParsedInputs {
        xs,
        ys,
        x_to_predict,
    })
}

/// Checks a yearly series before forecasting: consecutive whole years once
/// sorted, strictly positive counts.
pub fn validate_series(xs: &[f64], ys: &[f64]) -> Result<(), ValidationError> {
    if xs.len() < 2 {
        return Err(ValidationError::InsufficientPoints { actual: xs.len() });
    }
    if xs.len() != ys.len() {
        return Err(ValidationError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }

    let mut years = xs.to_vec();
    years.sort_by(f64::total_cmp);
    let consecutive = years.iter().all(|y| y.fract() == 0.0)
        && years.windows(2).all(|w| w[1] - w[0] == 1.0);
    if !consecutive {
        return Err(ValidationError::NonConsecutiveYears);
    }

    if ys.iter().any(|&users| !(users > 0.0)) {
        return Err(ValidationError::NonPositiveCount);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: &[&str]) -> Vec<RawValue> {
        values.iter().copied().map(RawValue::from).collect()
    }

    fn check(x: &[&str], y: &[&str], at: &str, method: InterpolationMethod) -> ValidationOutcome {
        validate(&raw(x), &raw(y), &at.into(), method)
    }

    #[test]
    fn test_accepts_good_input() {
        let outcome = check(&["1", "2", "3"], &["10", "20", "30"], "2.5", InterpolationMethod::Linear);

        assert!(outcome.is_valid);
        assert_eq!(outcome.error_message, None);
    }

    #[test]
    fn test_rejects_duplicates() {
        let outcome = check(&["1", "2", "2"], &["1", "2", "3"], "1.5", InterpolationMethod::Linear);

        assert!(!outcome.is_valid);
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("X values must be unique. Duplicate values are not allowed.")
        );
    }

    #[test]
    fn test_duplicates_after_normalization() {
        let err = parse_inputs(
            &raw(&["1", "1.0", "3"]),
            &raw(&["1", "2", "3"]),
            &"2".into(),
            InterpolationMethod::Linear,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateX);

        let err = parse_inputs(
            &[RawValue::Number(0.0), RawValue::Text("-0".into())],
            &raw(&["1", "2"]),
            &"2".into(),
            InterpolationMethod::Linear,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateX);
    }

    #[test]
    fn test_spline_needs_three_points() {
        let spline = check(&["1", "2"], &["1", "2"], "1.5", InterpolationMethod::NaturalCubicSpline);
        let linear = check(&["1", "2"], &["1", "2"], "1.5", InterpolationMethod::Linear);

        assert!(!spline.is_valid);
        assert!(linear.is_valid);
    }

    #[test]
    fn test_check_order() {
        let m = InterpolationMethod::Linear;
        let first = |x: &[&str], y: &[&str], at: &str| {
            parse_inputs(&raw(x), &raw(y), &at.into(), m).unwrap_err()
        };

        assert_eq!(
            first(&["1"], &["x"], ""),
            ValidationError::InsufficientPoints { actual: 1 }
        );
        assert_eq!(
            first(&["1", "2"], &["1"], "1"),
            ValidationError::LengthMismatch { xs: 2, ys: 1 }
        );
        // blank beats non-numeric and duplicate
        assert_eq!(first(&["a", "a"], &["1", " "], "1"), ValidationError::MissingValue);
        assert_eq!(first(&["1", "2"], &["1", "2"], ""), ValidationError::MissingValue);
        // non-numeric beats duplicate
        assert_eq!(first(&["1", "1"], &["1", "abc"], "1"), ValidationError::NotNumeric);
        assert_eq!(first(&["1", "2"], &["1", "inf"], "1"), ValidationError::NotNumeric);
        assert_eq!(first(&["1", "1"], &["1", "2"], "1"), ValidationError::DuplicateX);
    }

    #[test]
    fn test_parse_inputs_returns_numbers() {
        let parsed = parse_inputs(
            &[RawValue::Number(2.0), " 1 ".into()],
            &raw(&["20", "1e1"]),
            &RawValue::Number(1.5),
            InterpolationMethod::Lagrange,
        )
        .unwrap();

        assert_eq!(parsed.xs, vec![2.0, 1.0]);
        assert_eq!(parsed.ys, vec![20.0, 10.0]);
        assert_eq!(parsed.x_to_predict, 1.5);
    }

    #[test]
    fn test_nan_number_is_not_numeric() {
        let err = parse_inputs(
            &[RawValue::Number(f64::NAN), RawValue::Number(1.0)],
            &[RawValue::Number(1.0), RawValue::Number(1.0)],
            &RawValue::Number(0.5),
            InterpolationMethod::Linear,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::NotNumeric);
    }

    #[test]
    fn test_series_validation() {
        assert!(validate_series(&[2021.0, 2019.0, 2020.0], &[3.0, 1.0, 2.0]).is_ok());
        assert_eq!(
            validate_series(&[2019.0, 2021.0], &[1.0, 2.0]),
            Err(ValidationError::NonConsecutiveYears)
        );
        assert_eq!(
            validate_series(&[2019.5, 2020.5], &[1.0, 2.0]),
            Err(ValidationError::NonConsecutiveYears)
        );
        assert_eq!(
            validate_series(&[2019.0, 2020.0], &[1.0, 0.0]),
            Err(ValidationError::NonPositiveCount)
        );
    }

    #[test]
    fn test_raw_value_deserializes_mixed() {
        let values: Vec<RawValue> = serde_json::from_str(r#"[1.5, "2", ""]"#).unwrap();

        assert_eq!(values[0], RawValue::Number(1.5));
        assert_eq!(values[1].parse(), Some(2.0));
        assert!(values[2].is_missing());
    }
}
