//! Built-in demonstration inputs, one per method.

use serde::Serialize;

use crate::interpolation::InterpolationMethod;
use crate::validation::RawValue;

/// Example input, in the raw form a caller would submit it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleData {
    /// X values.
    pub x: Vec<RawValue>,
    /// Y values.
    pub y: Vec<RawValue>,
    /// Where to interpolate.
    pub x_to_predict: RawValue,
}

impl ExampleData {
    fn new(x: &[&str], y: &[&str], x_to_predict: &str) -> Self {
        Self {
            x: x.iter().map(|&v| v.into()).collect(),
            y: y.iter().map(|&v| v.into()).collect(),
            x_to_predict: x_to_predict.into(),
        }
    }
}

/// Returns the example dataset for `method`.
#[must_use]
pub fn example_for(method: InterpolationMethod) -> ExampleData {
    match method {
        InterpolationMethod::Linear => ExampleData::new(
            &["1", "2", "3", "4", "5"],
            &["10", "20", "30", "40", "50"],
            "2.5",
        ),
        InterpolationMethod::NewtonPolynomial => ExampleData::new(
            &["1", "2", "3", "4", "5"],
            &["1", "4", "9", "16", "25"],
            "3.5",
        ),
        InterpolationMethod::NaturalCubicSpline => ExampleData::new(
            &["1", "2", "3", "5", "7", "8", "10"],
            &["3", "3.5", "5", "8", "6", "7", "10"],
            "6",
        ),
        InterpolationMethod::Lagrange => {
            ExampleData::new(&["0", "1", "2", "4", "7"], &["1", "3", "-2", "5", "9"], "3")
        }
    }
}
