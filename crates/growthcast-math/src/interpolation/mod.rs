//! Interpolation methods for projecting small time series.
//!
//! # Available Methods
//!
//! - [`LinearInterpolator`]: Two-point line, extended at both ends
//! - [`LagrangeInterpolator`]: Full Lagrange basis-polynomial evaluation
//! - [`NewtonInterpolator`]: Divided differences evaluated in Newton form
//! - [`NaturalCubicSpline`]: Natural cubic spline, falls back to linear
//!
//! # Choosing an Interpolation Method
//!
//! | Method | Smoothness | Extrapolation | Minimum points |
//! |--------|------------|---------------|----------------|
//! | Linear | C0 | Extends end segments | 2 |
//! | Lagrange | C∞ | Global polynomial | 1 |
//! | Newton | C∞ | Global polynomial (same as Lagrange) | 1 |
//! | Natural Cubic Spline | C2 | Extends end cubics | 3 (else linear) |
//!
//! Every method sorts its input first, returns the stored y unchanged when
//! the query hits a data point, and reports a derivation trace alongside
//! the full-precision value.

mod cubic_spline;
mod lagrange;
mod linear;
mod newton;

pub use cubic_spline::{NaturalCubicSpline, SplineCoefficients};
pub use lagrange::LagrangeInterpolator;
pub use linear::LinearInterpolator;
pub use newton::NewtonInterpolator;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::points::PointSet;
use crate::trace::{RenderOptions, Step};

/// Interpolation methods supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationMethod {
    /// Two-point linear interpolation.
    #[default]
    Linear,

    /// Lagrange polynomial interpolation.
    Lagrange,

    /// Newton divided-difference polynomial interpolation.
    NewtonPolynomial,

    /// Natural cubic spline interpolation.
    NaturalCubicSpline,
}

impl InterpolationMethod {
    /// Every method, in menu order.
    pub const ALL: [Self; 4] = [
        Self::Linear,
        Self::Lagrange,
        Self::NewtonPolynomial,
        Self::NaturalCubicSpline,
    ];

    /// Canonical tag, as accepted by [`FromStr`] and used in serialized form.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Lagrange => "lagrange",
            Self::NewtonPolynomial => "newtonPolynomial",
            Self::NaturalCubicSpline => "naturalCubicSpline",
        }
    }

    /// Fewest points a caller must supply for this method.
    #[must_use]
    pub fn minimum_points(&self) -> usize {
        match self {
            Self::NaturalCubicSpline => 3,
            _ => 2,
        }
    }

    /// Returns true for the global polynomial methods.
    #[must_use]
    pub fn is_polynomial(&self) -> bool {
        matches!(self, Self::Lagrange | Self::NewtonPolynomial)
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "Linear",
            Self::Lagrange => "Lagrange",
            Self::NewtonPolynomial => "Newton Polynomial",
            Self::NaturalCubicSpline => "Natural Cubic Spline",
        };
        write!(f, "{name}")
    }
}

impl FromStr for InterpolationMethod {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "linear" => Ok(Self::Linear),
            "lagrange" => Ok(Self::Lagrange),
            "newtonpolynomial" | "newton" | "polynomial" => Ok(Self::NewtonPolynomial),
            "naturalcubicspline" | "cubicspline" | "spline" | "cubic" => {
                Ok(Self::NaturalCubicSpline)
            }
            _ => Err(MathError::unknown_method(s)),
        }
    }
}

/// Result of one interpolation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpolation {
    /// Method the caller asked for.
    pub requested: InterpolationMethod,
    /// Method that actually produced the value.
    pub method_used: InterpolationMethod,
    /// Interpolated value, full precision.
    pub value: f64,
    /// Derivation trace.
    pub steps: Vec<Step>,
}

impl Interpolation {
    /// Returns true if a different method than requested produced the value.
    #[must_use]
    pub fn fallback(&self) -> bool {
        self.requested != self.method_used
    }

    /// Renders the trace to text.
    #[must_use]
    pub fn render_steps(&self, options: &RenderOptions) -> Vec<String> {
        options.render(&self.steps)
    }

    /// Formats the value for display without touching the stored value.
    #[must_use]
    pub fn display_value(&self, decimals: usize) -> String {
        format!("{:.*}", decimals, self.value)
    }

    /// Short-circuit result for a query that hits a data point.
    fn exact(method: InterpolationMethod, points: &PointSet, x: f64) -> Option<Self> {
        points.exact_index(x).map(|i| {
            let y = points.ys()[i];
            Self {
                requested: method,
                method_used: method,
                value: y,
                steps: vec![Step::ExactMatch { x, y }],
            }
        })
    }
}

/// Trait for interpolation methods.
///
/// All interpolation methods implement this trait, providing a unified
/// interface over sorted data.
pub trait Interpolator: Send + Sync {
    /// The method this interpolator implements.
    fn method(&self) -> InterpolationMethod;

    /// The sorted data.
    fn points(&self) -> &PointSet;

    /// Interpolates at x and records how the value was derived.
    fn explain(&self, x: f64) -> MathResult<Interpolation>;

    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.explain(x).map(|result| result.value)
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64 {
        self.points().min_x()
    }

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64 {
        self.points().max_x()
    }

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Builds the interpolator for `method` over sorted data.
pub fn interpolator(
    method: InterpolationMethod,
    points: PointSet,
) -> MathResult<Box<dyn Interpolator>> {
    Ok(match method {
        InterpolationMethod::Linear => Box::new(LinearInterpolator::new(points)?),
        InterpolationMethod::Lagrange => Box::new(LagrangeInterpolator::new(points)),
        InterpolationMethod::NewtonPolynomial => Box::new(NewtonInterpolator::new(points)?),
        InterpolationMethod::NaturalCubicSpline => Box::new(NaturalCubicSpline::new(points)?),
    })
}

/// Sorts the data and interpolates at `x` with the given method.
///
/// # Example
///
/// ```rust
/// use growthcast_math::interpolation::{interpolate, InterpolationMethod};
///
/// let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let ys = [10.0, 20.0, 30.0, 40.0, 50.0];
///
/// let result = interpolate(InterpolationMethod::Linear, &xs, &ys, 2.5).unwrap();
/// assert!((result.value - 25.0).abs() < 1e-12);
/// ```
pub fn interpolate(
    method: InterpolationMethod,
    xs: &[f64],
    ys: &[f64],
    x: f64,
) -> MathResult<Interpolation> {
    let points = PointSet::new(xs, ys)?;
    interpolator(method, points)?.explain(x)
}
