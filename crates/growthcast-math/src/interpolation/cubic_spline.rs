//! Natural cubic spline interpolation.

use log::{debug, warn};
use serde::Serialize;

use crate::error::MathResult;
use crate::interpolation::{Interpolation, InterpolationMethod, Interpolator, LinearInterpolator};
use crate::linear_algebra::solve_tridiagonal;
use crate::points::PointSet;
use crate::trace::{FallbackReason, Formula, Position, Spacing, Step};

/// Spacings shown in the trace.
const SHOWN_SPACINGS: usize = 3;

/// Per-segment coefficients of a natural cubic spline.
///
/// On `[x_i, x_{i+1}]` the spline is
/// `S_i(x) = a_i + b_i (x - x_i) + c_i (x - x_i)^2 + d_i (x - x_i)^3`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplineCoefficients {
    knots: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    /// One entry per knot; `c[n-1]` is the natural end condition.
    c: Vec<f64>,
    d: Vec<f64>,
}

impl SplineCoefficients {
    /// Number of segments.
    pub fn segments(&self) -> usize {
        self.b.len()
    }

    /// `(a_i, b_i, c_i, d_i)` for segment `i`.
    pub fn segment(&self, i: usize) -> (f64, f64, f64, f64) {
        (self.a[i], self.b[i], self.c[i], self.d[i])
    }

    /// Evaluates segment `i`'s cubic at `x`, wherever `x` lies.
    pub fn evaluate_segment(&self, i: usize, x: f64) -> f64 {
        let (a, b, c, d) = self.segment(i);
        let dx = x - self.knots[i];
        a + b * dx + c * dx * dx + d * dx * dx * dx
    }

    /// Second derivative of segment `i`'s cubic at `x`.
    pub fn second_derivative(&self, i: usize, x: f64) -> f64 {
        let (_, _, c, d) = self.segment(i);
        2.0 * c + 6.0 * d * (x - self.knots[i])
    }
}

#[derive(Debug, Clone)]
enum Fit {
    Cubic {
        coefficients: SplineCoefficients,
        clamped_pivots: usize,
    },
    Linear {
        linear: LinearInterpolator,
        reason: FallbackReason,
    },
}

/// Natural cubic spline interpolation.
///
/// Constructs a smooth curve through data points using piecewise cubic
/// polynomials with continuous first and second derivatives.
///
/// "Natural" means the second derivative is zero at the endpoints.
/// Queries outside the data use the cubic of the first or last segment.
///
/// With fewer than three points, or with two x values closer than
/// `1e-10`, the spline hands every query to [`LinearInterpolator`] and
/// tags the result accordingly.
///
/// # Example
///
/// ```rust
/// use growthcast_math::interpolation::{NaturalCubicSpline, Interpolator};
/// use growthcast_math::PointSet;
///
/// let points = PointSet::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
///
/// let spline = NaturalCubicSpline::new(points).unwrap();
/// let y = spline.interpolate(1.5).unwrap();
/// assert!(y > 1.0 && y < 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct NaturalCubicSpline {
    points: PointSet,
    fit: Fit,
}

impl NaturalCubicSpline {
    /// Creates a natural cubic spline interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error only if the linear fallback itself cannot be
    /// built, i.e. for a single point.
    pub fn new(points: PointSet) -> MathResult<Self> {
        let n = points.len();

        let reason = if n < 3 {
            Some(FallbackReason::TooFewPoints { actual: n })
        } else if points.has_near_duplicate_x() {
            Some(FallbackReason::DegenerateSpacing)
        } else {
            None
        };

        let fit = match reason {
            Some(reason) => {
                warn!("spline: {reason}, falling back to linear interpolation");
                Fit::Linear {
                    linear: LinearInterpolator::new(points.clone())?,
                    reason,
                }
            }
            None => {
                let (coefficients, clamped_pivots) = compute_coefficients(&points)?;
                Fit::Cubic {
                    coefficients,
                    clamped_pivots,
                }
            }
        };

        Ok(Self { points, fit })
    }

    /// Spline coefficients, or `None` when the linear fallback is active.
    pub fn coefficients(&self) -> Option<&SplineCoefficients> {
        match &self.fit {
            Fit::Cubic { coefficients, .. } => Some(coefficients),
            Fit::Linear { .. } => None,
        }
    }

    /// Why the linear fallback is active, if it is.
    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match &self.fit {
            Fit::Cubic { .. } => None,
            Fit::Linear { reason, .. } => Some(*reason),
        }
    }
}

/// Computes the natural spline coefficients.
///
/// Interior rows of the system are
/// `h_{i-1} c_{i-1} + 2 (x_{i+1} - x_{i-1}) c_i + h_i c_{i+1} = alpha_{i-1}`;
/// the first and last rows pin `c_0 = c_{n-1} = 0`.
fn compute_coefficients(points: &PointSet) -> MathResult<(SplineCoefficients, usize)> {
    let xs = points.xs();
    let ys = points.ys();
    let n = xs.len();

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

    let alpha: Vec<f64> = (0..n - 2)
        .map(|i| 3.0 / h[i + 1] * (ys[i + 2] - ys[i + 1]) - 3.0 / h[i] * (ys[i + 1] - ys[i]))
        .collect();

    let mut lower = vec![0.0; n - 1];
    let mut diag = vec![1.0; n];
    let mut upper = vec![0.0; n - 1];
    let mut rhs = vec![0.0; n];
    for i in 1..n - 1 {
        lower[i - 1] = h[i - 1];
        diag[i] = 2.0 * (xs[i + 1] - xs[i - 1]);
        upper[i] = h[i];
        rhs[i] = alpha[i - 1];
    }

    let solution = solve_tridiagonal(&lower, &diag, &upper, &rhs)?;
    let c = solution.x;

    let mut b = vec![0.0; n - 1];
    let mut d = vec![0.0; n - 1];
    for j in 0..n - 1 {
        b[j] = (ys[j + 1] - ys[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
        d[j] = (c[j + 1] - c[j]) / (3.0 * h[j]);
    }

    Ok((
        SplineCoefficients {
            knots: xs.to_vec(),
            a: ys[..n - 1].to_vec(),
            b,
            c,
            d,
        },
        solution.clamped_pivots,
    ))
}

impl Interpolator for NaturalCubicSpline {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::NaturalCubicSpline
    }

    fn points(&self) -> &PointSet {
        &self.points
    }

    fn explain(&self, x: f64) -> MathResult<Interpolation> {
        if let Some(exact) = Interpolation::exact(self.method(), &self.points, x) {
            return Ok(exact);
        }

        let (coefficients, clamped_pivots) = match &self.fit {
            Fit::Cubic {
                coefficients,
                clamped_pivots,
            } => (coefficients, *clamped_pivots),
            Fit::Linear { linear, reason } => {
                let mut result = linear.explain(x)?;
                result.requested = self.method();
                result.steps.insert(
                    0,
                    Step::Fallback {
                        from: self.method(),
                        to: linear.method(),
                        reason: *reason,
                    },
                );
                return Ok(result);
            }
        };

        let xs = self.points.xs();
        let i = self.points.find_segment(x);
        let (a, b, c, d) = coefficients.segment(i);
        let dx = x - xs[i];
        let value = a + b * dx + c * dx * dx + d * dx * dx * dx;

        let position = Position::of(x, self.min_x(), self.max_x());
        debug!("spline: x = {x} uses segment {i} [{}, {}] ({position:?})", xs[i], xs[i + 1]);

        let spacings = xs
            .windows(2)
            .take(SHOWN_SPACINGS)
            .map(|w| Spacing {
                lo: w[0],
                hi: w[1],
                h: w[1] - w[0],
            })
            .collect();

        Ok(Interpolation {
            requested: self.method(),
            method_used: self.method(),
            value,
            steps: vec![
                Step::SplineSpacings {
                    spacings,
                    total: xs.len() - 1,
                },
                Step::TridiagonalSolved {
                    unknowns: xs.len(),
                    clamped_pivots,
                },
                Step::SplineInterval {
                    x,
                    index: i,
                    lo: xs[i],
                    hi: xs[i + 1],
                    position,
                },
                Step::SplineCoefficients { a, b, c, d },
                Step::Formula {
                    formula: Formula::CubicSegment,
                },
                Step::SplineEvaluation {
                    x,
                    xi: xs[i],
                    a,
                    b,
                    c,
                    d,
                    value,
                },
            ],
        })
    }
}
