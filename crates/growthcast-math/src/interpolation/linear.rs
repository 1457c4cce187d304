//! Linear interpolation.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::interpolation::{Interpolation, InterpolationMethod, Interpolator};
use crate::points::{PointSet, X_EPSILON};
use crate::trace::{Formula, Position, Step};

/// Linear interpolation between data points.
///
/// Connects consecutive points with straight lines. Queries outside the
/// data range extend the first or last segment.
///
/// # Example
///
/// ```rust
/// use growthcast_math::interpolation::{LinearInterpolator, Interpolator};
/// use growthcast_math::PointSet;
///
/// let points = PointSet::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
///
/// let interp = LinearInterpolator::new(points).unwrap();
/// let y = interp.interpolate(1.5).unwrap();
/// // y = 2.5 (linear interpolation between (1, 1) and (2, 4))
/// assert!((y - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    points: PointSet,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points.
    pub fn new(points: PointSet) -> MathResult<Self> {
        if points.len() < 2 {
            return Err(MathError::insufficient_data(2, points.len()));
        }
        Ok(Self { points })
    }
}

impl Interpolator for LinearInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::Linear
    }

    fn points(&self) -> &PointSet {
        &self.points
    }

    fn explain(&self, x: f64) -> MathResult<Interpolation> {
        if let Some(exact) = Interpolation::exact(self.method(), &self.points, x) {
            return Ok(exact);
        }

        let i = self.points.find_segment(x);
        let xs = self.points.xs();
        let ys = self.points.ys();

        let x0 = xs[i];
        let x1 = xs[i + 1];
        let y0 = ys[i];
        let y1 = ys[i + 1];

        let h = x1 - x0;
        if h.abs() < X_EPSILON {
            return Err(MathError::DivisionByZero { value: h });
        }

        let position = Position::of(x, self.min_x(), self.max_x());
        debug!("linear: x = {x} uses segment {i} [{x0}, {x1}] ({position:?})");

        // Linear interpolation formula
        let value = y0 + (x - x0) * (y1 - y0) / h;

        Ok(Interpolation {
            requested: self.method(),
            method_used: self.method(),
            value,
            steps: vec![
                Step::BracketingPoints {
                    x,
                    x0,
                    y0,
                    x1,
                    y1,
                    position,
                },
                Step::Formula {
                    formula: Formula::Linear,
                },
                Step::LinearSubstitution {
                    x,
                    x0,
                    y0,
                    x1,
                    y1,
                    value,
                },
            ],
        })
    }
}
