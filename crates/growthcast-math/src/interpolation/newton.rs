//! Newton divided-difference polynomial interpolation.

use log::debug;
use nalgebra::DMatrix;

use crate::error::{MathError, MathResult};
use crate::interpolation::{Interpolation, InterpolationMethod, Interpolator};
use crate::points::{PointSet, X_EPSILON};
use crate::trace::{Formula, Step};

/// Highest difference order shown in the trace.
const SHOWN_ORDERS: usize = 3;

/// Newton form of the interpolating polynomial.
///
/// Builds the divided-difference table
///
/// ```text
/// table[i][0] = y_i
/// table[i][j] = (table[i+1][j-1] - table[i][j-1]) / (x_{i+j} - x_i)
/// ```
///
/// and evaluates `P(x) = table[0][0] + Σ_k table[0][k] Π_{m<k} (x - x_m)`,
/// carrying the running product from term to term. The result is the same
/// polynomial as [`LagrangeInterpolator`](super::LagrangeInterpolator).
#[derive(Debug, Clone)]
pub struct NewtonInterpolator {
    points: PointSet,
    table: DMatrix<f64>,
}

impl NewtonInterpolator {
    /// Creates a Newton interpolator and its divided-difference table.
    ///
    /// # Errors
    ///
    /// Returns an error if two x values are closer than [`X_EPSILON`], since
    /// the table would divide by their difference.
    pub fn new(points: PointSet) -> MathResult<Self> {
        if let Some(h) = points
            .xs()
            .windows(2)
            .map(|w| w[1] - w[0])
            .find(|h| h.abs() < X_EPSILON)
        {
            return Err(MathError::DivisionByZero { value: h });
        }
        let table = divided_differences(points.xs(), points.ys());
        Ok(Self { points, table })
    }

    /// The full `n × n` table; only entries with `i + j < n` are meaningful.
    pub fn table(&self) -> &DMatrix<f64> {
        &self.table
    }

    /// Newton coefficients `f[x_0..x_k]`, the first row of the table.
    pub fn coefficients(&self) -> Vec<f64> {
        self.table.row(0).iter().copied().collect()
    }
}

/// Computes the divided-difference table column by column.
fn divided_differences(xs: &[f64], ys: &[f64]) -> DMatrix<f64> {
    let n = xs.len();
    let mut table = DMatrix::zeros(n, n);

    for (i, &y) in ys.iter().enumerate() {
        table[(i, 0)] = y;
    }

    for j in 1..n {
        for i in 0..n - j {
            table[(i, j)] = (table[(i + 1, j - 1)] - table[(i, j - 1)]) / (xs[i + j] - xs[i]);
        }
    }

    table
}

impl Interpolator for NewtonInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::NewtonPolynomial
    }

    fn points(&self) -> &PointSet {
        &self.points
    }

    fn explain(&self, x: f64) -> MathResult<Interpolation> {
        if let Some(exact) = Interpolation::exact(self.method(), &self.points, x) {
            return Ok(exact);
        }

        let xs = self.points.xs();
        let n = xs.len();

        let mut value = self.table[(0, 0)];
        let mut term = 1.0;
        for k in 1..n {
            term *= x - xs[k - 1];
            value += self.table[(0, k)] * term;
        }
        debug!("newton: degree {} polynomial at x = {x} gives {value}", n - 1);

        let shown = n.min(SHOWN_ORDERS + 1);
        let rows = (0..n)
            .map(|i| {
                (0..shown.min(n - i))
                    .map(|j| self.table[(i, j)])
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(Interpolation {
            requested: self.method(),
            method_used: self.method(),
            value,
            steps: vec![
                Step::DividedDifferences {
                    xs: xs.to_vec(),
                    rows,
                },
                Step::Formula {
                    formula: Formula::Newton,
                },
                Step::NewtonPolynomial {
                    coefficients: self.coefficients()[..shown].to_vec(),
                    centers: xs[..shown].to_vec(),
                    truncated: shown < n,
                },
                Step::Evaluated {
                    symbol: 'P',
                    x,
                    value,
                },
            ],
        })
    }
}
