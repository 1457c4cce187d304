//! Lagrange polynomial interpolation.

use log::warn;

use crate::error::MathResult;
use crate::interpolation::{Interpolation, InterpolationMethod, Interpolator};
use crate::points::{PointSet, X_EPSILON};
use crate::trace::{BasisTerm, Formula, Step};

/// Lagrange polynomial interpolation.
///
/// Evaluates the unique polynomial of degree at most `n - 1` through all
/// `n` points as `P(x) = Σ y_j L_j(x)`, with
/// `L_j(x) = Π_{i≠j} (x - x_i) / (x_j - x_i)`.
///
/// A basis term whose denominator contains two nodes closer than
/// [`X_EPSILON`] is set to zero instead of dividing.
///
/// A single point gives the constant polynomial `y_0`.
#[derive(Debug, Clone)]
pub struct LagrangeInterpolator {
    points: PointSet,
}

impl LagrangeInterpolator {
    /// Creates a new Lagrange interpolator.
    #[must_use]
    pub fn new(points: PointSet) -> Self {
        Self { points }
    }

    /// Evaluates basis `j` at `x`. Returns the value and whether the
    /// near-duplicate guard zeroed it.
    fn basis(&self, j: usize, x: f64) -> (f64, bool) {
        let xs = self.points.xs();
        let mut numerator = 1.0;
        let mut denominator = 1.0;

        for (i, &xi) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            let gap = xs[j] - xi;
            if gap.abs() < X_EPSILON {
                return (0.0, true);
            }
            numerator *= x - xi;
            denominator *= gap;
        }

        (numerator / denominator, false)
    }
}

impl Interpolator for LagrangeInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::Lagrange
    }

    fn points(&self) -> &PointSet {
        &self.points
    }

    fn explain(&self, x: f64) -> MathResult<Interpolation> {
        if let Some(exact) = Interpolation::exact(self.method(), &self.points, x) {
            return Ok(exact);
        }

        let xs = self.points.xs();
        let ys = self.points.ys();

        let mut value = 0.0;
        let mut bases = Vec::with_capacity(xs.len());
        let mut terms = Vec::with_capacity(xs.len());

        for (j, (&xj, &yj)) in xs.iter().zip(ys).enumerate() {
            let (l, degenerate) = self.basis(j, x);
            if degenerate {
                warn!("lagrange: basis {j} at x_j = {xj} has a near-zero denominator, using 0");
            }
            value += yj * l;
            terms.push((yj, l));
            bases.push(BasisTerm {
                j,
                xj,
                others: xs
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != j)
                    .map(|(_, &xi)| xi)
                    .collect(),
                value: l,
                degenerate,
            });
        }

        Ok(Interpolation {
            requested: self.method(),
            method_used: self.method(),
            value,
            steps: vec![
                Step::Formula {
                    formula: Formula::Lagrange,
                },
                Step::LagrangeBases { x, bases },
                Step::WeightedSum { x, terms, value },
            ],
        })
    }
}
