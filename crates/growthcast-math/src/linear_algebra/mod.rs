//! Linear algebra utilities.
//!
//! The spline needs one tridiagonal solve per construction; nothing larger.

use log::warn;

use crate::error::{MathError, MathResult};

/// Pivots smaller in magnitude than this are replaced by it.
pub const PIVOT_EPSILON: f64 = 1e-10;

/// Solution of a tridiagonal system.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSolution {
    /// Solution vector.
    pub x: Vec<f64>,
    /// Number of pivots that were clamped to [`PIVOT_EPSILON`].
    pub clamped_pivots: usize,
}

/// Solves a tridiagonal system of equations with the Thomas algorithm.
///
/// The system has the form:
/// ```text
/// | b[0]  c[0]   0    ...   0   | | x[0]   |   | d[0]   |
/// | a[0]  b[1]  c[1]  ...   0   | | x[1]   |   | d[1]   |
/// |  0    a[1]  b[2]  ...   0   | | x[2]   | = | d[2]   |
/// | ...   ...   ...   ...  ...  | | ...    |   | ...    |
/// |  0     0     0   a[n-2] b[n-1] | | x[n-1] |   | d[n-1] |
/// ```
///
/// A forward-sweep pivot with `|pivot| < PIVOT_EPSILON` is replaced by
/// `PIVOT_EPSILON` rather than reported as singular.
///
/// # Arguments
///
/// * `a` - Lower diagonal (length n-1)
/// * `b` - Main diagonal (length n)
/// * `c` - Upper diagonal (length n-1)
/// * `d` - Right-hand side (length n)
pub fn solve_tridiagonal(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    d: &[f64],
) -> MathResult<TridiagonalSolution> {
    let n = b.len();

    if n == 0 {
        return Ok(TridiagonalSolution {
            x: vec![],
            clamped_pivots: 0,
        });
    }

    if a.len() != n - 1 || c.len() != n - 1 || d.len() != n {
        return Err(MathError::invalid_input(
            "Tridiagonal system has inconsistent dimensions",
        ));
    }

    let mut clamped_pivots = 0;
    let mut clamp = |pivot: f64, row: usize| {
        if pivot.abs() < PIVOT_EPSILON {
            warn!("tridiagonal: pivot {pivot:.2e} in row {row} clamped to {PIVOT_EPSILON:e}");
            clamped_pivots += 1;
            PIVOT_EPSILON
        } else {
            pivot
        }
    };

    // Forward elimination
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    let pivot = clamp(b[0], 0);
    if n > 1 {
        c_prime[0] = c[0] / pivot;
    }
    d_prime[0] = d[0] / pivot;

    for i in 1..n {
        let pivot = clamp(b[i] - a[i - 1] * c_prime[i - 1], i);

        if i < n - 1 {
            c_prime[i] = c[i] / pivot;
        }
        d_prime[i] = (d[i] - a[i - 1] * d_prime[i - 1]) / pivot;
    }

    // Back substitution
    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];

    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    Ok(TridiagonalSolution { x, clamped_pivots })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tridiagonal_simple() {
        // Simple 3x3 system
        let a = vec![1.0, 1.0];
        let b = vec![2.0, 2.0, 2.0];
        let c = vec![1.0, 1.0];
        let d = vec![1.0, 2.0, 3.0];

        let solution = solve_tridiagonal(&a, &b, &c, &d).unwrap();
        let x = &solution.x;

        // Verify solution
        assert_relative_eq!(b[0] * x[0] + c[0] * x[1], d[0], epsilon = 1e-10);
        assert_relative_eq!(
            a[0] * x[0] + b[1] * x[1] + c[1] * x[2],
            d[1],
            epsilon = 1e-10
        );
        assert_relative_eq!(a[1] * x[1] + b[2] * x[2], d[2], epsilon = 1e-10);
        assert_eq!(solution.clamped_pivots, 0);
    }

    #[test]
    fn test_single_equation() {
        let solution = solve_tridiagonal(&[], &[4.0], &[], &[2.0]).unwrap();
        assert_eq!(solution.x, vec![0.5]);
    }

    #[test]
    fn test_zero_pivot_is_clamped() {
        let solution = solve_tridiagonal(&[], &[0.0], &[], &[1e-12]).unwrap();

        assert_eq!(solution.clamped_pivots, 1);
        assert_relative_eq!(solution.x[0], 1e-2, epsilon = 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        assert!(solve_tridiagonal(&[1.0], &[1.0, 1.0], &[], &[1.0, 1.0]).is_err());
        assert!(solve_tridiagonal(&[], &[], &[], &[]).unwrap().x.is_empty());
    }
}
