//! Point set normalization.
//!
//! Every interpolator works on an x-ascending projection of the caller's
//! data. [`PointSet`] builds that projection through an index permutation,
//! so each `(x, y)` pair survives the sort intact and equal x keys keep
//! their input order.

use serde::Serialize;

use crate::error::{MathError, MathResult};

/// Two x values closer than this are treated as the same abscissa.
pub const X_EPSILON: f64 = 1e-10;

/// A finite, non-empty set of sample points sorted by x.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSet {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl PointSet {
    /// Sorts `(xs[k], ys[k])` pairs by x.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequences are empty or their lengths differ.
    pub fn new(xs: &[f64], ys: &[f64]) -> MathResult<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }

        let mut order: Vec<usize> = (0..xs.len()).collect();
        // sort_by is stable, total_cmp keeps NaN from poisoning the order
        order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));

        Ok(Self {
            xs: order.iter().map(|&i| xs[i]).collect(),
            ys: order.iter().map(|&i| ys[i]).collect(),
        })
    }

    /// Sorted x values.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// y values, paired index-for-index with [`xs`](Self::xs).
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Never true for a constructed set, which holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Smallest x.
    pub fn min_x(&self) -> f64 {
        self.xs[0]
    }

    /// Largest x.
    pub fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    /// Index of a point whose x equals `x` exactly.
    pub fn exact_index(&self, x: f64) -> Option<usize> {
        self.xs.iter().position(|&xi| xi == x)
    }

    /// Returns true if two x values coincide exactly.
    pub fn has_duplicate_x(&self) -> bool {
        self.xs.windows(2).any(|w| w[0] == w[1])
    }

    /// Returns true if two adjacent x values are closer than [`X_EPSILON`].
    pub fn has_near_duplicate_x(&self) -> bool {
        self.xs.windows(2).any(|w| (w[1] - w[0]).abs() < X_EPSILON)
    }

    /// Finds the segment `[xs[i], xs[i+1]]` used for `x`.
    ///
    /// Points inside the data range get the first segment that contains
    /// them; points below or above it get the first or last segment.
    /// Requires at least two points.
    pub(crate) fn find_segment(&self, x: f64) -> usize {
        let last = self.xs.len().saturating_sub(2);
        if x < self.xs[0] {
            return 0;
        }
        self.xs
            .windows(2)
            .position(|w| w[0] <= x && x <= w[1])
            .unwrap_or(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_pairs_together() {
        let points = PointSet::new(&[3.0, 1.0, 2.0], &[30.0, 10.0, 20.0]).unwrap();

        assert_eq!(points.xs(), &[1.0, 2.0, 3.0]);
        assert_eq!(points.ys(), &[10.0, 20.0, 30.0]);
        assert_eq!(points.min_x(), 1.0);
        assert_eq!(points.max_x(), 3.0);
        assert!(!points.is_empty());
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let points = PointSet::new(&[2.0, 1.0, 2.0], &[5.0, 1.0, 7.0]).unwrap();

        assert_eq!(points.xs(), &[1.0, 2.0, 2.0]);
        assert_eq!(points.ys(), &[1.0, 5.0, 7.0]);
        assert!(points.has_duplicate_x());
        assert!(points.has_near_duplicate_x());
    }

    #[test]
    fn test_near_duplicates() {
        let points = PointSet::new(&[1.0, 1.0 + 1e-12, 3.0], &[0.0, 0.0, 0.0]).unwrap();

        assert!(!points.has_duplicate_x());
        assert!(points.has_near_duplicate_x());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            PointSet::new(&[1.0, 2.0], &[1.0]),
            Err(MathError::LengthMismatch { xs: 2, ys: 1 })
        ));
        assert!(PointSet::new(&[], &[]).is_err());
    }

    #[test]
    fn test_find_segment() {
        let points = PointSet::new(&[0.0, 1.0, 2.0, 4.0], &[0.0; 4]).unwrap();

        assert_eq!(points.find_segment(-3.0), 0);
        assert_eq!(points.find_segment(0.5), 0);
        assert_eq!(points.find_segment(1.0), 0);
        assert_eq!(points.find_segment(3.0), 2);
        assert_eq!(points.find_segment(9.0), 2);
    }

    #[test]
    fn test_exact_index() {
        let points = PointSet::new(&[5.0, 1.0], &[50.0, 10.0]).unwrap();

        assert_eq!(points.exact_index(5.0), Some(1));
        assert_eq!(points.exact_index(4.999), None);
    }
}
