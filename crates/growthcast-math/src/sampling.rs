//! Curve sampling for plotting.
//!
//! A [`CurveSampler`] describes an evenly spaced grid over the data range
//! padded on both sides. Iterating it evaluates the chosen method at each
//! grid point on demand; iterating again starts over and yields the same
//! points.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::interpolation::{interpolate, InterpolationMethod};
use crate::points::PointSet;

/// Largest grid [`sample_curve`] will plan.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Grid settings for [`sample_curve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplerConfig {
    /// Padding added on each side, as a fraction of the data range.
    pub padding_fraction: f64,
    /// Number of steps the unpadded data range is divided into.
    pub steps: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            padding_fraction: 0.1,
            steps: 100,
        }
    }
}

impl SamplerConfig {
    /// Sets the padding fraction.
    #[must_use]
    pub fn with_padding_fraction(mut self, padding_fraction: f64) -> Self {
        self.padding_fraction = padding_fraction;
        self
    }

    /// Sets the number of steps across the data range.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }
}

/// A point on a sampled curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Abscissa.
    pub x: f64,
    /// Interpolated value.
    pub y: f64,
}

/// A finite, restartable grid of curve samples.
#[derive(Debug, Clone)]
pub struct CurveSampler {
    method: InterpolationMethod,
    points: PointSet,
    start: f64,
    step: f64,
    count: usize,
}

impl CurveSampler {
    /// First grid abscissa.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Grid spacing.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if there is nothing to sample.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Method evaluated at each sample.
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// Lazily evaluates the grid from the start.
    pub fn iter(&self) -> CurveIter<'_> {
        CurveIter {
            sampler: self,
            next: 0,
        }
    }

    /// Evaluates the whole grid.
    pub fn to_vec(&self) -> MathResult<Vec<CurvePoint>> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a CurveSampler {
    type Item = MathResult<CurvePoint>;
    type IntoIter = CurveIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`CurveSampler`].
#[derive(Debug, Clone)]
pub struct CurveIter<'a> {
    sampler: &'a CurveSampler,
    next: usize,
}

impl Iterator for CurveIter<'_> {
    type Item = MathResult<CurvePoint>;

    fn next(&mut self) -> Option<Self::Item> {
        let sampler = self.sampler;
        if self.next >= sampler.count {
            return None;
        }
        let x = sampler.start + self.next as f64 * sampler.step;
        self.next += 1;

        // Each sample is a complete, independent engine call.
        let result = interpolate(sampler.method, sampler.points.xs(), sampler.points.ys(), x);
        Some(result.map(|r| CurvePoint { x, y: r.value }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sampler.count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurveIter<'_> {}

/// Plans a plot-ready curve for `method` over the data.
///
/// The grid covers `[min - p·range, max + p·range]`, where `p` is the
/// configured padding fraction; the lower end is raised to 0 when the data
/// itself starts at or above 0. The spacing is `range / steps`.
///
/// `result` is the caller's previously computed interpolation value; when
/// it is `None` there is nothing to plot and the sampler is empty.
///
/// # Errors
///
/// Returns an error for malformed data or when every x is the same. The
/// configuration is rejected when it has zero steps, a negative or
/// non-finite padding, or a grid longer than [`MAX_SAMPLES`].
pub fn sample_curve(
    method: InterpolationMethod,
    xs: &[f64],
    ys: &[f64],
    result: Option<f64>,
    config: &SamplerConfig,
) -> MathResult<CurveSampler> {
    let points = PointSet::new(xs, ys)?;
    if config.steps == 0 {
        return Err(MathError::invalid_input("sampler needs at least one step"));
    }
    if !(config.padding_fraction >= 0.0 && config.padding_fraction.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "padding fraction must be finite and non-negative, got {}",
            config.padding_fraction
        )));
    }

    let min = points.min_x();
    let max = points.max_x();
    let range = max - min;
    if !(range > 0.0) {
        return Err(MathError::EmptyDomain { min, max });
    }

    let padding = range * config.padding_fraction;
    let mut start = min - padding;
    if min >= 0.0 {
        start = start.max(0.0);
    }
    let end = max + padding;
    let step = range / config.steps as f64;

    // Tolerance absorbs the rounding in (end - start) / step.
    let intervals = ((end - start) / step + 1e-9).floor();
    if !intervals.is_finite() || intervals >= MAX_SAMPLES as f64 {
        return Err(MathError::invalid_input(format!(
            "sampling grid would exceed {MAX_SAMPLES} points"
        )));
    }

    let count = match result {
        Some(_) => intervals as usize + 1,
        None => 0,
    };

    Ok(CurveSampler {
        method,
        points,
        start,
        step,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const XS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
    const YS: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 50.0];

    #[test]
    fn test_padded_domain() {
        let sampler = sample_curve(
            InterpolationMethod::Linear,
            &XS,
            &YS,
            Some(25.0),
            &SamplerConfig::default(),
        )
        .unwrap();

        // range 4, padding 0.4, step 0.04 over [0.6, 5.4]
        assert_relative_eq!(sampler.start(), 0.6, epsilon = 1e-12);
        assert_relative_eq!(sampler.step(), 0.04, epsilon = 1e-12);
        assert_eq!(sampler.len(), 121);

        let points = sampler.to_vec().unwrap();
        assert_relative_eq!(points[0].y, 6.0, epsilon = 1e-9);
        assert_relative_eq!(points.last().unwrap().x, 5.4, epsilon = 1e-9);
        assert_relative_eq!(points.last().unwrap().y, 54.0, epsilon = 1e-9);
    }

    #[test]
    fn test_low_end_clamped_at_zero() {
        let sampler = sample_curve(
            InterpolationMethod::Linear,
            &[0.5, 10.5],
            &[1.0, 2.0],
            Some(1.5),
            &SamplerConfig::default(),
        )
        .unwrap();

        assert_eq!(sampler.start(), 0.0);
    }

    #[test]
    fn test_negative_data_not_clamped() {
        let sampler = sample_curve(
            InterpolationMethod::Lagrange,
            &[-2.0, 0.0, 2.0],
            &[4.0, 0.0, 4.0],
            Some(1.0),
            &SamplerConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(sampler.start(), -2.4, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_result_yields_nothing() {
        let sampler = sample_curve(
            InterpolationMethod::NaturalCubicSpline,
            &XS,
            &YS,
            None,
            &SamplerConfig::default(),
        )
        .unwrap();

        assert!(sampler.is_empty());
        assert_eq!(sampler.iter().count(), 0);
    }

    #[test]
    fn test_restartable() {
        let sampler = sample_curve(
            InterpolationMethod::NaturalCubicSpline,
            &[1.0, 2.0, 3.0, 5.0],
            &[3.0, 3.5, 5.0, 8.0],
            Some(4.0),
            &SamplerConfig::default().with_steps(10),
        )
        .unwrap();

        let first = sampler.to_vec().unwrap();
        let second: Vec<CurvePoint> = (&sampler).into_iter().map(Result::unwrap).collect();
        assert_eq!(first, second);
        assert_eq!(sampler.iter().len(), first.len());
    }

    #[test]
    fn test_degenerate_domain() {
        let err = sample_curve(
            InterpolationMethod::Linear,
            &[2.0],
            &[1.0],
            Some(1.0),
            &SamplerConfig::default(),
        );
        assert!(matches!(err, Err(MathError::EmptyDomain { .. })));

        let err = sample_curve(
            InterpolationMethod::Linear,
            &XS,
            &YS,
            Some(1.0),
            &SamplerConfig::default().with_steps(0),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let sample = |config: SamplerConfig| {
            sample_curve(InterpolationMethod::Linear, &XS, &YS, Some(1.0), &config)
        };

        for config in [
            SamplerConfig::default().with_steps(usize::MAX),
            SamplerConfig::default().with_steps(MAX_SAMPLES),
            SamplerConfig::default().with_padding_fraction(1e300),
            SamplerConfig::default().with_padding_fraction(f64::INFINITY),
            SamplerConfig::default().with_padding_fraction(f64::NAN),
            SamplerConfig::default().with_padding_fraction(-0.5),
        ] {
            assert!(
                matches!(sample(config), Err(MathError::InvalidInput { .. })),
                "{config:?} was accepted"
            );
        }

        let unpadded = SamplerConfig::default()
            .with_padding_fraction(0.0)
            .with_steps(MAX_SAMPLES - 1);
        let largest = sample(unpadded).unwrap();
        assert!(largest.len() >= MAX_SAMPLES - 1 && largest.len() <= MAX_SAMPLES);
    }
}
