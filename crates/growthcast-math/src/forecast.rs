//! Multi-step forecasting past the end of a yearly series.
//!
//! A forecast projects the series one whole step at a time past the last
//! observed year, using the chosen interpolation method for every step,
//! and summarizes the growth it implies.

use log::{debug, warn};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::interpolation::{interpolate, InterpolationMethod};
use crate::points::PointSet;
use crate::validation::validate_series;

/// Decimal places kept in reported figures.
const REPORT_DP: u32 = 2;

/// Forecast settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastConfig {
    /// Number of whole steps to project.
    pub horizon: usize,
    /// Replace negative projections with the smallest observed value.
    pub clamp_negative: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 1,
            clamp_negative: true,
        }
    }
}

impl ForecastConfig {
    /// Sets the horizon.
    #[must_use]
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Enables or disables clamping of negative projections.
    #[must_use]
    pub fn with_clamp_negative(mut self, clamp_negative: bool) -> Self {
        self.clamp_negative = clamp_negative;
        self
    }
}

/// One projected point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Target year.
    pub x: f64,
    /// Projected value, full precision.
    pub value: f64,
    /// Projected value rounded for display.
    pub rounded: Decimal,
    /// Growth over the previous value, in percent.
    pub growth_rate: Decimal,
    /// True if a negative projection was replaced.
    pub clamped: bool,
}

/// A projection of the series past its last year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    /// Method the caller asked for.
    pub requested: InterpolationMethod,
    /// Method that produced the projections.
    pub method_used: InterpolationMethod,
    /// Short description of the fitted model.
    pub equation: String,
    /// Projected points, in year order.
    pub predictions: Vec<Prediction>,
    /// Mean of the per-step growth rates, in percent.
    pub average_growth_rate: Decimal,
    /// Growth from the last observed value to the final projection, in percent.
    pub total_growth: Decimal,
    /// Number of observed points.
    pub data_points: usize,
    /// First and last observed year.
    pub historical_range: (f64, f64),
}

/// Projects `config.horizon` years past the last observed year.
///
/// Years must be consecutive whole numbers and values strictly positive.
/// Every projected year is a separate interpolation call on the same data.
///
/// # Example
///
/// ```rust
/// use growthcast_math::forecast::{forecast, ForecastConfig};
/// use growthcast_math::interpolation::InterpolationMethod;
///
/// let years = [2021.0, 2022.0, 2023.0];
/// let users = [100.0, 120.0, 140.0];
///
/// let result = forecast(
///     InterpolationMethod::Linear,
///     &years,
///     &users,
///     &ForecastConfig::default().with_horizon(2),
/// )
/// .unwrap();
///
/// assert_eq!(result.predictions.len(), 2);
/// assert_eq!(result.predictions[1].x, 2025.0);
/// ```
pub fn forecast(
    method: InterpolationMethod,
    xs: &[f64],
    ys: &[f64],
    config: &ForecastConfig,
) -> MathResult<Forecast> {
    validate_series(xs, ys)?;
    if config.horizon == 0 {
        return Err(MathError::invalid_input("forecast horizon must be at least 1"));
    }

    let points = PointSet::new(xs, ys)?;
    let first_year = points.min_x();
    let last_year = points.max_x();
    let last_value = points.ys()[points.len() - 1];
    let floor = points.ys().iter().copied().fold(f64::INFINITY, f64::min);

    debug!(
        "forecast: {method} over {} points, {} step(s) past {last_year}",
        points.len(),
        config.horizon
    );

    let mut method_used = method;
    let mut predictions = Vec::with_capacity(config.horizon);
    let mut base = last_value;

    for step in 1..=config.horizon {
        let x = last_year + step as f64;
        let result = interpolate(method, points.xs(), points.ys(), x)?;
        method_used = result.method_used;

        let mut value = result.value;
        let mut clamped = false;
        if config.clamp_negative && !(value >= 0.0 && value.is_finite()) {
            warn!("forecast: projection {value} at {x} replaced by {floor}");
            value = floor;
            clamped = true;
        }

        predictions.push(Prediction {
            x,
            value,
            rounded: round(value)?,
            growth_rate: round(percent_change(base, value))?,
            clamped,
        });
        base = value;
    }

    let rate_sum: Decimal = predictions.iter().map(|p| p.growth_rate).sum();
    let average_growth_rate = (rate_sum / Decimal::from(predictions.len())).round_dp(REPORT_DP);
    let final_value = predictions.last().map_or(last_value, |p| p.value);
    let total_growth = round(percent_change(last_value, final_value))?;

    Ok(Forecast {
        requested: method,
        method_used,
        equation: equation(method_used, &points),
        predictions,
        average_growth_rate,
        total_growth,
        data_points: points.len(),
        historical_range: (first_year, last_year),
    })
}

/// Percent change from `base` to `value`; zero when the base is not positive.
fn percent_change(base: f64, value: f64) -> f64 {
    if base > 0.0 {
        (value - base) / base * 100.0
    } else {
        0.0
    }
}

fn round(value: f64) -> MathResult<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(REPORT_DP))
        .ok_or_else(|| MathError::invalid_input(format!("projection {value} is not representable")))
}

fn equation(method: InterpolationMethod, points: &PointSet) -> String {
    let n = points.len();
    match method {
        InterpolationMethod::Linear => format!(
            "Linear: y = y0 + (x - x0)(y1 - y0)/(x1 - x0), from {} to {}",
            points.min_x(),
            points.max_x()
        ),
        InterpolationMethod::Lagrange => format!(
            "Lagrange: L(x) = sum of y_i * prod (x - x_j)/(x_i - x_j) over {n} points"
        ),
        InterpolationMethod::NewtonPolynomial => format!(
            "Newton: P(x) = f[x0] + f[x0,x1](x - x0) + ..., degree {}",
            n.saturating_sub(1)
        ),
        InterpolationMethod::NaturalCubicSpline => {
            format!("Natural cubic spline: piecewise cubics S_i(x) through {n} points")
        }
    }
}
