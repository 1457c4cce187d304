//! End-to-end scenarios on the built-in datasets.

use approx::assert_relative_eq;
use growthcast_math::prelude::*;
use growthcast_math::trace::FallbackReason;

fn parsed(method: InterpolationMethod) -> ParsedInputs {
    let data = example_for(method);
    parse_inputs(&data.x, &data.y, &data.x_to_predict, method).unwrap()
}

fn raw(values: &[&str]) -> Vec<RawValue> {
    values.iter().map(|&v| v.into()).collect()
}

// =============================================================================
// INTERPOLATION
// =============================================================================

#[test]
fn linear_example_hits_the_line() {
    let input = parsed(InterpolationMethod::Linear);
    let result = interpolate(
        InterpolationMethod::Linear,
        &input.xs,
        &input.ys,
        input.x_to_predict,
    )
    .unwrap();

    assert_relative_eq!(result.value, 25.0, epsilon = 1e-12);
    let lines = result.render_steps(&RenderOptions::default());
    assert_eq!(lines.last().map(String::as_str), Some("y = 25.0000"));
}

#[test]
fn lagrange_and_newton_agree_on_example() {
    let input = parsed(InterpolationMethod::Lagrange);

    let lagrange = interpolate(InterpolationMethod::Lagrange, &input.xs, &input.ys, 3.0).unwrap();
    let newton = interpolate(
        InterpolationMethod::NewtonPolynomial,
        &input.xs,
        &input.ys,
        3.0,
    )
    .unwrap();

    assert_relative_eq!(lagrange.value, newton.value, epsilon = 1e-6);
}

#[test]
fn spline_example_differs_from_linear() {
    let input = parsed(InterpolationMethod::NaturalCubicSpline);

    let spline = interpolate(
        InterpolationMethod::NaturalCubicSpline,
        &input.xs,
        &input.ys,
        input.x_to_predict,
    )
    .unwrap();
    let linear = interpolate(
        InterpolationMethod::Linear,
        &input.xs,
        &input.ys,
        input.x_to_predict,
    )
    .unwrap();

    assert!(spline.value.is_finite());
    assert!(!spline.fallback());
    assert_relative_eq!(linear.value, 7.0, epsilon = 1e-12);
    assert!((spline.value - linear.value).abs() > 1e-6);
}

#[test]
fn spline_with_two_points_is_linear() {
    let xs = [1.0, 3.0];
    let ys = [2.0, 6.0];

    for at in [0.0, 1.5, 2.0, 4.0] {
        let spline = interpolate(InterpolationMethod::NaturalCubicSpline, &xs, &ys, at).unwrap();
        let linear = interpolate(InterpolationMethod::Linear, &xs, &ys, at).unwrap();

        assert_eq!(spline.value, linear.value);
        assert_eq!(spline.requested, InterpolationMethod::NaturalCubicSpline);
        assert_eq!(spline.method_used, InterpolationMethod::Linear);
        assert!(matches!(
            spline.steps[0],
            Step::Fallback {
                reason: FallbackReason::TooFewPoints { actual: 2 },
                ..
            }
        ));
    }
}

#[test]
fn spline_with_near_duplicate_x_falls_back() {
    let result = interpolate(
        InterpolationMethod::NaturalCubicSpline,
        &[1.0, 1.0 + 1e-12, 2.0, 3.0],
        &[1.0, 1.0, 2.0, 3.0],
        2.5,
    )
    .unwrap();

    assert_eq!(result.method_used, InterpolationMethod::Linear);
    assert_relative_eq!(result.value, 2.5, epsilon = 1e-12);
}

#[test]
fn linear_extends_end_segments() {
    let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
    let ys = [10.0, 20.0, 30.0, 40.0, 50.0];

    let below = interpolate(InterpolationMethod::Linear, &xs, &ys, -1.0).unwrap();
    let above = interpolate(InterpolationMethod::Linear, &xs, &ys, 8.0).unwrap();

    assert_relative_eq!(below.value, -10.0, epsilon = 1e-12);
    assert_relative_eq!(above.value, 80.0, epsilon = 1e-12);
}

#[test]
fn linear_guard_reports_coincident_x() {
    let err = interpolate(InterpolationMethod::Linear, &[1.0, 1.0], &[2.0, 3.0], 1.5);
    assert!(matches!(err, Err(MathError::DivisionByZero { .. })));
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn validator_rejects_duplicates() {
    let outcome = validate(
        &raw(&["1", "2", "2"]),
        &raw(&["1", "2", "3"]),
        &"1.5".into(),
        InterpolationMethod::Linear,
    );

    assert!(!outcome.is_valid);
    assert_eq!(
        outcome.error_message.as_deref(),
        Some("X values must be unique. Duplicate values are not allowed.")
    );
}

#[test]
fn validator_rejects_short_spline() {
    let x = raw(&["1", "2"]);
    let y = raw(&["1", "2"]);
    let at: RawValue = "1.5".into();

    assert!(!validate(&x, &y, &at, InterpolationMethod::NaturalCubicSpline).is_valid);
    assert!(validate(&x, &y, &at, InterpolationMethod::Linear).is_valid);
}

// =============================================================================
// SAMPLING AND FORECAST
// =============================================================================

#[test]
fn curve_covers_the_query() {
    let input = parsed(InterpolationMethod::NaturalCubicSpline);
    let result = interpolate(
        InterpolationMethod::NaturalCubicSpline,
        &input.xs,
        &input.ys,
        input.x_to_predict,
    )
    .unwrap();

    let sampler = sample_curve(
        InterpolationMethod::NaturalCubicSpline,
        &input.xs,
        &input.ys,
        Some(result.value),
        &SamplerConfig::default(),
    )
    .unwrap();
    let points = sampler.to_vec().unwrap();

    assert!(points.first().unwrap().x <= 1.0);
    assert!(points.last().unwrap().x >= 10.0);
    assert!(points.iter().all(|p| p.y.is_finite()));
}

#[test]
fn forecast_follows_quadratic_growth() {
    let years = [2019.0, 2020.0, 2021.0, 2022.0];
    let users: Vec<f64> = years.iter().map(|y| (y - 2015.0) * (y - 2015.0)).collect();

    let result = forecast(
        InterpolationMethod::NewtonPolynomial,
        &years,
        &users,
        &ForecastConfig::default().with_horizon(2),
    )
    .unwrap();

    assert_relative_eq!(result.predictions[0].value, 64.0, epsilon = 1e-6);
    assert_relative_eq!(result.predictions[1].value, 81.0, epsilon = 1e-6);
    assert!(result.predictions.iter().all(|p| !p.clamped));
    assert_eq!(result.data_points, 4);
}
