//! # Growthcast Math
//!
//! Numerical engine for estimating values of small, sorted time series.
//!
//! This crate provides:
//!
//! - **Interpolation**: Linear, Lagrange, Newton and natural cubic spline,
//!   each returning a value together with a structured derivation trace
//! - **Validation**: User-facing checks on raw form or command-line input
//! - **Sampling**: Lazy, restartable curve grids for plotting
//! - **Forecast**: Multi-year projections with growth statistics
//! - **Linear Algebra**: The tridiagonal solver behind the spline
//!
//! ## Design Philosophy
//!
//! - **Values stay exact**: Rounding happens only when rendering
//! - **Graceful degradation**: Degenerate spacing falls back to a
//!   documented method instead of failing
//! - **Stateless**: Every call sorts and fits its own copy of the data
//!
//! ## Example
//!
//! ```rust
//! use growthcast_math::prelude::*;
//!
//! let result = interpolate(
//!     InterpolationMethod::NaturalCubicSpline,
//!     &[1.0, 2.0],
//!     &[10.0, 20.0],
//!     1.5,
//! )
//! .unwrap();
//!
//! assert!(result.fallback());
//! assert_eq!(result.method_used, InterpolationMethod::Linear);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::if_not_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::single_match_else)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::derivable_impls)]

pub mod datasets;
pub mod error;
pub mod forecast;
pub mod interpolation;
pub mod linear_algebra;
pub mod points;
pub mod sampling;
pub mod trace;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::datasets::{example_for, ExampleData};
    pub use crate::error::{MathError, MathResult};
    pub use crate::forecast::{forecast, Forecast, ForecastConfig, Prediction};
    pub use crate::interpolation::{
        interpolate, interpolator, Interpolation, InterpolationMethod, Interpolator,
        LagrangeInterpolator, LinearInterpolator, NaturalCubicSpline, NewtonInterpolator,
    };
    pub use crate::points::PointSet;
    pub use crate::sampling::{sample_curve, CurvePoint, CurveSampler, SamplerConfig};
    pub use crate::trace::{RenderOptions, Step};
    pub use crate::validation::{
        parse_inputs, validate, ParsedInputs, RawValue, ValidationError, ValidationOutcome,
    };
}

pub use error::{MathError, MathResult};
pub use points::PointSet;
