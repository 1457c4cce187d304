//! Derivation traces.
//!
//! Interpolators record what they did as a list of typed [`Step`]s holding
//! full-precision numbers. Rounding happens only when a [`RenderOptions`]
//! turns the steps into text, so the numeric core never formats anything.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interpolation::InterpolationMethod;

/// Where a query point sits relative to the data range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Position {
    /// Inside `[min_x, max_x]`.
    Inside,
    /// Below the smallest x; the first segment is extended.
    Below,
    /// Above the largest x; the last segment is extended.
    Above,
}

impl Position {
    /// Classifies `x` against `[min, max]`.
    #[must_use]
    pub fn of(x: f64, min: f64, max: f64) -> Self {
        if x < min {
            Self::Below
        } else if x > max {
            Self::Above
        } else {
            Self::Inside
        }
    }

    fn note(self) -> &'static str {
        match self {
            Self::Inside => "",
            Self::Below => " (extrapolating below the data)",
            Self::Above => " (extrapolating above the data)",
        }
    }
}

/// Formula templates shown before the substituted arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Formula {
    /// Two-point line.
    Linear,
    /// Sum of weighted Lagrange basis polynomials.
    Lagrange,
    /// Newton forward form.
    Newton,
    /// Cubic on one spline segment.
    CubicSegment,
}

/// Why the spline delegated to linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FallbackReason {
    /// Fewer than three points.
    TooFewPoints {
        /// Points available.
        actual: usize,
    },
    /// Two x values closer than the spacing tolerance.
    DegenerateSpacing,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { actual } => write!(
                f,
                "a cubic spline needs at least 3 data points, only {actual} available"
            ),
            Self::DegenerateSpacing => {
                write!(f, "x values are duplicated or too close together")
            }
        }
    }
}

/// One Lagrange basis polynomial evaluated at the query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasisTerm {
    /// Basis index.
    pub j: usize,
    /// Node `x_j`.
    pub xj: f64,
    /// The other nodes `x_i`, `i != j`.
    pub others: Vec<f64>,
    /// `L_j(x)`.
    pub value: f64,
    /// True when a near-zero denominator forced the term to zero.
    pub degenerate: bool,
}

/// A spacing `h_i = x_{i+1} - x_i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    /// `x_i`.
    pub lo: f64,
    /// `x_{i+1}`.
    pub hi: f64,
    /// `h_i`.
    pub h: f64,
}

/// A typed record of one derivation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Step {
    /// The query point is one of the data points.
    ExactMatch {
        /// Query point.
        x: f64,
        /// Stored y.
        y: f64,
    },
    /// The method gave up and handed over to a simpler one.
    Fallback {
        /// Method that was asked for.
        from: InterpolationMethod,
        /// Method that ran instead.
        to: InterpolationMethod,
        /// Why.
        reason: FallbackReason,
    },
    /// The two points defining the line through the query point.
    BracketingPoints {
        /// Query point.
        x: f64,
        /// Left point.
        x0: f64,
        /// Left value.
        y0: f64,
        /// Right point.
        x1: f64,
        /// Right value.
        y1: f64,
        /// Query position relative to the data.
        position: Position,
    },
    /// A formula template.
    Formula {
        /// Which formula.
        formula: Formula,
    },
    /// The linear formula with values substituted.
    LinearSubstitution {
        /// Query point.
        x: f64,
        /// Left point.
        x0: f64,
        /// Left value.
        y0: f64,
        /// Right point.
        x1: f64,
        /// Right value.
        y1: f64,
        /// Result.
        value: f64,
    },
    /// Every Lagrange basis polynomial at the query point.
    LagrangeBases {
        /// Query point.
        x: f64,
        /// One entry per node.
        bases: Vec<BasisTerm>,
    },
    /// `Σ y_j L_j(x)`.
    WeightedSum {
        /// Query point.
        x: f64,
        /// `(y_j, L_j(x))` pairs.
        terms: Vec<(f64, f64)>,
        /// Result.
        value: f64,
    },
    /// Leading columns of the divided-difference table.
    DividedDifferences {
        /// Sorted nodes.
        xs: Vec<f64>,
        /// Row `i` holds `f[x_i]`, `f[x_i, x_{i+1}]`, ... up to the shown order.
        rows: Vec<Vec<f64>>,
    },
    /// Newton form with coefficients substituted.
    NewtonPolynomial {
        /// Leading coefficients `f[x_0..x_k]`.
        coefficients: Vec<f64>,
        /// Centers `x_0, x_1, ...`.
        centers: Vec<f64>,
        /// True when higher-order terms were left out of the display.
        truncated: bool,
    },
    /// Leading spline spacings.
    SplineSpacings {
        /// Shown spacings.
        spacings: Vec<Spacing>,
        /// Number of spacings overall.
        total: usize,
    },
    /// The tridiagonal system for the second-derivative coefficients.
    TridiagonalSolved {
        /// Size of the system.
        unknowns: usize,
        /// Pivots that had to be clamped away from zero.
        clamped_pivots: usize,
    },
    /// The spline segment used for the query point.
    SplineInterval {
        /// Query point.
        x: f64,
        /// Segment index.
        index: usize,
        /// Left knot.
        lo: f64,
        /// Right knot.
        hi: f64,
        /// Query position relative to the data.
        position: Position,
    },
    /// Coefficients of the chosen segment.
    SplineCoefficients {
        /// Constant term.
        a: f64,
        /// Linear term.
        b: f64,
        /// Quadratic term.
        c: f64,
        /// Cubic term.
        d: f64,
    },
    /// The segment cubic evaluated step by step.
    SplineEvaluation {
        /// Query point.
        x: f64,
        /// Left knot of the segment.
        xi: f64,
        /// Constant term.
        a: f64,
        /// Linear term.
        b: f64,
        /// Quadratic term.
        c: f64,
        /// Cubic term.
        d: f64,
        /// Result.
        value: f64,
    },
    /// Final value of a polynomial at the query point.
    Evaluated {
        /// Name of the evaluated function, e.g. `P`.
        symbol: char,
        /// Query point.
        x: f64,
        /// Result.
        value: f64,
    },
}

/// Display precision for rendered traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Decimals for values and plain arithmetic.
    pub value_decimals: usize,
    /// Decimals for basis values, coefficients and differences.
    pub coefficient_decimals: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            value_decimals: 4,
            coefficient_decimals: 6,
        }
    }
}

impl RenderOptions {
    /// Sets the value precision.
    #[must_use]
    pub fn with_value_decimals(mut self, decimals: usize) -> Self {
        self.value_decimals = decimals;
        self
    }

    /// Sets the coefficient precision.
    #[must_use]
    pub fn with_coefficient_decimals(mut self, decimals: usize) -> Self {
        self.coefficient_decimals = decimals;
        self
    }

    /// Renders steps to text. Steps that open a new stage are numbered.
    pub fn render(&self, steps: &[Step]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut stage = 0;
        for step in steps {
            let (heading, body) = self.render_step(step);
            if let Some(heading) = heading {
                stage += 1;
                lines.push(format!("Step {stage}: {heading}"));
            }
            lines.extend(body);
        }
        lines
    }

    fn v(&self, x: f64) -> String {
        format!("{:.*}", self.value_decimals, x)
    }

    fn c(&self, x: f64) -> String {
        format!("{:.*}", self.coefficient_decimals, x)
    }

    fn render_step(&self, step: &Step) -> (Option<String>, Vec<String>) {
        match step {
            Step::ExactMatch { x, y } => (
                Some(format!("x = {x} appears directly in the data")),
                vec![
                    format!("The point is ({x}, {y})"),
                    "No interpolation is needed".to_string(),
                    format!("y = {y}"),
                ],
            ),
            Step::Fallback { from, to, reason } => (
                Some(format!("{from} is not applicable, using {to} instead")),
                vec![format!("Reason: {reason}")],
            ),
            Step::BracketingPoints {
                x,
                x0,
                y0,
                x1,
                y1,
                position,
            } => (
                Some(format!(
                    "Identify the two data points nearest x = {}{}",
                    self.v(*x),
                    position.note()
                )),
                vec![
                    format!("- Point 1: ({x0}, {y0})"),
                    format!("- Point 2: ({x1}, {y1})"),
                ],
            ),
            Step::Formula { formula } => render_formula(*formula),
            Step::LinearSubstitution {
                x,
                x0,
                y0,
                x1,
                y1,
                value,
            } => {
                let dx = x - x0;
                let dy = y1 - y0;
                let h = x1 - x0;
                (
                    None,
                    vec![
                        format!("y = {y0} + (({x} - {x0}) × ({y1} - {y0})) / ({x1} - {x0})"),
                        format!(
                            "y = {y0} + (({}) × ({})) / ({})",
                            self.v(dx),
                            self.v(dy),
                            self.v(h)
                        ),
                        format!("y = {y0} + ({} / {})", self.v(dx * dy), self.v(h)),
                        format!("y = {y0} + {}", self.v(dx * dy / h)),
                        format!("y = {}", self.v(*value)),
                    ],
                )
            }
            Step::LagrangeBases { x, bases } => {
                let lines = bases
                    .iter()
                    .map(|basis| {
                        let factors = if basis.others.is_empty() {
                            "1".to_string()
                        } else {
                            basis
                                .others
                                .iter()
                                .map(|xi| format!("({x} - {xi}) / ({} - {xi})", basis.xj))
                                .collect::<Vec<_>>()
                                .join(" × ")
                        };
                        let suffix = if basis.degenerate {
                            " (nodes too close, term set to zero)"
                        } else {
                            ""
                        };
                        format!(
                            "L_{}({x}) = {factors} = {}{suffix}",
                            basis.j,
                            self.c(basis.value)
                        )
                    })
                    .collect();
                (
                    Some(format!(
                        "Compute each Lagrange basis polynomial L_j(x) at x = {x}:"
                    )),
                    lines,
                )
            }
            Step::WeightedSum { x, terms, value } => {
                let plain = terms
                    .iter()
                    .map(|(y, l)| format!("{y} × {}", self.c(*l)))
                    .collect::<Vec<_>>();
                let grouped = plain.iter().map(|t| format!("({t})")).collect::<Vec<_>>();
                (
                    Some("Multiply each basis polynomial by its y value and sum:".to_string()),
                    vec![
                        format!("P({x}) = {}", plain.join(" + ")),
                        format!("P({x}) = {} = {}", grouped.join(" + "), self.c(*value)),
                    ],
                )
            }
            Step::DividedDifferences { xs, rows } => {
                let orders = rows.first().map_or(0, |row| row.len().saturating_sub(1));
                let mut header = "  x   |   f[x]".to_string();
                for k in 1..=orders {
                    header.push_str(&format!("   |  f[x,x+{k}]"));
                }
                let mut lines = vec!["Divided-difference table:".to_string(), header];
                for (x, row) in xs.iter().zip(rows) {
                    let mut line = format!("{} | {}", self.v(*x), self.v(row[0]));
                    for diff in &row[1..] {
                        line.push_str(&format!(" | {}", self.c(*diff)));
                    }
                    lines.push(line);
                }
                (
                    Some("Build Newton's divided-difference table".to_string()),
                    lines,
                )
            }
            Step::NewtonPolynomial {
                coefficients,
                centers,
                truncated,
            } => {
                let mut expr = match coefficients.first() {
                    Some(c0) => format!("P(x) = {}", self.v(*c0)),
                    None => "P(x) = 0".to_string(),
                };
                for (k, coefficient) in coefficients.iter().enumerate().skip(1) {
                    let sign = if *coefficient >= 0.0 { " + " } else { " - " };
                    let factors = centers[..k]
                        .iter()
                        .map(|xm| format!("(x - {})", self.v(*xm)))
                        .collect::<Vec<_>>()
                        .join(" × ");
                    expr.push_str(&format!("{sign}{} × {factors}", self.c(coefficient.abs())));
                }
                if *truncated {
                    expr.push_str(" + …");
                }
                (None, vec![expr])
            }
            Step::SplineSpacings { spacings, total } => {
                let mut lines: Vec<String> = spacings
                    .iter()
                    .enumerate()
                    .map(|(i, s)| format!("h[{i}] = {} - {} = {}", s.hi, s.lo, self.c(s.h)))
                    .collect();
                if *total > spacings.len() {
                    lines.push(format!("… {total} spacings in total"));
                }
                (
                    Some("Sort the data points and compute the spacings h".to_string()),
                    lines,
                )
            }
            Step::TridiagonalSolved {
                unknowns,
                clamped_pivots,
            } => {
                let mut lines = vec![format!(
                    "(Solved the {unknowns}×{unknowns} tridiagonal system for the spline coefficients)"
                )];
                if *clamped_pivots > 0 {
                    lines.push(format!(
                        "{clamped_pivots} near-zero pivot(s) replaced by a small epsilon"
                    ));
                }
                (
                    Some(
                        "Set up the tridiagonal system for the second-derivative coefficients"
                            .to_string(),
                    ),
                    lines,
                )
            }
            Step::SplineInterval {
                x,
                index,
                lo,
                hi,
                position,
            } => (
                Some(format!(
                    "Find the interval containing x = {x}{}",
                    position.note()
                )),
                vec![format!(
                    "Interval {index}: [{}, {}]",
                    self.v(*lo),
                    self.v(*hi)
                )],
            ),
            Step::SplineCoefficients { a, b, c, d } => (
                Some("Cubic spline coefficients for this interval".to_string()),
                vec![
                    format!("a = {} (constant)", self.c(*a)),
                    format!("b = {} (coefficient of x)", self.c(*b)),
                    format!("c = {} (coefficient of x²)", self.c(*c)),
                    format!("d = {} (coefficient of x³)", self.c(*d)),
                ],
            ),
            Step::SplineEvaluation {
                x,
                xi,
                a,
                b,
                c,
                d,
                value,
            } => {
                let dx = x - xi;
                (
                    None,
                    vec![
                        format!(
                            "S({x}) = {} + {}({x}-{xi}) + {}({})² + {}({})³",
                            self.c(*a),
                            self.c(*b),
                            self.c(*c),
                            self.c(dx),
                            self.c(*d),
                            self.c(dx)
                        ),
                        format!(
                            "S({x}) = {} + {} + {} + {}",
                            self.c(*a),
                            self.c(b * dx),
                            self.c(c * dx.powi(2)),
                            self.c(d * dx.powi(3))
                        ),
                        format!("S({x}) = {}", self.c(*value)),
                    ],
                )
            }
            Step::Evaluated { symbol, x, value } => (
                Some(format!("Evaluate at x = {x}")),
                vec![format!("{symbol}({x}) = {}", self.c(*value))],
            ),
        }
    }
}

fn render_formula(formula: Formula) -> (Option<String>, Vec<String>) {
    match formula {
        Formula::Linear => (
            Some("Apply the linear interpolation formula:".to_string()),
            vec!["y = y₀ + ((x - x₀) × (y₁ - y₀)) / (x₁ - x₀)".to_string()],
        ),
        Formula::Lagrange => (
            Some("Apply the Lagrange interpolation formula:".to_string()),
            vec![
                "P(x) = Σ y_j × L_j(x)".to_string(),
                "where L_j(x) = Π (x - x_i) / (x_j - x_i) for all i ≠ j".to_string(),
            ],
        ),
        Formula::Newton => (
            Some("Write the Newton polynomial using the divided differences:".to_string()),
            vec!["P(x) = f[x₀] + f[x₀,x₁](x - x₀) + f[x₀,x₁,x₂](x - x₀)(x - x₁) + …".to_string()],
        ),
        Formula::CubicSegment => (
            Some("Evaluate the cubic spline polynomial on this interval:".to_string()),
            vec!["S(x) = a + b(x-xi) + c(x-xi)² + d(x-xi)³".to_string()],
        ),
    }
}
