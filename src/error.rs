use thiserror::Error;

/// Raised when curve or surface inputs cannot describe a valid spline
///
/// Every variant is an input validation failure. Nothing is partially computed
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidCurveError {
    #[error("Curves of degree {degree} require at least {required} control points, got {actual}")]
    TooFewControlPoints {
        degree: usize,
        required: usize,
        actual: usize,
    },

    #[error("Degree must be at least {minimum}, got {degree}")]
    DegreeTooLow { degree: usize, minimum: usize },

    #[error(
        "Invalid number of knots. Curves with {control_points} control points must have a knot vector of length {expected}. \
         Received a knot vector of length {actual}: {knots:?}. \
         Total knot count must equal the number of control points + degree + 1"
    )]
    KnotCountMismatch {
        control_points: usize,
        expected: usize,
        actual: usize,
        knots: Vec<f64>,
    },

    #[error("Knot vector must be non-decreasing, knot {index} ({value}) is less than {previous}")]
    DecreasingKnots {
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error("Knot {index} is not finite")]
    NonFiniteKnot { index: usize },

    #[error("Degenerate knot span: knots {left} and {right} are equal")]
    DegenerateKnotSpan { left: usize, right: usize },

    #[error("Parameter must be finite, got {0}")]
    NonFiniteParameter(f64),

    #[error("Non-rectangular control grid: row {row} has {actual} control points, expected {expected}")]
    NonRectangularGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
