/// Failures of the curve arithmetic itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    /// The x-coordinate is `>= p` or `x³ + 7` has no square root.
    #[error("x-coordinate does not correspond to a point on the curve")]
    PointNotOnCurve,
    /// Attempted to invert zero.
    #[error("zero has no multiplicative inverse")]
    DivisionByZero,
}
