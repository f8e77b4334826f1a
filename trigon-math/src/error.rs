//! Error types for trigon-math.

use thiserror::Error;

/// Errors that can occur in geometric computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// Vector has zero length, cannot normalize.
    #[error("cannot normalize zero-length vector")]
    ZeroLengthVector,

    /// Line has zero length (start == end).
    #[error("line has zero length")]
    ZeroLengthLine,

    /// Lines are parallel, no intersection.
    #[error("lines are parallel")]
    ParallelLines,

    /// Triangle vertices are collinear within tolerance.
    #[error("triangle is degenerate (collinear vertices)")]
    DegenerateTriangle,

    /// A coordinate is NaN or infinite.
    #[error("coordinate is not finite")]
    NonFiniteCoordinate,

    /// Arguments are outside the operation's domain.
    #[error("value is out of valid domain")]
    DomainError,
}

/// Result type for math operations.
pub type MathResult<T> = Result<T, MathError>;
