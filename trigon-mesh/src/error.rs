//! Error types for trigon-mesh.

use thiserror::Error;

use trigon_math::MathError;

/// Errors surfaced by the triangulator and the arena engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriangulateError {
    /// `triangulate()` called more than once.
    #[error("triangulate() must only be called once")]
    AlreadyTriangulated,

    /// A result accessor was called before `triangulate()`.
    #[error("triangulate() must be called before querying results")]
    NotTriangulatedYet,

    /// Point location failed to find a containing triangle.
    #[error("point lies outside the bounded triangulation space")]
    PointOutsideDomain,

    /// An inserted point coincides with an existing vertex.
    #[error("point coincides with an already triangulated vertex")]
    DuplicatePoint,

    /// A point expected on a triangle's boundary lies on none of its edges.
    #[error("point does not lie on any edge of the triangle")]
    PointNotOnBoundary,

    /// Diagonal swap requested for triangles without a shared edge.
    #[error("triangles {0} and {1} share no edge")]
    NoSharedEdge(usize, usize),

    /// `split` called with an unsupported position pair.
    #[error("unsupported split position pair")]
    PositionOutOfRange,

    /// A vertex index does not refer to a pooled vertex.
    #[error("vertex index {0} is out of range")]
    VertexIndexOutOfRange(usize),

    /// The operation is intentionally unsupported.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Geometric failure propagated from the math kernel.
    #[error("math error: {0}")]
    Math(#[from] MathError),
}

/// Result type for triangulation operations.
pub type TriangulateResult<T> = Result<T, TriangulateError>;
