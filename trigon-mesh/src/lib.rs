//! Trigon Mesh - an incremental Delaunay triangulation engine.
//!
//! The crate triangulates a planar vertex set carrying polygon context:
//! vertices are pooled, stamped into a polygon boundary (and optional hole
//! boundaries), and inserted one by one into an adjacency-aware triangle
//! arena seeded with an enclosing super-triangle. Each insertion either fans
//! an interior point into three triangles or splits the two triangles
//! flanking an edge point; an optional legalization pass then flips
//! diagonals until every touched edge satisfies the local Delaunay
//! criterion (no flip can improve the minimum interior angle).
//!
//! # Layout
//!
//! - [`Triangle`] - three pooled vertex indices plus derived edge queries
//! - [`AdjacencyTriangle`] - a triangle with three neighbor slots and the
//!   local mutations (edge swap halves, splits, neighbor binding)
//! - [`TriangleArena`] - append-only storage and the insertion/flip engine
//! - [`Triangulator`] - vertex pool, builders, the driving loop, accessors
//!
//! # Scope
//!
//! Hole boundaries are recorded but not yet carved into the mesh as
//! constraint edges, so the result is a Delaunay triangulation of the vertex
//! set rather than a constrained one. The three synthetic super-triangle
//! vertices remain in the pool; use [`Triangulator::domain_triangles`] to
//! filter them out of query results.
//!
//! # Example
//!
//! ```rust
//! use trigon_mesh::Triangulator;
//!
//! let mut tri = Triangulator::new();
//! tri.add_vertex_to_polygon(0.0, 0.0).unwrap();
//! tri.add_vertex_to_polygon(5.0, 0.0).unwrap();
//! tri.add_vertex_to_polygon(0.0, 5.0).unwrap();
//! tri.triangulate(true).unwrap();
//!
//! let domain = tri.domain_triangles().unwrap();
//! assert_eq!(domain.len(), 1);
//! ```

pub mod adjacency;
pub mod arena;
pub mod error;
pub mod triangle;
pub mod triangulator;

pub use adjacency::AdjacencyTriangle;
pub use arena::TriangleArena;
pub use error::{TriangulateError, TriangulateResult};
pub use triangle::{SharedFeatures, Triangle};
pub use triangulator::{Triangulator, VertexCallback};
