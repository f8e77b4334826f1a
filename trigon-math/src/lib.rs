//! Trigon Math - planar geometry primitives for the trigon triangulation kernel.
//!
//! This crate provides the foundational types and predicates:
//! - [`Point2`] and [`Point3`] - the working 2D point and the pooled
//!   carrier that tacks a fixed embedding height onto it
//! - [`Vector2`] - the 2D vector type with the usual operations
//! - [`BoundingBox2`] - axis-aligned bounds with incremental expansion
//! - [`Line2`], [`LineSegment2`] - line types with intersection
//! - [`predicates`] - the epsilon-based geometric predicates (orientation,
//!   circumcircle, containment, wedge membership, interior angles)
//!
//! # Numeric policy
//!
//! All predicates use plain floating point compared against [`EPSILON`].
//! Exact or adaptive-precision arithmetic is deliberately out of scope; the
//! consumer controls degeneracy by keeping inputs reasonably conditioned.
//!
//! # Example
//!
//! ```rust
//! use trigon_math::{predicates, Point2};
//!
//! let a = Point2::new(0.0, 0.0);
//! let b = Point2::new(5.0, 0.0);
//! let c = Point2::new(0.0, 5.0);
//!
//! assert!(predicates::is_ccw(a, b, c));
//! let circle = predicates::circumcircle(a, b, c).unwrap();
//! assert!((circle.center.distance_to(&a) - circle.radius).abs() < trigon_math::EPSILON);
//! ```

pub mod bbox;
pub mod error;
pub mod guards;
pub mod line;
pub mod point;
pub mod predicates;
pub mod vector;

// Re-export main types at crate root for convenience
pub use bbox::BoundingBox2;
pub use error::{MathError, MathResult};
pub use line::{Line2, LineSegment2};
pub use point::{Point2, Point3};
pub use predicates::{
    angle_deg, circumcircle, is_ccw, is_collinear, min_angle_deg, point_in_triangle,
    point_in_wedge, point_on_segment, segment_intersection, signed_area, Circle,
};
pub use guards::{clamp_acos_domain, is_finite, safe_acos};
pub use vector::Vector2;

/// Tolerance for floating point comparisons throughout the kernel.
pub const EPSILON: f64 = 1e-6;

/// Check if two f64 values are approximately equal.
#[inline]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}
