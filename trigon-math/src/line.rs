//! Lines and line segments in 2D.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::point::Point2;
use crate::vector::Vector2;

/// A 2D line represented by an origin point and a unit direction vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line2 {
    pub origin: Point2,
    pub direction: Vector2,
}

impl Line2 {
    /// Create a new line from origin and direction.
    /// The direction is normalized.
    #[inline]
    pub fn new(origin: Point2, direction: Vector2) -> MathResult<Self> {
        let dir = direction.normalize()?;
        Ok(Self {
            origin,
            direction: dir,
        })
    }

    /// Create a line from two points.
    /// Returns `ZeroLengthLine` if the points are coincident.
    pub fn from_points(a: Point2, b: Point2) -> MathResult<Self> {
        let direction = b - a;
        if direction.length_squared() < 1e-15 {
            return Err(MathError::ZeroLengthLine);
        }
        Self::new(a, direction)
    }

    /// Get the point at parameter t along the line (`origin + t * direction`).
    #[inline]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.direction * t
    }

    /// Find the intersection with another line.
    /// Returns `ParallelLines` when the directions are parallel (or coincident).
    pub fn intersect(&self, other: &Line2) -> MathResult<Point2> {
        let d1 = self.direction;
        let d2 = other.direction;
        let cross = d1.cross(&d2);

        if cross.abs() < 1e-15 {
            return Err(MathError::ParallelLines);
        }

        let delta = other.origin - self.origin;
        let t = delta.cross(&d2) / cross;

        Ok(self.point_at(t))
    }

    /// Signed distance from a point to this line.
    /// Positive = left of the line, negative = right.
    #[inline]
    pub fn signed_distance_to_point(&self, p: &Point2) -> f64 {
        let v = *p - self.origin;
        self.direction.cross(&v)
    }
}

/// A 2D line segment between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment2 {
    pub start: Point2,
    pub end: Point2,
}

impl LineSegment2 {
    /// Create a new segment.
    #[inline]
    pub const fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// The same segment with swapped endpoints.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Midpoint of the segment.
    #[inline]
    pub fn midpoint(&self) -> Point2 {
        self.start.midpoint(&self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_intersection() {
        let l1 = Line2::from_points(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)).unwrap();
        let l2 = Line2::from_points(Point2::new(0.0, 10.0), Point2::new(10.0, 0.0)).unwrap();
        let p = l1.intersect(&l2).unwrap();
        assert!((p.x - 5.0).abs() < 1e-10);
        assert!((p.y - 5.0).abs() < 1e-10);
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let l1 = Line2::from_points(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap();
        let l2 = Line2::from_points(Point2::new(0.0, 1.0), Point2::new(1.0, 1.0)).unwrap();
        assert_eq!(l1.intersect(&l2), Err(MathError::ParallelLines));
    }

    #[test]
    fn coincident_points_make_no_line() {
        let p = Point2::new(2.0, 2.0);
        assert_eq!(Line2::from_points(p, p), Err(MathError::ZeroLengthLine));
    }

    #[test]
    fn segment_reversed() {
        let s = LineSegment2::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
        let r = s.reversed();
        assert_eq!(r.start, s.end);
        assert_eq!(r.end, s.start);
        assert_eq!(s.length(), 4.0);
        assert_eq!(s.midpoint(), Point2::new(2.0, 0.0));
    }
}
