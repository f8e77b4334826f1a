//! 2D axis-aligned bounding box with incremental expansion.

use serde::{Deserialize, Serialize};

use crate::point::Point2;

/// A 2D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    /// Create a new bounding box from min and max points.
    #[inline]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self {
            min: Point2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Point2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// The inverted sentinel box (`min = (50000, 50000)`, `max = (-50000, -50000)`).
    ///
    /// The first `include_point` on a sentinel box strictly updates all four
    /// extents, so incremental bound tracking needs no "is empty" flag.
    #[inline]
    pub const fn sentinel() -> Self {
        Self {
            min: Point2::new(50000.0, 50000.0),
            max: Point2::new(-50000.0, -50000.0),
        }
    }

    /// Create a bounding box from a set of points.
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut bbox = Self::sentinel();
        for p in points {
            bbox.include_point(*p);
        }
        Some(bbox)
    }

    /// Grow the box to include a point.
    #[inline]
    pub fn include_point(&mut self, p: Point2) {
        if p.x < self.min.x {
            self.min.x = p.x;
        }
        if p.x > self.max.x {
            self.max.x = p.x;
        }
        if p.y < self.min.y {
            self.min.y = p.y;
        }
        if p.y > self.max.y {
            self.max.y = p.y;
        }
    }

    /// Width of the bounding box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the bounding box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point2 {
        self.min.midpoint(&self.max)
    }

    /// Check if a point is inside (inclusive).
    #[inline]
    pub fn contains_point(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_updated_by_first_point() {
        let mut bbox = BoundingBox2::sentinel();
        bbox.include_point(Point2::new(3.0, -2.0));
        assert_eq!(bbox.min, Point2::new(3.0, -2.0));
        assert_eq!(bbox.max, Point2::new(3.0, -2.0));
    }

    #[test]
    fn include_point_grows_extents() {
        let mut bbox = BoundingBox2::sentinel();
        bbox.include_point(Point2::new(0.0, 0.0));
        bbox.include_point(Point2::new(5.0, -1.0));
        bbox.include_point(Point2::new(2.0, 7.0));
        assert_eq!(bbox.min, Point2::new(0.0, -1.0));
        assert_eq!(bbox.max, Point2::new(5.0, 7.0));
        assert_eq!(bbox.width(), 5.0);
        assert_eq!(bbox.height(), 8.0);
    }

    #[test]
    fn from_points_matches_incremental() {
        let pts = [
            Point2::new(1.0, 1.0),
            Point2::new(-3.0, 2.0),
            Point2::new(0.0, -4.0),
        ];
        let bbox = BoundingBox2::from_points(&pts).unwrap();
        assert_eq!(bbox.min, Point2::new(-3.0, -4.0));
        assert_eq!(bbox.max, Point2::new(1.0, 2.0));
        assert!(BoundingBox2::from_points(&[]).is_none());
    }

    #[test]
    fn contains_point_inclusive() {
        let bbox = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        assert!(bbox.contains_point(&Point2::new(0.0, 2.0)));
        assert!(!bbox.contains_point(&Point2::new(2.1, 1.0)));
    }
}
