//! Point types for 2D and 3D coordinates.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::vector::Vector2;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// Create a new 2D point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Distance to another point.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (*other - *self).length()
    }

    /// Linear interpolation between two points.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Midpoint between two points.
    #[inline]
    pub fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }
}

impl Default for Point2 {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add<Vector2> for Point2 {
    type Output = Point2;

    #[inline]
    fn add(self, rhs: Vector2) -> Self::Output {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Vector2;

    #[inline]
    fn sub(self, rhs: Point2) -> Self::Output {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<Vector2> for Point2 {
    type Output = Point2;

    #[inline]
    fn sub(self, rhs: Vector2) -> Self::Output {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A point in 3D space.
///
/// The triangulation core is planar; `Point3` exists so pooled vertices can
/// carry a fixed embedding height alongside their 2D position. All geometry
/// happens after projecting through [`Point3::to_point2`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Create a new 3D point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Origin point (0, 0, 0).
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Project to 2D by dropping the Z coordinate.
    #[inline]
    pub fn to_point2(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Create a 3D point from a 2D point with the given Z.
    #[inline]
    pub fn from_point2(p: Point2, z: f64) -> Self {
        Self::new(p.x, p.y, z)
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self::ORIGIN
    }
}
