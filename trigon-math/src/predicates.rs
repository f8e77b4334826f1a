//! Epsilon-based planar predicates.
//!
//! Every comparison in this module is taken against [`EPSILON`](crate::EPSILON):
//! a signed area inside `±EPSILON` counts as collinear, a point within
//! `EPSILON` of a segment counts as lying on it, and so on. The predicates are
//! deterministic for a given input, which is what the incremental
//! triangulation engine relies on.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::guards::safe_acos;
use crate::line::{Line2, LineSegment2};
use crate::point::Point2;
use crate::EPSILON;

/// Twice the signed area of triangle `a, b, c`.
/// Positive when the vertices wind counter-clockwise.
#[inline]
pub fn signed_area(a: Point2, b: Point2, c: Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// True when `a, b, c` wind strictly counter-clockwise.
#[inline]
pub fn is_ccw(a: Point2, b: Point2, c: Point2) -> bool {
    signed_area(a, b, c) > EPSILON
}

/// True when `a, b, c` are collinear within tolerance.
#[inline]
pub fn is_collinear(a: Point2, b: Point2, c: Point2) -> bool {
    signed_area(a, b, c).abs() <= EPSILON
}

/// A circle given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

/// The circle through three points.
///
/// Fails with `DegenerateTriangle` when the points are collinear within
/// tolerance, since the bisectors then have no well-conditioned intersection.
pub fn circumcircle(a: Point2, b: Point2, c: Point2) -> MathResult<Circle> {
    let area2 = signed_area(a, b, c);
    if area2.abs() <= EPSILON {
        return Err(MathError::DegenerateTriangle);
    }

    let d = 2.0 * area2;
    let aa = a.x * a.x + a.y * a.y;
    let bb = b.x * b.x + b.y * b.y;
    let cc = c.x * c.x + c.y * c.y;
    let center = Point2::new(
        (aa * (b.y - c.y) + bb * (c.y - a.y) + cc * (a.y - b.y)) / d,
        (aa * (c.x - b.x) + bb * (a.x - c.x) + cc * (b.x - a.x)) / d,
    );

    Ok(Circle {
        center,
        radius: center.distance_to(&a),
    })
}

/// Point-in-triangle test via three half-plane checks.
///
/// The test is orientation-agnostic (the triangle may wind either way).
/// With `include_edges` the boundary band of width `EPSILON` counts as
/// inside; without it, membership is strict.
pub fn point_in_triangle(p: Point2, a: Point2, b: Point2, c: Point2, include_edges: bool) -> bool {
    let d0 = signed_area(a, b, p);
    let d1 = signed_area(b, c, p);
    let d2 = signed_area(c, a, p);

    if include_edges {
        let has_pos = d0 > EPSILON || d1 > EPSILON || d2 > EPSILON;
        let has_neg = d0 < -EPSILON || d1 < -EPSILON || d2 < -EPSILON;
        !(has_pos && has_neg)
    } else {
        (d0 > EPSILON && d1 > EPSILON && d2 > EPSILON)
            || (d0 < -EPSILON && d1 < -EPSILON && d2 < -EPSILON)
    }
}

/// True when `p` lies within `EPSILON` of the closed segment `a..b`.
pub fn point_on_segment(p: Point2, a: Point2, b: Point2) -> bool {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 < EPSILON * EPSILON {
        return p.distance_to(&a) <= EPSILON;
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    let closest = a + ab * t;
    p.distance_to(&closest) <= EPSILON
}

/// Whether `p` lies strictly inside the convex wedge spanned by two segments
/// that share an endpoint (the apex).
///
/// The arms are the segments' non-shared endpoints. Points on either arm ray
/// count as outside, and a degenerate wedge (collinear arms) admits nothing.
/// Fails with `DomainError` when the segments share no endpoint.
pub fn point_in_wedge(p: Point2, edge_a: LineSegment2, edge_b: LineSegment2) -> MathResult<bool> {
    let (apex, arm_a, arm_b) = if points_coincide(edge_a.start, edge_b.start) {
        (edge_a.start, edge_a.end, edge_b.end)
    } else if points_coincide(edge_a.start, edge_b.end) {
        (edge_a.start, edge_a.end, edge_b.start)
    } else if points_coincide(edge_a.end, edge_b.start) {
        (edge_a.end, edge_a.start, edge_b.end)
    } else if points_coincide(edge_a.end, edge_b.end) {
        (edge_a.end, edge_a.start, edge_b.start)
    } else {
        return Err(MathError::DomainError);
    };

    let u = arm_a - apex;
    let v = arm_b - apex;
    let w = p - apex;

    let suv = u.cross(&v);
    if suv.abs() <= EPSILON {
        return Ok(false);
    }
    let uw = u.cross(&w);
    let vw = v.cross(&w);
    Ok(if suv > 0.0 {
        uw > EPSILON && vw < -EPSILON
    } else {
        uw < -EPSILON && vw > EPSILON
    })
}

/// The intersection of the infinite lines through segments `p1..p2` and
/// `q1..q2`. Fails with `ParallelLines` (or `ZeroLengthLine` for a
/// degenerate segment).
pub fn segment_intersection(p1: Point2, p2: Point2, q1: Point2, q2: Point2) -> MathResult<Point2> {
    let l1 = Line2::from_points(p1, p2)?;
    let l2 = Line2::from_points(q1, q2)?;
    l1.intersect(&l2)
}

/// Interior angle at `apex` between the arms toward `a` and `b`, in degrees.
/// Zero when either arm is degenerate.
pub fn angle_deg(apex: Point2, a: Point2, b: Point2) -> f64 {
    let u = a - apex;
    let v = b - apex;
    let lu = u.length();
    let lv = v.length();
    if lu <= EPSILON || lv <= EPSILON {
        return 0.0;
    }
    safe_acos(u.dot(&v) / (lu * lv)).to_degrees()
}

/// The smallest interior angle of triangle `a, b, c` in degrees.
/// Zero for a degenerate (collinear) triple.
pub fn min_angle_deg(a: Point2, b: Point2, c: Point2) -> f64 {
    if is_collinear(a, b, c) {
        return 0.0;
    }
    angle_deg(a, b, c)
        .min(angle_deg(b, c, a))
        .min(angle_deg(c, a, b))
}

#[inline]
fn points_coincide(a: Point2, b: Point2) -> bool {
    (a.x - b.x).abs() <= EPSILON && (a.y - b.y).abs() <= EPSILON
}
