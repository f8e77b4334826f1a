//! The triangle record: three vertex indices into a shared vertex pool.
//!
//! A triangle never stores coordinates. Every geometric query takes the pool
//! as a slice of [`Point3`] and projects to 2D, so records stay `Copy` and the
//! arena can rewrite them in place.
//!
//! # Edge convention
//!
//! Edge `k` runs from vertex `k` to vertex `(k + 1) % 3`; the vertex opposite
//! edge `k` is vertex `(k + 2) % 3`. Neighbor slot `k` of an adjacency
//! triangle refers to the triangle across edge `k`.

use serde::{Deserialize, Serialize};

use trigon_math::{predicates, Circle, LineSegment2, MathResult, Point2, Point3};

/// A triangle: three pooled vertex indices plus its stable arena index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    /// Vertex indices into the pool. Pairwise distinct.
    pub indices: [usize; 3],
    /// Stable arena index (`tid`), assigned at creation and never reused.
    pub index: usize,
}

/// How two triangles relate: which vertices they share and which edge of the
/// probed triangle (if any) is the shared one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFeatures {
    /// Number of vertex indices the two triangles have in common (0..=3).
    pub num_shared: usize,
    /// `edges[k]` is true when edge `k` of the probed triangle is carried by
    /// both triangles. Exactly one entry is true iff `num_shared == 2`.
    pub edges: [bool; 3],
    /// The shared vertex indices, in the probed triangle's slot order.
    pub shared: Vec<usize>,
    /// The probed triangle's indices not present in the other.
    pub self_unshared: Vec<usize>,
    /// The other triangle's indices not present in the probed one.
    pub other_unshared: Vec<usize>,
}

impl SharedFeatures {
    /// True when the triangles share exactly one edge.
    #[inline]
    pub fn shares_edge(&self) -> bool {
        self.num_shared == 2
    }

    /// The probed triangle's shared edge, when there is one.
    #[inline]
    pub fn shared_edge(&self) -> Option<usize> {
        self.edges.iter().position(|&e| e)
    }
}

impl Triangle {
    /// Create a triangle record.
    #[inline]
    pub const fn new(i0: usize, i1: usize, i2: usize, index: usize) -> Self {
        Self {
            indices: [i0, i1, i2],
            index,
        }
    }

    /// The vertex indices.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// Fetch the vertex coordinates from the pool, projected to 2D.
    #[inline]
    pub fn points(&self, pool: &[Point3]) -> [Point2; 3] {
        [
            pool[self.indices[0]].to_point2(),
            pool[self.indices[1]].to_point2(),
            pool[self.indices[2]].to_point2(),
        ]
    }

    /// The ordered index pair of edge `k`.
    #[inline]
    pub fn edge_indices(&self, k: usize) -> (usize, usize) {
        (self.indices[k], self.indices[(k + 1) % 3])
    }

    /// Edge `k` as a segment.
    #[inline]
    pub fn edge(&self, k: usize, pool: &[Point3]) -> LineSegment2 {
        let (a, b) = self.edge_indices(k);
        LineSegment2::new(pool[a].to_point2(), pool[b].to_point2())
    }

    /// The circumcircle of this triangle.
    pub fn circumcircle(&self, pool: &[Point3]) -> MathResult<Circle> {
        let [a, b, c] = self.points(pool);
        predicates::circumcircle(a, b, c)
    }

    /// Whether `p` lies inside this triangle.
    pub fn contains_point(&self, p: Point2, pool: &[Point3], include_edges: bool) -> bool {
        let [a, b, c] = self.points(pool);
        predicates::point_in_triangle(p, a, b, c, include_edges)
    }

    /// Interior angle at vertex `k`, in degrees.
    pub fn angle_deg(&self, k: usize, pool: &[Point3]) -> f64 {
        let pts = self.points(pool);
        predicates::angle_deg(pts[k], pts[(k + 1) % 3], pts[(k + 2) % 3])
    }

    /// The smallest interior angle, in degrees. Zero when degenerate.
    pub fn min_angle_deg(&self, pool: &[Point3]) -> f64 {
        let [a, b, c] = self.points(pool);
        predicates::min_angle_deg(a, b, c)
    }

    /// Whether the vertices wind counter-clockwise.
    pub fn is_ccw(&self, pool: &[Point3]) -> bool {
        let [a, b, c] = self.points(pool);
        predicates::is_ccw(a, b, c)
    }

    /// Swap vertex slots 0 and 2, flipping the winding.
    #[inline]
    pub fn reverse(&mut self) {
        self.indices.swap(0, 2);
    }

    /// Per-edge test of whether `p` lies on that edge.
    ///
    /// A point coinciding with a vertex occupies both incident edges, which
    /// the caller reports as a duplicate-point error.
    pub fn occupied_edges(&self, p: Point2, pool: &[Point3]) -> [bool; 3] {
        let mut on = [false; 3];
        for (k, slot) in on.iter_mut().enumerate() {
            let seg = self.edge(k, pool);
            *slot = predicates::point_on_segment(p, seg.start, seg.end);
        }
        on
    }

    /// Describe the relation between this triangle and another.
    pub fn shared_features(&self, other: &Triangle) -> SharedFeatures {
        let mut shared = Vec::new();
        let mut self_unshared = Vec::new();
        for &i in &self.indices {
            if other.indices.contains(&i) {
                shared.push(i);
            } else {
                self_unshared.push(i);
            }
        }
        let other_unshared: Vec<usize> = other
            .indices
            .iter()
            .copied()
            .filter(|i| !self.indices.contains(i))
            .collect();

        let mut edges = [false; 3];
        if shared.len() == 2 {
            for (k, slot) in edges.iter_mut().enumerate() {
                let (a, b) = self.edge_indices(k);
                *slot = shared.contains(&a) && shared.contains(&b);
            }
        }

        SharedFeatures {
            num_shared: shared.len(),
            edges,
            shared,
            self_unshared,
            other_unshared,
        }
    }

    /// Reorder three vertex indices so the resulting triangle would wind
    /// counter-clockwise. Collinear triples are returned unchanged.
    pub fn ccw_order(a: usize, b: usize, c: usize, pool: &[Point3]) -> [usize; 3] {
        let pa = pool[a].to_point2();
        let pb = pool[b].to_point2();
        let pc = pool[c].to_point2();
        if predicates::signed_area(pa, pb, pc) < -trigon_math::EPSILON {
            [c, b, a]
        } else {
            [a, b, c]
        }
    }

    /// Smallest interior angle of the hypothetical triangle `a, b, c`
    /// without constructing a record. Zero when collinear.
    pub fn dummy_min_angle_deg(a: usize, b: usize, c: usize, pool: &[Point3]) -> f64 {
        predicates::min_angle_deg(
            pool[a].to_point2(),
            pool[b].to_point2(),
            pool[c].to_point2(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pool() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(0.0, 5.0, 0.0),
            Point3::new(15.0, 15.0, 0.0),
        ]
    }

    #[test]
    fn edge_indices_follow_convention() {
        let t = Triangle::new(0, 1, 2, 0);
        assert_eq!(t.edge_indices(0), (0, 1));
        assert_eq!(t.edge_indices(1), (1, 2));
        assert_eq!(t.edge_indices(2), (2, 0));
    }

    #[test]
    fn circumcircle_touches_all_vertices() {
        let pool = pool();
        for t in [Triangle::new(0, 1, 2, 0), Triangle::new(2, 1, 3, 1)] {
            let c = t.circumcircle(&pool).unwrap();
            for p in t.points(&pool) {
                assert!((p.distance_to(&c.center) - c.radius).abs() < trigon_math::EPSILON);
            }
        }
    }

    #[test]
    fn right_angle_at_vertex_zero() {
        let pool = pool();
        let t = Triangle::new(0, 1, 2, 0);
        assert_relative_eq!(t.angle_deg(0, &pool), 90.0, epsilon = 1e-9);
        assert_relative_eq!(t.angle_deg(1, &pool), t.angle_deg(2, &pool), epsilon = 1e-9);
        assert_relative_eq!(t.min_angle_deg(&pool), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn reverse_flips_winding() {
        let pool = pool();
        let mut t = Triangle::new(0, 1, 2, 0);
        assert!(t.is_ccw(&pool));
        t.reverse();
        assert!(!t.is_ccw(&pool));
        assert_eq!(t.indices(), [2, 1, 0]);
        t.reverse();
        assert_eq!(t.indices(), [0, 1, 2]);
    }

    #[test]
    fn circumcenter_containment_depends_on_edge_flag() {
        // the circumcenter of a right triangle lies on the hypotenuse
        let pool = pool();
        let t = Triangle::new(0, 1, 2, 0);
        let c = t.circumcircle(&pool).unwrap().center;
        assert!(t.contains_point(c, &pool, true));
        assert!(!t.contains_point(c, &pool, false));
    }

    #[test]
    fn occupied_edges_reports_membership() {
        let pool = pool();
        let t = Triangle::new(0, 1, 2, 0);
        assert_eq!(
            t.occupied_edges(Point2::new(2.0, 0.0), &pool),
            [true, false, false]
        );
        assert_eq!(
            t.occupied_edges(Point2::new(2.5, 2.5), &pool),
            [false, true, false]
        );
        assert_eq!(
            t.occupied_edges(Point2::new(1.0, 1.0), &pool),
            [false, false, false]
        );
        // a vertex occupies both incident edges
        let at_vertex = t.occupied_edges(Point2::new(0.0, 0.0), &pool);
        assert_eq!(at_vertex.iter().filter(|&&b| b).count(), 2);
    }

    #[test]
    fn shared_features_edge_detection() {
        let t = Triangle::new(0, 1, 2, 0);
        let u = Triangle::new(2, 1, 3, 1);
        let shared = t.shared_features(&u);
        assert_eq!(shared.num_shared, 2);
        assert!(shared.shares_edge());
        assert_eq!(shared.shared_edge(), Some(1));
        assert_eq!(shared.shared, vec![1, 2]);
        assert_eq!(shared.self_unshared, vec![0]);
        assert_eq!(shared.other_unshared, vec![3]);

        let mirrored = u.shared_features(&t);
        assert_eq!(mirrored.shared_edge(), Some(0));
        assert_eq!(mirrored.other_unshared, vec![0]);
    }

    #[test]
    fn shared_features_without_shared_edge() {
        let t = Triangle::new(0, 1, 2, 0);

        let one = t.shared_features(&Triangle::new(2, 3, 4, 1));
        assert_eq!(one.num_shared, 1);
        assert!(!one.shares_edge());
        assert_eq!(one.edges, [false; 3]);

        let none = t.shared_features(&Triangle::new(3, 4, 5, 2));
        assert_eq!(none.num_shared, 0);
        assert!(!none.shares_edge());
        assert_eq!(none.shared_edge(), None);
    }

    #[test]
    fn ccw_order_restores_orientation() {
        let pool = pool();
        assert_eq!(Triangle::ccw_order(0, 1, 2, &pool), [0, 1, 2]);
        assert_eq!(Triangle::ccw_order(2, 1, 0, &pool), [0, 1, 2]);
    }

    #[test]
    fn dummy_min_angle_matches_record() {
        let pool = pool();
        let t = Triangle::new(0, 1, 2, 0);
        assert_relative_eq!(
            Triangle::dummy_min_angle_deg(0, 1, 2, &pool),
            t.min_angle_deg(&pool),
            epsilon = 1e-12
        );
    }
}
