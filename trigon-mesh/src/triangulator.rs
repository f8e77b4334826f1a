//! The triangulator: vertex pool, polygon/hole builders, and the insertion
//! loop that drives the arena engine.
//!
//! # Usage
//!
//! Vertices are added first and stamped into the polygon (or a hole) either
//! on the way in (`add_vertex_to_polygon`) or by index (`add_polygon_vertex`).
//! `triangulate` then synthesizes a super-triangle covering the tracked
//! bounds, drains the polygon list, locates each vertex and inserts it,
//! legalizing after every insertion when the Delaunay property is requested.
//!
//! The three synthetic super-triangle vertices stay in the pool and their
//! triangles stay in the arena; [`Triangulator::domain_triangles`] applies
//! the usual post-hoc filter for callers that want only triangles over the
//! caller-supplied vertices.

use std::fmt;

use trigon_math::{
    is_finite, segment_intersection, BoundingBox2, MathError, Point2, Point3,
};

use crate::adjacency::AdjacencyTriangle;
use crate::arena::TriangleArena;
use crate::error::{TriangulateError, TriangulateResult};

/// Callback fired once per physically added vertex (synthetic ones included).
pub type VertexCallback = Box<dyn FnMut(f64, f64, f64)>;

/// Incremental Delaunay triangulator of a planar vertex set with polygon
/// context.
///
/// Hole boundaries are accepted and validated but not yet enforced as
/// constraint edges; see the crate docs.
pub struct Triangulator {
    pool: Vec<Point3>,
    arena: TriangleArena,
    polygon: Vec<usize>,
    holes: Vec<Vec<usize>>,
    bounds: BoundingBox2,
    universal_z: f64,
    static_vertex_count: Option<usize>,
    on_vertex_created: Option<VertexCallback>,
}

impl Triangulator {
    /// Create a triangulator with `universal_z = 0`.
    pub fn new() -> Self {
        Self::with_universal_z(0.0)
    }

    /// Create a triangulator stamping `universal_z` on every added vertex.
    pub fn with_universal_z(universal_z: f64) -> Self {
        Self {
            pool: Vec::new(),
            arena: TriangleArena::new(),
            polygon: Vec::new(),
            holes: vec![Vec::new()],
            bounds: BoundingBox2::sentinel(),
            universal_z,
            static_vertex_count: None,
            on_vertex_created: None,
        }
    }

    /// Install a callback fired for every physically added vertex.
    pub fn set_vertex_callback(&mut self, callback: impl FnMut(f64, f64, f64) + 'static) {
        self.on_vertex_created = Some(Box::new(callback));
    }

    /// Add a vertex to the pool; returns its stable index.
    ///
    /// The Z coordinate is always the triangulator's `universal_z`. Rejects
    /// non-finite coordinates.
    pub fn add_vertex(&mut self, x: f64, y: f64) -> TriangulateResult<usize> {
        if !(is_finite(x) && is_finite(y)) {
            return Err(MathError::NonFiniteCoordinate.into());
        }
        self.bounds.include_point(Point2::new(x, y));
        let vid = self.pool.len();
        self.pool.push(Point3::new(x, y, self.universal_z));
        if let Some(callback) = self.on_vertex_created.as_mut() {
            callback(x, y, self.universal_z);
        }
        Ok(vid)
    }

    /// Add a vertex given as a 2D point.
    pub fn add_vertex_at(&mut self, p: Point2) -> TriangulateResult<usize> {
        self.add_vertex(p.x, p.y)
    }

    /// Add a vertex and append it to the polygon boundary.
    pub fn add_vertex_to_polygon(&mut self, x: f64, y: f64) -> TriangulateResult<usize> {
        let vid = self.add_vertex(x, y)?;
        self.polygon.push(vid);
        Ok(vid)
    }

    /// Add a vertex and append it to the current hole.
    pub fn add_vertex_to_hole(&mut self, x: f64, y: f64) -> TriangulateResult<usize> {
        let vid = self.add_vertex(x, y)?;
        self.push_hole_vertex(vid);
        Ok(vid)
    }

    /// Append an existing vertex to the polygon boundary.
    pub fn add_polygon_vertex(&mut self, vid: usize) -> TriangulateResult<()> {
        if vid >= self.pool.len() {
            return Err(TriangulateError::VertexIndexOutOfRange(vid));
        }
        self.polygon.push(vid);
        Ok(())
    }

    /// Append an existing vertex to the current hole.
    pub fn add_hole_vertex(&mut self, vid: usize) -> TriangulateResult<()> {
        if vid >= self.pool.len() {
            return Err(TriangulateError::VertexIndexOutOfRange(vid));
        }
        self.push_hole_vertex(vid);
        Ok(())
    }

    /// Finish the current hole and prepare for the next one.
    /// Idempotent while the current hole is still empty.
    pub fn begin_hole(&mut self) {
        if self.holes.last().is_some_and(|h| !h.is_empty()) {
            self.holes.push(Vec::new());
        }
    }

    fn push_hole_vertex(&mut self, vid: usize) {
        match self.holes.last_mut() {
            Some(hole) => hole.push(vid),
            None => self.holes.push(vec![vid]),
        }
    }

    /// Triangulate the added vertices.
    ///
    /// With `make_delaunay` every insertion is followed by edge legalization,
    /// so the result satisfies the local Delaunay property; without it the
    /// raw incremental triangulation is kept.
    ///
    /// Fails with `AlreadyTriangulated` on a second call, `PointOutsideDomain`
    /// when point location fails, and `DegenerateTriangle` when the input is
    /// too flat to span a super-triangle (zero-width or zero-height bounds).
    pub fn triangulate(&mut self, make_delaunay: bool) -> TriangulateResult<()> {
        if self.is_triangulated() {
            return Err(TriangulateError::AlreadyTriangulated);
        }

        let (top_left, bottom_left, far_right) = self.super_triangle_corners()?;
        self.static_vertex_count = Some(self.pool.len());
        let v0 = self.add_vertex_at(top_left)?;
        let v1 = self.add_vertex_at(bottom_left)?;
        let v2 = self.add_vertex_at(far_right)?;

        let seed = self.arena.push(v0, v1, v2);
        log::debug!(
            "super-triangle {:?} / {:?} / {:?} over {} static vertices",
            top_left,
            bottom_left,
            far_right,
            v0
        );

        while let Some(pid) = self.polygon.pop() {
            let p = self.pool[pid].to_point2();
            let found = self
                .arena
                .find_containing(p, seed, &self.pool)
                .ok_or(TriangulateError::PointOutsideDomain)?;
            let fresh = self.arena.insert_point(found, pid, &self.pool)?;
            if make_delaunay {
                for &tid in &fresh {
                    for k in 0..3 {
                        self.arena.legalize_edge(tid, k, &self.pool)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// The three corners of the enclosing triangle: the left edge drops onto
    /// `min.x` extended by half the height on both sides, and the right apex
    /// is where the two extended bound diagonals meet.
    fn super_triangle_corners(&self) -> TriangulateResult<(Point2, Point2, Point2)> {
        let half_height = (self.bounds.height() / 2.0).abs();
        let top_left = Point2::new(self.bounds.min.x, self.bounds.max.y + half_height);
        let bottom_left = Point2::new(self.bounds.min.x, self.bounds.min.y - half_height);
        let far_right = segment_intersection(
            top_left,
            Point2::new(self.bounds.max.x, self.bounds.max.y),
            bottom_left,
            Point2::new(self.bounds.max.x, self.bounds.min.y),
        )
        .map_err(|_| MathError::DegenerateTriangle)?;
        Ok((top_left, bottom_left, far_right))
    }

    /// Whether `triangulate` has produced a result.
    #[inline]
    pub fn is_triangulated(&self) -> bool {
        !self.arena.is_empty()
    }

    /// Number of triangles produced by `triangulate`.
    pub fn num_triangles(&self) -> TriangulateResult<usize> {
        self.require_triangulated()?;
        Ok(self.arena.len())
    }

    /// Number of vertices in the pool (synthetic ones included).
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.pool.len()
    }

    /// The nth pooled vertex.
    #[inline]
    pub fn vertex(&self, n: usize) -> Option<Point3> {
        self.pool.get(n).copied()
    }

    /// All pooled vertices.
    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.pool
    }

    /// The produced triangles, indexed by `tid`.
    pub fn triangles(&self) -> TriangulateResult<&[AdjacencyTriangle]> {
        self.require_triangulated()?;
        Ok(self.arena.triangles())
    }

    /// Per-triangle neighbor slots.
    pub fn adjacency_list(&self) -> TriangulateResult<Vec<[Option<usize>; 3]>> {
        self.require_triangulated()?;
        Ok(self.arena.triangles().iter().map(|t| t.neighbors).collect())
    }

    /// Whether the first arena triangle winds counter-clockwise.
    pub fn is_left_winding(&self) -> TriangulateResult<bool> {
        self.require_triangulated()?;
        let first = self
            .arena
            .get(0)
            .ok_or(TriangulateError::NotTriangulatedYet)?;
        Ok(first.triangle.is_ccw(&self.pool))
    }

    /// Index of the last caller-supplied vertex, or `None` when the pool held
    /// nothing before the synthetic vertices were appended.
    pub fn last_static_vertex_index(&self) -> Option<usize> {
        self.static_vertex_count.and_then(|c| c.checked_sub(1))
    }

    /// Whether `vid` names one of the synthetic super-triangle vertices.
    pub fn is_synthetic_vertex(&self, vid: usize) -> bool {
        matches!(self.static_vertex_count, Some(count) if vid >= count)
    }

    /// The triangles citing no synthetic vertex: the post-hoc filter for
    /// callers that want only the triangulation of their own vertices.
    pub fn domain_triangles(&self) -> TriangulateResult<Vec<AdjacencyTriangle>> {
        self.require_triangulated()?;
        Ok(self
            .arena
            .triangles()
            .iter()
            .filter(|t| t.indices().iter().all(|&v| !self.is_synthetic_vertex(v)))
            .copied()
            .collect())
    }

    /// Not implemented: resetting the triangulator is unsupported.
    pub fn clear(&mut self) -> TriangulateResult<()> {
        Err(TriangulateError::NotImplemented("Triangulator::clear"))
    }

    /// Not implemented: dropping the polygon definition is unsupported.
    pub fn clear_polygon(&mut self) -> TriangulateResult<()> {
        Err(TriangulateError::NotImplemented("Triangulator::clear_polygon"))
    }

    fn require_triangulated(&self) -> TriangulateResult<()> {
        if self.is_triangulated() {
            Ok(())
        } else {
            Err(TriangulateError::NotTriangulatedYet)
        }
    }
}

impl Default for Triangulator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Triangulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Triangulator")
            .field("num_vertices", &self.pool.len())
            .field("num_triangles", &self.arena.len())
            .field("polygon", &self.polygon)
            .field("holes", &self.holes)
            .field("bounds", &self.bounds)
            .field("universal_z", &self.universal_z)
            .field("static_vertex_count", &self.static_vertex_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn builder_tracks_bounds_and_polygon() {
        let mut tri = Triangulator::new();
        let a = tri.add_vertex_to_polygon(0.0, 0.0).unwrap();
        let b = tri.add_vertex_to_polygon(5.0, 0.0).unwrap();
        let c = tri.add_vertex(0.0, 5.0).unwrap();
        tri.add_polygon_vertex(c).unwrap();
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(tri.num_vertices(), 3);
        assert_eq!(tri.bounds.min, Point2::new(0.0, 0.0));
        assert_eq!(tri.bounds.max, Point2::new(5.0, 5.0));
        assert!(!tri.is_triangulated());
    }

    #[test]
    fn add_vertex_rejects_non_finite() {
        let mut tri = Triangulator::new();
        assert_eq!(
            tri.add_vertex(f64::NAN, 0.0),
            Err(TriangulateError::Math(MathError::NonFiniteCoordinate))
        );
        assert_eq!(
            tri.add_vertex(0.0, f64::INFINITY),
            Err(TriangulateError::Math(MathError::NonFiniteCoordinate))
        );
    }

    #[test]
    fn index_only_builders_validate_range() {
        let mut tri = Triangulator::new();
        assert_eq!(
            tri.add_polygon_vertex(0),
            Err(TriangulateError::VertexIndexOutOfRange(0))
        );
        tri.add_vertex(1.0, 1.0).unwrap();
        assert!(tri.add_polygon_vertex(0).is_ok());
        assert_eq!(
            tri.add_hole_vertex(7),
            Err(TriangulateError::VertexIndexOutOfRange(7))
        );
    }

    #[test]
    fn begin_hole_is_idempotent_on_empty_hole() {
        let mut tri = Triangulator::new();
        tri.begin_hole();
        tri.begin_hole();
        assert_eq!(tri.holes.len(), 1);
        tri.add_vertex_to_hole(1.0, 1.0).unwrap();
        tri.begin_hole();
        assert_eq!(tri.holes.len(), 2);
    }

    #[test]
    fn vertex_callback_fires_for_synthetic_vertices_too() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut tri = Triangulator::with_universal_z(2.0);
        tri.set_vertex_callback(move |x, y, z| sink.borrow_mut().push((x, y, z)));
        tri.add_vertex_to_polygon(0.0, 0.0).unwrap();
        tri.add_vertex_to_polygon(5.0, 0.0).unwrap();
        tri.add_vertex_to_polygon(0.0, 5.0).unwrap();
        tri.triangulate(true).unwrap();
        // three static + three synthetic
        assert_eq!(seen.borrow().len(), 6);
        assert!(seen.borrow().iter().all(|&(_, _, z)| z == 2.0));
    }

    #[test]
    fn universal_z_is_stamped() {
        let mut tri = Triangulator::with_universal_z(-3.5);
        let vid = tri.add_vertex(1.0, 2.0).unwrap();
        assert_eq!(tri.vertex(vid), Some(Point3::new(1.0, 2.0, -3.5)));
    }

    #[test]
    fn accessors_before_triangulate_fail() {
        let tri = Triangulator::new();
        assert_eq!(
            tri.num_triangles(),
            Err(TriangulateError::NotTriangulatedYet)
        );
        assert!(tri.triangles().is_err());
        assert!(tri.adjacency_list().is_err());
        assert!(tri.is_left_winding().is_err());
        assert!(tri.domain_triangles().is_err());
        assert_eq!(tri.last_static_vertex_index(), None);
        assert!(!tri.is_synthetic_vertex(0));
    }

    #[test]
    fn triangulate_twice_fails() {
        let mut tri = Triangulator::new();
        tri.add_vertex_to_polygon(0.0, 0.0).unwrap();
        tri.add_vertex_to_polygon(5.0, 0.0).unwrap();
        tri.add_vertex_to_polygon(0.0, 5.0).unwrap();
        tri.triangulate(true).unwrap();
        assert_eq!(
            tri.triangulate(true),
            Err(TriangulateError::AlreadyTriangulated)
        );
    }

    #[test]
    fn clear_is_not_implemented() {
        let mut tri = Triangulator::new();
        assert!(matches!(
            tri.clear(),
            Err(TriangulateError::NotImplemented(_))
        ));
        assert!(matches!(
            tri.clear_polygon(),
            Err(TriangulateError::NotImplemented(_))
        ));
    }

    #[test]
    fn super_triangle_corners_enclose_bounds() {
        let mut tri = Triangulator::new();
        tri.add_vertex(0.0, 0.0).unwrap();
        tri.add_vertex(5.0, 5.0).unwrap();
        let (top_left, bottom_left, far_right) = tri.super_triangle_corners().unwrap();
        assert_eq!(top_left, Point2::new(0.0, 7.5));
        assert_eq!(bottom_left, Point2::new(0.0, -2.5));
        assert!((far_right.x - 10.0).abs() < 1e-9);
        assert!((far_right.y - 2.5).abs() < 1e-9);
    }

    #[test]
    fn collinear_input_is_degenerate() {
        for points in [
            vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)],
            vec![(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)],
        ] {
            let mut tri = Triangulator::new();
            for (x, y) in points {
                tri.add_vertex_to_polygon(x, y).unwrap();
            }
            assert_eq!(
                tri.triangulate(true),
                Err(TriangulateError::Math(MathError::DegenerateTriangle))
            );
        }
    }
}
