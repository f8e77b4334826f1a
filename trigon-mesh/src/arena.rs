//! The triangle arena: append-only storage plus the insertion/flip engine.
//!
//! Triangles are addressed by their stable arena index (`tid`). A diagonal
//! swap rewrites both records in place, so every external reference (another
//! triangle's neighbor slot) keeps pointing at a live triangle; nothing is
//! ever deallocated during a triangulation run.
//!
//! Records are `Copy`; the algorithms read a snapshot, compute, and write
//! fields back, which keeps the cross-triangle rewiring free of aliasing.

use std::collections::VecDeque;

use trigon_math::{Point2, Point3};

use crate::adjacency::AdjacencyTriangle;
use crate::error::{TriangulateError, TriangulateResult};
use crate::triangle::{SharedFeatures, Triangle};

/// Append-only arena of adjacency triangles; `tid` equals arena position.
#[derive(Debug, Clone, Default)]
pub struct TriangleArena {
    triangles: Vec<AdjacencyTriangle>,
}

impl TriangleArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    /// Number of triangles ever created.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when no triangle has been created.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The triangle at `tid`.
    #[inline]
    pub fn get(&self, tid: usize) -> Option<&AdjacencyTriangle> {
        self.triangles.get(tid)
    }

    /// All triangles, indexed by `tid`.
    #[inline]
    pub fn triangles(&self) -> &[AdjacencyTriangle] {
        &self.triangles
    }

    /// Append a fresh triangle with no neighbors; returns its `tid`.
    pub fn push(&mut self, i0: usize, i1: usize, i2: usize) -> usize {
        let tid = self.triangles.len();
        self.triangles.push(AdjacencyTriangle::new(i0, i1, i2, tid));
        tid
    }

    fn append(&mut self, triangle: AdjacencyTriangle) -> usize {
        debug_assert_eq!(triangle.index(), self.triangles.len());
        self.triangles.push(triangle);
        triangle.index()
    }

    /// Breadth-first point location over the adjacency graph, starting from
    /// `seed`. Returns the first triangle containing `p` (edges inclusive),
    /// or `None` when the reachable mesh is exhausted.
    pub fn find_containing(&self, p: Point2, seed: usize, pool: &[Point3]) -> Option<usize> {
        let mut visited = vec![false; self.triangles.len()];
        let mut queue = VecDeque::new();
        if seed >= self.triangles.len() {
            return None;
        }
        visited[seed] = true;
        queue.push_back(seed);
        while let Some(tid) = queue.pop_front() {
            let tri = &self.triangles[tid];
            if tri.triangle.contains_point(p, pool, true) {
                return Some(tid);
            }
            for k in 0..3 {
                if let Some(n) = tri.neighbor(k) {
                    if !visited[n] {
                        visited[n] = true;
                        queue.push_back(n);
                    }
                }
            }
        }
        None
    }

    /// Insert pooled vertex `pid` into triangle `tid`.
    ///
    /// Strictly interior points split the triangle into a three-fan; points
    /// on an edge split this triangle and, when present, the neighbor across
    /// that edge. Returns the freshly created `tid`s in ascending order (the
    /// mutated originals are not reported).
    pub fn insert_point(
        &mut self,
        tid: usize,
        pid: usize,
        pool: &[Point3],
    ) -> TriangulateResult<Vec<usize>> {
        let p = pool[pid].to_point2();
        if self.triangles[tid].triangle.contains_point(p, pool, false) {
            log::debug!("inserting vertex {pid} into the interior of triangle {tid}");
            return Ok(self.split_interior(tid, pid, pool));
        }

        let on_edge = self.occupied_edge(tid, p, pool)?;
        log::debug!("inserting vertex {pid} on edge {on_edge} of triangle {tid}");
        let across = self.triangles[tid].neighbor(on_edge);
        let new_tid = self.split_on_edge(tid, pid, on_edge, pool)?;
        match across {
            Some(neighbor) => self.split_across_edge(neighbor, pid, on_edge, tid, new_tid, pool),
            None => Ok(vec![new_tid]),
        }
    }

    /// The single edge of `tid` occupied by `p`.
    ///
    /// Zero occupied edges means the point is not on this triangle's
    /// boundary; two mean it coincides with an existing vertex.
    fn occupied_edge(&self, tid: usize, p: Point2, pool: &[Point3]) -> TriangulateResult<usize> {
        let on = self.triangles[tid].triangle.occupied_edges(p, pool);
        if on.iter().filter(|&&b| b).count() > 1 {
            return Err(TriangulateError::DuplicatePoint);
        }
        on.iter()
            .position(|&b| b)
            .ok_or(TriangulateError::PointNotOnBoundary)
    }

    /// Fan-split around an interior point: `tid` keeps one wedge, two new
    /// triangles take the others. The original neighbors across edges 0 and 1
    /// re-bind to the new wedges; the neighbor across edge 2 stays put.
    fn split_interior(&mut self, tid: usize, pid: usize, pool: &[Point3]) -> Vec<usize> {
        let original = self.triangles[tid];
        let [i0, i1, i2] = original.indices();
        let n0 = original.neighbor(0);
        let n1 = original.neighbor(1);

        let first_tid = self.triangles.len();
        let second_tid = first_tid + 1;
        let mut first = AdjacencyTriangle::new(i0, i1, pid, first_tid);
        let mut second = AdjacencyTriangle::new(pid, i1, i2, second_tid);

        self.triangles[tid].triangle.indices[1] = pid;

        if let Some(n) = n0 {
            self.triangles[n].set_new_neighbor(&first, pool);
        }
        if let Some(n) = n1 {
            self.triangles[n].set_new_neighbor(&second, pool);
        }

        first.neighbors = [n0, Some(second_tid), Some(tid)];
        second.neighbors = [Some(first_tid), n1, Some(tid)];
        self.triangles[tid].neighbors[0] = Some(first_tid);
        self.triangles[tid].neighbors[1] = Some(second_tid);

        self.append(first);
        self.append(second);
        vec![first_tid, second_tid]
    }

    /// Split `tid` along the edge carrying the new vertex. Returns the new
    /// half's `tid`. The slot across the split edge is left for the caller
    /// (either the symmetric neighbor split or the hull).
    fn split_on_edge(
        &mut self,
        tid: usize,
        pid: usize,
        on_edge: usize,
        pool: &[Point3],
    ) -> TriangulateResult<usize> {
        let new_tid = self.triangles.len();
        match on_edge {
            0 => {
                let n1 = self.triangles[tid].neighbor(1);
                let mut new = self.triangles[tid].split(pid, 1, 0, new_tid)?;
                new.neighbors[1] = n1;
                if let Some(n) = n1 {
                    self.triangles[n].set_new_neighbor(&new, pool);
                }
                self.triangles[tid].neighbors[1] = Some(new_tid);
                new.neighbors[2] = Some(tid);
                self.append(new);
            }
            1 => {
                let n2 = self.triangles[tid].neighbor(2);
                let mut new = self.triangles[tid].split(pid, 2, 1, new_tid)?;
                new.neighbors[2] = n2;
                if let Some(n) = n2 {
                    self.triangles[n].set_new_neighbor(&new, pool);
                }
                self.triangles[tid].neighbors[2] = Some(new_tid);
                new.neighbors[0] = Some(tid);
                self.append(new);
            }
            2 => {
                let n1 = self.triangles[tid].neighbor(1);
                let mut new = self.triangles[tid].split(pid, 2, 0, new_tid)?;
                new.neighbors[1] = n1;
                if let Some(n) = n1 {
                    self.triangles[n].set_new_neighbor(&new, pool);
                }
                self.triangles[tid].neighbors[1] = Some(new_tid);
                new.neighbors[0] = Some(tid);
                self.append(new);
            }
            _ => return Err(TriangulateError::PositionOutOfRange),
        }
        Ok(new_tid)
    }

    /// Symmetric half of an on-edge insertion: split the across-edge neighbor
    /// and bind the four records pairwise. Which originator-side record faces
    /// which local record is settled by probing one shared edge; the other
    /// three bindings follow by parity.
    fn split_across_edge(
        &mut self,
        tid: usize,
        pid: usize,
        originators_edge: usize,
        originator: usize,
        originators_new: usize,
        pool: &[Point3],
    ) -> TriangulateResult<Vec<usize>> {
        let p = pool[pid].to_point2();
        let on_edge = self.occupied_edge(tid, p, pool)?;
        let this_new = self.split_on_edge(tid, pid, on_edge, pool)?;

        let faces_originator = self.triangles[tid]
            .triangle
            .shared_features(&self.triangles[originator].triangle)
            .shares_edge();

        if faces_originator {
            self.triangles[tid].neighbors[on_edge] = Some(originator);
            self.triangles[this_new].neighbors[on_edge] = Some(originators_new);
            self.triangles[originator].neighbors[originators_edge] = Some(tid);
            self.triangles[originators_new].neighbors[originators_edge] = Some(this_new);
        } else {
            self.triangles[tid].neighbors[on_edge] = Some(originators_new);
            self.triangles[this_new].neighbors[on_edge] = Some(originator);
            self.triangles[originator].neighbors[originators_edge] = Some(this_new);
            self.triangles[originators_new].neighbors[originators_edge] = Some(tid);
        }

        let mut fresh = vec![originators_new, this_new];
        fresh.sort_unstable();
        Ok(fresh)
    }

    /// Legalize edge `k` of triangle `tid`: when the neighbor across it makes
    /// the edge illegal, swap the diagonal (which recursively legalizes the
    /// newly exposed edges). Returns whether a swap occurred; `false` when
    /// the edge has no neighbor.
    pub fn legalize_edge(
        &mut self,
        tid: usize,
        k: usize,
        pool: &[Point3],
    ) -> TriangulateResult<bool> {
        let Some(other) = self.triangles[tid].neighbor(k) else {
            return Ok(false);
        };
        let shared = self.triangles[tid]
            .triangle
            .shared_features(&self.triangles[other].triangle);
        if self.is_legal(tid, other, &shared, pool)? {
            Ok(false)
        } else {
            log::warn!(
                "edge {k} of triangle {tid} (indices {:?}) is illegal against {other} (indices {:?}); swapping",
                self.triangles[tid].indices(),
                self.triangles[other].indices()
            );
            self.swap(tid, other, pool)?;
            Ok(true)
        }
    }

    /// The local Delaunay legality test across the shared edge of `tid` and
    /// `other`.
    ///
    /// The current diagonal is legal when the far vertex is not visible over
    /// the shared edge (a swap would produce a non-convex quadrilateral),
    /// when either post-swap ghost triangle would be degenerate, or when the
    /// swap would not improve the minimum interior angle.
    fn is_legal(
        &self,
        tid: usize,
        other: usize,
        shared: &SharedFeatures,
        pool: &[Point3],
    ) -> TriangulateResult<bool> {
        let k = shared
            .shared_edge()
            .ok_or(TriangulateError::NoSharedEdge(tid, other))?;
        let &other_far = shared
            .other_unshared
            .first()
            .ok_or(TriangulateError::NoSharedEdge(tid, other))?;
        let &self_far = shared
            .self_unshared
            .first()
            .ok_or(TriangulateError::NoSharedEdge(tid, other))?;

        let far_point = pool[other_far].to_point2();
        if !self.triangles[tid].visible_over_edge(k, far_point, pool) {
            return Ok(true);
        }

        let current_min = self.triangles[tid]
            .triangle
            .min_angle_deg(pool)
            .min(self.triangles[other].triangle.min_angle_deg(pool));

        let (e0, e1) = self.triangles[tid].triangle.edge_indices(k);
        let ghost1 = Triangle::ccw_order(e0, other_far, self_far, pool);
        let ghost2 = Triangle::ccw_order(other_far, e1, self_far, pool);
        let ghost1_min = Triangle::dummy_min_angle_deg(ghost1[0], ghost1[1], ghost1[2], pool);
        let ghost2_min = Triangle::dummy_min_angle_deg(ghost2[0], ghost2[1], ghost2[2], pool);

        Ok(ghost1_min <= 0.0 || ghost2_min <= 0.0 || ghost1_min.min(ghost2_min) <= current_min)
    }

    /// Swap the diagonal shared by `tid` and `other`, then recursively
    /// legalize the pair of `tid`'s edges the flip exposed.
    ///
    /// Both records are rewritten in place; every outside triangle that
    /// referenced the pair has its slots cleared and re-derived from the
    /// post-swap shared edges.
    pub fn swap(&mut self, tid: usize, other: usize, pool: &[Point3]) -> TriangulateResult<()> {
        let pair = [tid, other];
        let mut externals = Vec::new();
        for &t in &pair {
            for k in 0..3 {
                if let Some(n) = self.triangles[t].neighbor(k) {
                    if n != tid && n != other {
                        externals.push(n);
                    }
                }
            }
        }

        let shared = self.triangles[tid]
            .triangle
            .shared_features(&self.triangles[other].triangle);
        let mirrored = self.triangles[other]
            .triangle
            .shared_features(&self.triangles[tid].triangle);
        let k_self = shared
            .shared_edge()
            .ok_or(TriangulateError::NoSharedEdge(tid, other))?;
        let k_other = mirrored
            .shared_edge()
            .ok_or(TriangulateError::NoSharedEdge(other, tid))?;
        let &other_far = shared
            .other_unshared
            .first()
            .ok_or(TriangulateError::NoSharedEdge(tid, other))?;
        let &self_far = shared
            .self_unshared
            .first()
            .ok_or(TriangulateError::NoSharedEdge(tid, other))?;

        self.triangles[tid].swap_edge(k_self, other_far, other);
        self.triangles[other].swap_edge(k_other, self_far, tid);
        log::debug!(
            "swapped diagonal of {tid}/{other}: now {:?} and {:?}, rewiring {} externals",
            self.triangles[tid].indices(),
            self.triangles[other].indices(),
            externals.len()
        );

        // Stale slots first: any external still citing the pair is cleared,
        // then adjacency is re-derived from the post-swap shared edges.
        for &t in &externals {
            for k in 0..3 {
                if let Some(n) = self.triangles[t].neighbor(k) {
                    if n == tid || n == other {
                        self.triangles[t].neighbors[k] = None;
                    }
                }
            }
        }
        for &t in &externals {
            for &h in &pair {
                let outward = self.triangles[h]
                    .triangle
                    .shared_features(&self.triangles[t].triangle);
                if let Some(k) = outward.shared_edge() {
                    self.triangles[h].neighbors[k] = Some(t);
                }
                let inward = self.triangles[t]
                    .triangle
                    .shared_features(&self.triangles[h].triangle);
                if let Some(k) = inward.shared_edge() {
                    self.triangles[t].neighbors[k] = Some(h);
                }
            }
        }

        let (ka, kb) = match k_self {
            0 => (0, 2),
            1 => (0, 1),
            _ => (1, 2),
        };
        self.legalize_edge(tid, ka, pool)?;
        self.legalize_edge(tid, kb, pool)?;
        Ok(())
    }
}
