//! Triangle with neighbor slots and the local mesh mutations.
//!
//! `neighbors[k]` holds the arena index of the triangle across edge `k`, or
//! `None` when that edge lies on the mesh boundary. All operations here touch
//! only this record; the cross-triangle algorithms (insertion, legalization,
//! swap) live on [`TriangleArena`](crate::arena::TriangleArena).

use serde::{Deserialize, Serialize};

use trigon_math::{point_in_wedge, LineSegment2, Point2, Point3};

use crate::error::{TriangulateError, TriangulateResult};
use crate::triangle::Triangle;

/// A triangle augmented with three optional neighbor indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyTriangle {
    pub triangle: Triangle,
    pub neighbors: [Option<usize>; 3],
}

impl AdjacencyTriangle {
    /// Create an adjacency triangle with no neighbors.
    #[inline]
    pub const fn new(i0: usize, i1: usize, i2: usize, index: usize) -> Self {
        Self {
            triangle: Triangle::new(i0, i1, i2, index),
            neighbors: [None; 3],
        }
    }

    /// The stable arena index.
    #[inline]
    pub fn index(&self) -> usize {
        self.triangle.index
    }

    /// The vertex indices.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        self.triangle.indices
    }

    /// The neighbor across edge `k`.
    #[inline]
    pub fn neighbor(&self, k: usize) -> Option<usize> {
        self.neighbors[k]
    }

    /// Whether `p` is visible over edge `k`: seen from the vertex opposite
    /// the edge, `p` falls strictly inside the corner wedge spanned by the
    /// two edge endpoints. A diagonal swap across edge `k` yields a convex
    /// quadrilateral exactly when the far point passes this test.
    pub fn visible_over_edge(&self, k: usize, p: Point2, pool: &[Point3]) -> bool {
        let apex = pool[self.triangle.indices[(k + 2) % 3]].to_point2();
        let arm_a = pool[self.triangle.indices[k]].to_point2();
        let arm_b = pool[self.triangle.indices[(k + 1) % 3]].to_point2();
        point_in_wedge(
            p,
            LineSegment2::new(apex, arm_a),
            LineSegment2::new(apex, arm_b),
        )
        .unwrap_or(false)
    }

    /// The in-place half of a diagonal swap across edge `k`: substitute the
    /// other triangle's far vertex into slot `(k + 1) % 3`, point that
    /// neighbor slot at the swap partner, and clear slot `k` (the caller
    /// rewires it). Returns the displaced neighbor.
    pub fn swap_edge(&mut self, k: usize, point_index: usize, other: usize) -> Option<usize> {
        let j = (k + 1) % 3;
        self.triangle.indices[j] = point_index;
        let displaced = self.neighbors[j];
        self.neighbors[j] = Some(other);
        self.neighbors[k] = None;
        displaced
    }

    /// Divide this triangle in two by substituting `point_index` into slot
    /// `pos1`, returning the companion triangle with `point_index` at `pos2`.
    ///
    /// Supported position pairs (`pos1`, `pos2`) encode the three on-edge
    /// splittings: `(1, 0)`, `(2, 0)` and `(2, 1)`. The companion's neighbor
    /// slots start empty; the caller wires both records and appends the
    /// companion to the arena under `new_index`.
    pub fn split(
        &mut self,
        point_index: usize,
        pos1: usize,
        pos2: usize,
        new_index: usize,
    ) -> TriangulateResult<AdjacencyTriangle> {
        if !matches!((pos1, pos2), (1, 0) | (2, 0) | (2, 1)) {
            return Err(TriangulateError::PositionOutOfRange);
        }
        let [i0, i1, i2] = self.triangle.indices;
        let companion = match pos2 {
            0 => AdjacencyTriangle::new(point_index, i1, i2, new_index),
            _ => AdjacencyTriangle::new(i0, point_index, i2, new_index),
        };
        self.triangle.indices[pos1] = point_index;
        Ok(companion)
    }

    /// Bind this triangle to a freshly created neighbor: for each shared edge
    /// whose far vertex is visible over that edge, point the slot at the new
    /// triangle. Returns the number of slots set.
    ///
    /// The visibility gate means a shared edge on a non-convex corner is left
    /// unbound; the engine logs it and later swaps repair the link.
    pub fn set_new_neighbor(&mut self, other: &AdjacencyTriangle, pool: &[Point3]) -> usize {
        let shared = self.triangle.shared_features(&other.triangle);
        if !shared.shares_edge() {
            return 0;
        }
        let Some(&far) = shared.other_unshared.first() else {
            return 0;
        };
        let p = pool[far].to_point2();
        let mut set = 0;
        for k in 0..3 {
            if shared.edges[k] {
                if self.visible_over_edge(k, p, pool) {
                    self.neighbors[k] = Some(other.index());
                    set += 1;
                } else {
                    log::warn!(
                        "triangle {} declines neighbor {} over edge {k}: far vertex not visible",
                        self.index(),
                        other.index()
                    );
                }
            }
        }
        set
    }

    /// Reverse the winding, keeping edge-neighbor correspondence: vertex
    /// slots 0 and 2 swap, so neighbor slots 0 and 2 swap with them.
    pub fn reverse(&mut self) {
        self.triangle.reverse();
        self.neighbors.swap(0, 2);
    }
}
