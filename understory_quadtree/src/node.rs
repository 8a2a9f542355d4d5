// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive partition nodes.

use alloc::boxed::Box;
use core::cmp::Ordering;

use smallvec::SmallVec;

use crate::types::{Boundary, Point, ScalarAcc};
use crate::util::point_distance_squared;

/// Subdivision limits shared by every node of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Limits {
    pub(crate) capacity: usize,
    pub(crate) max_depth: u8,
}

pub(crate) type Bucket<P> = SmallVec<[P; 4]>;

pub(crate) enum Kind<P: Point> {
    /// Not yet subdivided; points are stored here in insertion order.
    Leaf(Bucket<P>),
    /// Subdivided into quadrants, in [`Boundary::quadrants`] order.
    Internal(Box<[Node<P>; 4]>),
}

pub(crate) struct Node<P: Point> {
    pub(crate) bounds: Boundary<P::Scalar>,
    /// Points in this subtree.
    pub(crate) count: usize,
    pub(crate) kind: Kind<P>,
}

impl<P: Point> Node<P> {
    pub(crate) fn leaf(bounds: Boundary<P::Scalar>) -> Self {
        Self {
            bounds,
            count: 0,
            kind: Kind::Leaf(SmallVec::new()),
        }
    }

    /// Store a point. The caller guarantees `self.bounds` contains it.
    pub(crate) fn insert(&mut self, point: P, limits: Limits, depth: u8) {
        debug_assert!(
            self.bounds.contains(point.x(), point.y()),
            "point handed to a node that does not cover it"
        );
        self.count += 1;
        match &mut self.kind {
            Kind::Leaf(points) => {
                points.push(point);
                if points.len() > limits.capacity
                    && depth < limits.max_depth
                    && self.bounds.can_split()
                {
                    self.subdivide(limits, depth);
                }
            }
            Kind::Internal(children) => {
                let q = self.bounds.quadrant_of(point.x(), point.y());
                children[q].insert(point, limits, depth + 1);
            }
        }
    }

    /// Turn a leaf into an internal node, pushing its bucket down one level.
    fn subdivide(&mut self, limits: Limits, depth: u8) {
        tracing::trace!(depth, bounds = ?self.bounds, "subdividing quadtree node");
        let mut children = Box::new(self.bounds.quadrants().map(Self::leaf));
        if let Kind::Leaf(points) = &mut self.kind {
            for point in points.drain(..) {
                let q = self.bounds.quadrant_of(point.x(), point.y());
                children[q].insert(point, limits, depth + 1);
            }
        }
        self.kind = Kind::Internal(children);
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.kind, Kind::Leaf(_))
    }
}

impl<P: Point + PartialEq> Node<P> {
    /// Whether an equal point is stored. The caller guarantees `self.bounds` covers it.
    pub(crate) fn contains(&self, point: &P) -> bool {
        let mut node = self;
        loop {
            match &node.kind {
                Kind::Leaf(points) => return points.iter().any(|p| p == point),
                Kind::Internal(children) => {
                    node = &children[node.bounds.quadrant_of(point.x(), point.y())];
                }
            }
        }
    }

    /// Remove and return the first stored point equal to `point`.
    ///
    /// Counts along the path are only decremented when something was removed.
    pub(crate) fn take(&mut self, point: &P) -> Option<P> {
        let taken = match &mut self.kind {
            Kind::Leaf(points) => {
                let pos = points.iter().position(|p| p == point)?;
                points.remove(pos)
            }
            Kind::Internal(children) => {
                let q = self.bounds.quadrant_of(point.x(), point.y());
                children[q].take(point)?
            }
        };
        self.count -= 1;
        Some(taken)
    }
}

impl<P: Point> Node<P> {
    /// Call `f` for every stored point strictly closer than `radius` to `(x, y)`.
    ///
    /// `radius_sq` must be the square of a positive radius.
    pub(crate) fn visit_range<'a, F: FnMut(&'a P)>(
        &'a self,
        x: P::Scalar,
        y: P::Scalar,
        radius_sq: ScalarAcc<P::Scalar>,
        f: &mut F,
    ) {
        match &self.kind {
            Kind::Leaf(points) => {
                for p in points {
                    if point_distance_squared(p, x, y) < radius_sq {
                        f(p);
                    }
                }
            }
            Kind::Internal(children) => {
                for child in children.iter() {
                    if child.count > 0 && child.bounds.distance_squared(x, y) < radius_sq {
                        child.visit_range(x, y, radius_sq, f);
                    }
                }
            }
        }
    }

    /// Branch-and-bound nearest-neighbor search below this node.
    ///
    /// `best` carries the closest point found so far and its squared distance; it is only
    /// replaced by a strictly closer point.
    pub(crate) fn nearest<'a>(
        &'a self,
        x: P::Scalar,
        y: P::Scalar,
        best: &mut Option<(&'a P, ScalarAcc<P::Scalar>)>,
    ) {
        match &self.kind {
            Kind::Leaf(points) => {
                for p in points {
                    let d = point_distance_squared(p, x, y);
                    if best.is_none_or(|(_, best_d)| d < best_d) {
                        *best = Some((p, d));
                    }
                }
            }
            Kind::Internal(children) => {
                // Closest quadrant first: the one covering (x, y) has bound zero and seeds `best`.
                let mut order = [0, 1, 2, 3].map(|i| (children[i].bounds.distance_squared(x, y), i));
                order.sort_unstable_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
                for (bound, i) in order {
                    let child = &children[i];
                    if child.count == 0 {
                        continue;
                    }
                    if let Some((_, best_d)) = *best
                        && bound >= best_d
                    {
                        continue;
                    }
                    child.nearest(x, y, best);
                }
            }
        }
    }

    /// Depth of the deepest node below (and including) this one, the root counting as 0.
    #[cfg(test)]
    pub(crate) fn height(&self) -> usize {
        match &self.kind {
            Kind::Leaf(_) => 0,
            Kind::Internal(children) => 1 + children.iter().map(Self::height).max().unwrap_or(0),
        }
    }
}

impl<P: Point> core::fmt::Debug for Node<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Node")
            .field("bounds", &self.bounds)
            .field("count", &self.count)
            .field("leaf", &self.is_leaf())
            .finish_non_exhaustive()
    }
}
