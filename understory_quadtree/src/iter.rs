// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy traversal of stored points.

use alloc::vec::Vec;
use core::iter::FusedIterator;
use core::slice;

use crate::node::{Kind, Node};
use crate::types::{Point, Scalar};
use crate::util::point_distance_squared;

/// Open disk `distance((x, y), p) < radius`, kept squared.
#[derive(Copy, Clone, Debug)]
struct Disk<T: Scalar> {
    x: T,
    y: T,
    radius_sq: T::Acc,
}

impl<T: Scalar> Disk<T> {
    fn reaches<P: Point<Scalar = T>>(&self, node: &Node<P>) -> bool {
        node.bounds.distance_squared(self.x, self.y) < self.radius_sq
    }

    fn holds<P: Point<Scalar = T>>(&self, point: &P) -> bool {
        point_distance_squared(point, self.x, self.y) < self.radius_sq
    }
}

/// Lazy iterator over stored points, returned by
/// [`QuadTree::find_range`][crate::QuadTree::find_range] and
/// [`QuadTree::iter`][crate::QuadTree::iter].
///
/// Subtrees are only expanded when the iterator reaches them, and (for range
/// queries) only when their boundary comes strictly closer than the radius, so
/// stopping early saves the work of the untouched subtrees. Points are
/// yielded leaf by leaf in quadrant order; callers should not rely on any
/// particular order.
///
/// The iterator borrows the tree, so the tree cannot be mutated while a query
/// is in flight.
pub struct Points<'a, P: Point> {
    disk: Option<Disk<P::Scalar>>,
    stack: Vec<&'a Node<P>>,
    bucket: slice::Iter<'a, P>,
}

impl<'a, P: Point> Points<'a, P> {
    /// Every point below `root`.
    pub(crate) fn all(root: &'a Node<P>) -> Self {
        let mut stack = Vec::new();
        if root.count > 0 {
            stack.push(root);
        }
        Self {
            disk: None,
            stack,
            bucket: slice::Iter::default(),
        }
    }

    /// Points below `root` strictly closer than `radius` to `(x, y)`.
    ///
    /// A radius that is not positive (including NaN) matches nothing.
    pub(crate) fn within(root: &'a Node<P>, x: P::Scalar, y: P::Scalar, radius: P::Scalar) -> Self {
        let mut stack = Vec::new();
        let disk = if radius > <P::Scalar as Scalar>::zero() {
            let r = <P::Scalar as Scalar>::widen(radius);
            let disk = Disk {
                x,
                y,
                radius_sq: r * r,
            };
            if root.count > 0 && disk.reaches(root) {
                stack.push(root);
            }
            Some(disk)
        } else {
            None
        };
        Self {
            disk,
            stack,
            bucket: slice::Iter::default(),
        }
    }

    fn admits(&self, node: &Node<P>) -> bool {
        node.count > 0 && self.disk.is_none_or(|d| d.reaches(node))
    }
}

impl<'a, P: Point> Iterator for Points<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<&'a P> {
        loop {
            let disk = self.disk;
            if let Some(p) = self
                .bucket
                .find(|p| disk.is_none_or(|d| d.holds(*p)))
            {
                return Some(p);
            }
            let node = self.stack.pop()?;
            match &node.kind {
                Kind::Leaf(points) => self.bucket = points.iter(),
                Kind::Internal(children) => {
                    // Reversed so quadrants pop in their natural order.
                    for child in children.iter().rev() {
                        if self.admits(child) {
                            self.stack.push(child);
                        }
                    }
                }
            }
        }
    }
}

impl<P: Point> FusedIterator for Points<'_, P> {}

impl<P: Point> core::fmt::Debug for Points<'_, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Points")
            .field("disk", &self.disk)
            .field("pending_nodes", &self.stack.len())
            .field("bucket_remaining", &self.bucket.len())
            .finish()
    }
}
