// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `QuadTree` API.

use crate::config::Config;
use crate::error::{ConfigError, OutOfBounds};
use crate::iter::Points;
use crate::node::{Limits, Node};
use crate::types::{Boundary, Point, Scalar};

/// A region quadtree over points.
///
/// The tree covers a fixed, half-open [`Boundary`]. Each node holds up to
/// `capacity` points; the insert that pushes a leaf past its capacity splits
/// it into four quadrants and pushes its points down. Nodes never merge back.
///
/// The tree exclusively owns its nodes and every stored point. All operations
/// are synchronous; mutation needs `&mut self`, so a range iterator can never
/// observe a tree that changes underneath it. Share a tree across threads
/// only behind external locking.
///
/// ## Example
///
/// ```rust
/// use understory_quadtree::{Boundary, QuadTree};
///
/// let mut tree = QuadTree::new(4, Boundary::new(-12.0, -12.0, 12.0, 12.0)).unwrap();
/// tree.insert((1.0, 1.0)).unwrap();
/// tree.insert((2.0, 2.0)).unwrap();
/// tree.insert((5.0, 5.0)).unwrap();
///
/// assert!(tree.contains(&(2.0, 2.0)));
/// assert_eq!(tree.find_nearest(3.0, 3.0), Some(&(2.0, 2.0)));
///
/// let close: Vec<_> = tree.find_range(1.0, 1.0, 2.0).collect();
/// assert_eq!(close, [&(1.0, 1.0), &(2.0, 2.0)]);
///
/// // Points outside the boundary are handed back.
/// let err = tree.insert((20.0, 0.0)).unwrap_err();
/// assert_eq!(err.into_inner(), (20.0, 0.0));
/// assert_eq!(tree.len(), 3);
/// ```
pub struct QuadTree<P: Point> {
    root: Node<P>,
    limits: Limits,
    len: usize,
}

impl<P: Point> QuadTree<P> {
    /// Create an empty tree with the given node capacity over `boundary`.
    ///
    /// # Errors
    ///
    /// Fails if `capacity` is zero or `boundary` has no area; see
    /// [`Config::validate`].
    pub fn new(capacity: usize, boundary: Boundary<P::Scalar>) -> Result<Self, ConfigError> {
        Self::with_config(Config {
            capacity,
            ..Config::new(boundary)
        })
    }

    /// Create an empty tree from explicit parameters.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not [validate][Config::validate].
    pub fn with_config(config: Config<P::Scalar>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: Config<P::Scalar>) -> Self {
        Self {
            root: Node::leaf(config.boundary),
            limits: Limits {
                capacity: config.capacity,
                max_depth: config.max_depth,
            },
            len: 0,
        }
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.len, self.root.count, "length out of sync with root");
        self.len
    }

    /// Whether no points are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Points a node holds before it subdivides.
    pub fn capacity(&self) -> usize {
        self.limits.capacity
    }

    /// Depth at which nodes stop subdividing.
    pub fn max_depth(&self) -> u8 {
        self.limits.max_depth
    }

    /// The fixed outer boundary.
    pub fn boundary(&self) -> Boundary<P::Scalar> {
        self.root.bounds
    }

    /// Store a point.
    ///
    /// Equal points may be stored more than once.
    ///
    /// # Errors
    ///
    /// Returns the point inside [`OutOfBounds`] if the outer boundary does not
    /// contain it; the tree is left unchanged.
    pub fn insert(&mut self, point: P) -> Result<(), OutOfBounds<P>> {
        if !self.root.bounds.contains(point.x(), point.y()) {
            tracing::debug!(
                x = ?point.x(),
                y = ?point.y(),
                bounds = ?self.root.bounds,
                "rejecting point outside quadtree boundary"
            );
            return Err(OutOfBounds(point));
        }
        self.root.insert(point, self.limits, 0);
        self.len += 1;
        Ok(())
    }

    /// Remove every point, keeping the boundary and limits.
    pub fn clear(&mut self) {
        tracing::debug!(len = self.len, "clearing quadtree");
        self.root = Node::leaf(self.root.bounds);
        self.len = 0;
    }

    /// Lazily iterate the points strictly closer than `exclusive_radius` to `(x, y)`.
    ///
    /// Points at exactly `exclusive_radius` are excluded, so a radius of zero
    /// (or less) yields nothing. Subtrees whose boundary is not strictly
    /// closer than the radius are never visited.
    pub fn find_range(
        &self,
        x: P::Scalar,
        y: P::Scalar,
        exclusive_radius: P::Scalar,
    ) -> Points<'_, P> {
        Points::within(&self.root, x, y, exclusive_radius)
    }

    /// Visit the points strictly closer than `exclusive_radius` to `(x, y)`
    /// (does not allocate).
    ///
    /// Calls `f(point)` for each match, in the same order as [`find_range`][Self::find_range].
    pub fn visit_range<F: FnMut(&P)>(
        &self,
        x: P::Scalar,
        y: P::Scalar,
        exclusive_radius: P::Scalar,
        mut f: F,
    ) {
        if !(exclusive_radius > <P::Scalar as Scalar>::zero()) {
            return;
        }
        let r = <P::Scalar as Scalar>::widen(exclusive_radius);
        let radius_sq = r * r;
        if self.root.count > 0 && self.root.bounds.distance_squared(x, y) < radius_sq {
            self.root.visit_range(x, y, radius_sq, &mut f);
        }
    }

    /// The stored point closest to `(x, y)`, or `None` if the tree is empty.
    ///
    /// `(x, y)` may lie outside the boundary. When several points are equally
    /// close, which one is returned is unspecified.
    pub fn find_nearest(&self, x: P::Scalar, y: P::Scalar) -> Option<&P> {
        let mut best = None;
        self.root.nearest(x, y, &mut best);
        best.map(|(p, _)| p)
    }

    /// Lazily iterate every stored point.
    pub fn iter(&self) -> Points<'_, P> {
        Points::all(&self.root)
    }
}

impl<P: Point + PartialEq> QuadTree<P> {
    /// Whether a point equal to `point` is stored.
    pub fn contains(&self, point: &P) -> bool {
        self.root.bounds.contains(point.x(), point.y()) && self.root.contains(point)
    }

    /// Remove one point equal to `point` and return it.
    ///
    /// Returns `None`, changing nothing, if no such point is stored.
    pub fn take(&mut self, point: &P) -> Option<P> {
        if !self.root.bounds.contains(point.x(), point.y()) {
            return None;
        }
        let taken = self.root.take(point)?;
        self.len -= 1;
        Some(taken)
    }

    /// Remove one point equal to `point`. Returns `true` if one was removed.
    pub fn remove(&mut self, point: &P) -> bool {
        self.take(point).is_some()
    }
}

impl<P> Default for QuadTree<P>
where
    P: Point,
    P::Scalar: From<i8>,
{
    /// Capacity 4 over `[-12, 12) × [-12, 12)`.
    fn default() -> Self {
        Self::from_valid(Config::default())
    }
}

impl<'a, P: Point> IntoIterator for &'a QuadTree<P> {
    type Item = &'a P;
    type IntoIter = Points<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: Point> core::fmt::Debug for QuadTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("len", &self.len)
            .field("capacity", &self.limits.capacity)
            .field("max_depth", &self.limits.max_depth)
            .field("boundary", &self.root.bounds)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
