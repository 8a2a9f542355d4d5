// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

/// Reasons a [`Config`][crate::Config] cannot build a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Nodes must be able to hold at least one point before subdividing.
    #[error("node capacity must be at least 1")]
    ZeroCapacity,
    /// The outer boundary has no area (or a NaN edge).
    #[error("boundary must have positive width and height")]
    EmptyBoundary,
    /// The outer boundary is wider or taller than the coordinate type can represent.
    #[error("boundary width and height must fit in the coordinate type")]
    BoundaryTooLarge,
}

/// A point rejected by [`QuadTree::insert`][crate::QuadTree::insert] because
/// it lies outside the tree's fixed outer boundary.
///
/// The rejected point is handed back to the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("point lies outside the quadtree boundary")]
pub struct OutOfBounds<P>(pub P);

impl<P> OutOfBounds<P> {
    /// Recover the rejected point.
    pub fn into_inner(self) -> P {
        self.0
    }
}
