// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction parameters for a [`QuadTree`][crate::QuadTree].

use crate::error::ConfigError;
use crate::types::{Boundary, Scalar};

/// Default number of points a leaf holds before it subdivides.
pub const DEFAULT_CAPACITY: usize = 4;

/// Default maximum subdivision depth (the root is depth 0).
pub const DEFAULT_MAX_DEPTH: u8 = 32;

/// Fixed parameters of a quadtree.
///
/// All three values are immutable for the lifetime of the tree built from
/// them; the boundary never grows.
///
/// ```
/// use understory_quadtree::{Boundary, Config, QuadTree};
///
/// let config = Config {
///     capacity: 8,
///     ..Config::new(Boundary::new(0.0, 0.0, 1024.0, 768.0))
/// };
/// let tree: QuadTree<(f64, f64)> = QuadTree::with_config(config).unwrap();
/// assert_eq!(tree.capacity(), 8);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config<T> {
    /// Points a leaf holds before it subdivides. Must be at least 1.
    pub capacity: usize,
    /// Depth below which nodes stop subdividing.
    ///
    /// Leaves at this depth keep every point they are given, which is what
    /// bounds recursion when more than `capacity` points share coordinates.
    pub max_depth: u8,
    /// Outer boundary covered by the root node.
    pub boundary: Boundary<T>,
}

impl<T: Scalar> Config<T> {
    /// Default capacity and depth over the given boundary.
    pub fn new(boundary: Boundary<T>) -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
            boundary,
        }
    }

    /// Check that a tree can be built from these parameters.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroCapacity`] for a capacity of zero,
    /// [`ConfigError::EmptyBoundary`] for a boundary without area and
    /// [`ConfigError::BoundaryTooLarge`] for an integer boundary spanning
    /// `2^63` or more on either axis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let b = &self.boundary;
        if b.is_empty() {
            return Err(ConfigError::EmptyBoundary);
        }
        if T::checked_span(b.min_x, b.max_x).is_none()
            || T::checked_span(b.min_y, b.max_y).is_none()
        {
            return Err(ConfigError::BoundaryTooLarge);
        }
        Ok(())
    }
}

impl<T: Scalar + From<i8>> Default for Config<T> {
    fn default() -> Self {
        Self::new(Boundary::default())
    }
}
