// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Quadtree: a point region quadtree.
//!
//! Understory Quadtree indexes two-dimensional points inside a fixed, half-open
//! boundary and answers the two queries a scene or simulation layer usually
//! needs from a point set:
//!
//! - **Range**: every point strictly closer than a radius to a location, as a
//!   lazy iterator that never descends into quadrants the disk cannot reach.
//! - **Nearest**: the single closest point to a location, found by a
//!   best-first branch-and-bound search that reads a handful of points even in
//!   very large trees.
//!
//! Points are anything implementing [`Point`] (tuples, `[T; 2]`, references,
//! and `kurbo::Point` with the `kurbo` feature). The tree is generic over the
//! scalar type `T` ([`f32`], [`f64`], [`i64`]) and does not depend on any
//! geometry crate.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::QuadTree;
//!
//! // Capacity 4 over [-12, 12) × [-12, 12).
//! let mut tree: QuadTree<(f64, f64)> = QuadTree::default();
//! for p in [(1.0, 1.0), (1.0, 1.99), (2.0, 2.0), (1.0, 10.0), (10.0, 1.0), (5.0, 5.0)] {
//!     tree.insert(p).unwrap();
//! }
//!
//! // Range queries exclude points at exactly the radius.
//! let near: Vec<_> = tree.find_range(1.0, 1.0, 1.0).collect();
//! assert_eq!(near.len(), 2);
//!
//! assert_eq!(tree.find_nearest(3.0, 3.0), Some(&(2.0, 2.0)));
//! assert!(tree.remove(&(2.0, 2.0)));
//! assert_eq!(tree.len(), 5);
//! ```
//!
//! ## Subdivision
//!
//! A leaf holds up to `capacity` points. The insert that adds one more splits
//! the leaf into four quadrants at its midpoints and pushes its points down;
//! nodes never merge back. Splitting stops at [`Config::max_depth`] and when a
//! boundary can no longer be bisected (unit cells of an integer tree), so
//! many identical points end up sharing one oversized leaf instead of
//! recursing forever.
//!
//! ## Out-of-bounds points
//!
//! The boundary is fixed. [`QuadTree::insert`] rejects a point outside it
//! with [`OutOfBounds`], handing the point back; it is never silently dropped.
//!
//! ## Features
//!
//! - `std` *(default)*: enables `std` support in dependencies.
//! - `libm`: no_std float support for `kurbo`.
//! - `kurbo`: implements [`Point`] for `kurbo::Point`.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs and no infinities for coordinates. Distances are
//! compared squared in a widened accumulator (f32→f64, i64→i128).
//!
//! For `i64` trees, [`Config::validate`] rejects a boundary spanning `2^63` or
//! more on either axis. Query coordinates may be any `i64`. Squared distances
//! are exact while the query lies within `2^63` of a point or node boundary
//! on each axis; farther away they saturate at `i128::MAX`, so queries never
//! overflow, but among points that are all that far away
//! [`QuadTree::find_nearest`] may return any of them.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod iter;
mod node;
mod tree;
mod types;
pub(crate) mod util;

#[cfg(test)]
mod tests;

pub use config::{Config, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH};
pub use error::{ConfigError, OutOfBounds};
pub use iter::Points;
pub use tree::QuadTree;
pub use types::{Boundary, Point, Scalar, ScalarAcc};
