// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar and point abstractions, and the half-open [`Boundary`] rectangle.

use core::fmt::Debug;

use crate::util::{distance_squared, max_t, min_t};

/// Numeric scalar abstraction for quadtree coordinates.
///
/// Distances are only ever compared, never reported, so they are computed
/// squared in a widened accumulator type (f32→f64, i64→i128) and no square
/// root is needed.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type used for squared distances.
    type Acc: Copy
        + PartialOrd
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Midpoint between a and b (used for quadrant splits).
    fn mid(a: Self, b: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// `dx * dx + dy * dy`, saturating at the accumulator's maximum for integers.
    fn sum_squares(dx: Self::Acc, dy: Self::Acc) -> Self::Acc;

    /// `max - min`, or `None` if the difference does not fit in `Self`.
    fn checked_span(min: Self, max: Self) -> Option<Self>;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }

    #[inline]
    fn sum_squares(dx: f64, dy: f64) -> f64 {
        dx * dx + dy * dy
    }

    #[inline]
    fn checked_span(min: Self, max: Self) -> Option<Self> {
        Some(max - min)
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline(always)]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline]
    fn sum_squares(dx: Self, dy: Self) -> Self {
        dx * dx + dy * dy
    }

    #[inline]
    fn checked_span(min: Self, max: Self) -> Option<Self> {
        Some(max - min)
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline(always)]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow, rounded towards -∞: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }

    #[inline]
    fn sum_squares(dx: i128, dy: i128) -> i128 {
        // Differences of two i64 span up to 2^64, whose square does not fit in i128.
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    #[inline]
    fn checked_span(min: Self, max: Self) -> Option<Self> {
        max.checked_sub(min)
    }
}

/// Helper alias for the widened accumulator type `Scalar::Acc` associated with a `T: Scalar`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

/// Anything with two read-only coordinates that can be stored in a
/// [`QuadTree`][crate::QuadTree].
///
/// Membership operations ([`contains`][crate::QuadTree::contains],
/// [`remove`][crate::QuadTree::remove]) additionally require `PartialEq`.
/// Coordinates must not change while the point is stored.
pub trait Point {
    /// Coordinate type.
    type Scalar: Scalar;

    /// Horizontal coordinate.
    fn x(&self) -> Self::Scalar;

    /// Vertical coordinate.
    fn y(&self) -> Self::Scalar;
}

impl<T: Scalar> Point for (T, T) {
    type Scalar = T;

    #[inline]
    fn x(&self) -> T {
        self.0
    }

    #[inline]
    fn y(&self) -> T {
        self.1
    }
}

impl<T: Scalar> Point for [T; 2] {
    type Scalar = T;

    #[inline]
    fn x(&self) -> T {
        self[0]
    }

    #[inline]
    fn y(&self) -> T {
        self[1]
    }
}

impl<P: Point + ?Sized> Point for &P {
    type Scalar = P::Scalar;

    #[inline]
    fn x(&self) -> Self::Scalar {
        (**self).x()
    }

    #[inline]
    fn y(&self) -> Self::Scalar {
        (**self).y()
    }
}

#[cfg(feature = "kurbo")]
impl Point for kurbo::Point {
    type Scalar = f64;

    #[inline]
    fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

/// Axis-aligned, half-open rectangle: `[min_x, max_x) × [min_y, max_y)`.
///
/// The minimum edges belong to the rectangle, the maximum edges do not, so
/// the four [`quadrants`][Self::quadrants] of a boundary cover it without gaps
/// or overlap. Coordinates are assumed to be finite and not NaN.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Boundary<T> {
    /// Minimum x (left), inclusive.
    pub min_x: T,
    /// Minimum y (bottom), inclusive.
    pub min_y: T,
    /// Maximum x (right), exclusive.
    pub max_x: T,
    /// Maximum y (top), exclusive.
    pub max_y: T,
}

impl<T> Boundary<T> {
    /// Create a new boundary from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Scalar> Boundary<T> {
    /// Whether the point lies inside the half-open rectangle.
    ///
    /// ```
    /// use understory_quadtree::Boundary;
    ///
    /// let b = Boundary::new(0.0, 0.0, 10.0, 10.0);
    /// assert!(b.contains(0.0, 0.0));
    /// assert!(!b.contains(10.0, 5.0));
    /// ```
    #[inline]
    pub fn contains(&self, x: T, y: T) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    /// Clamp `(x, y)` into the rectangle, per axis.
    #[inline]
    pub fn closest_point(&self, x: T, y: T) -> (T, T) {
        (
            max_t(min_t(x, self.max_x), self.min_x),
            max_t(min_t(y, self.max_y), self.min_y),
        )
    }

    /// Squared distance from `(x, y)` to the closest point of the rectangle.
    ///
    /// This is zero for points inside and a lower bound on the distance to
    /// anything stored under a node with this boundary.
    #[inline]
    pub fn distance_squared(&self, x: T, y: T) -> T::Acc {
        let (cx, cy) = self.closest_point(x, y);
        distance_squared(cx, cy, x, y)
    }

    /// Horizontal split coordinate.
    #[inline]
    pub fn mid_x(&self) -> T {
        T::mid(self.min_x, self.max_x)
    }

    /// Vertical split coordinate.
    #[inline]
    pub fn mid_y(&self) -> T {
        T::mid(self.min_y, self.max_y)
    }

    /// Return true if the rectangle has no area. NaN edges count as empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.min_x < self.max_x && self.min_y < self.max_y)
    }

    /// The four quadrants split at the midpoints, in the order top-left,
    /// top-right, bottom-left, bottom-right ("top" is the `y >= mid_y` half).
    pub fn quadrants(&self) -> [Self; 4] {
        let (mx, my) = (self.mid_x(), self.mid_y());
        [
            Self::new(self.min_x, my, mx, self.max_y),
            Self::new(mx, my, self.max_x, self.max_y),
            Self::new(self.min_x, self.min_y, mx, my),
            Self::new(mx, self.min_y, self.max_x, my),
        ]
    }

    /// Index into [`quadrants`][Self::quadrants] of the quadrant covering a
    /// point this boundary contains.
    #[inline]
    pub(crate) fn quadrant_of(&self, x: T, y: T) -> usize {
        let right = x >= self.mid_x();
        let bottom = y < self.mid_y();
        usize::from(right) | (usize::from(bottom) << 1)
    }

    /// Whether bisecting yields four non-empty quadrants.
    #[inline]
    pub(crate) fn can_split(&self) -> bool {
        let (mx, my) = (self.mid_x(), self.mid_y());
        self.min_x < mx && mx < self.max_x && self.min_y < my && my < self.max_y
    }
}

impl<T: Scalar + From<i8>> Default for Boundary<T> {
    /// The square `[-12, 12) × [-12, 12)`.
    fn default() -> Self {
        Self::new(T::from(-12), T::from(-12), T::from(12), T::from(12))
    }
}
