// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cmp::Ordering;

use crate::types::{Point, Scalar};

/// Squared Euclidean distance between two coordinate pairs, in the widened accumulator.
///
/// Integer coordinates are widened before subtracting, so the differences are exact; the sum
/// saturates once it no longer fits the accumulator.
#[inline]
pub(crate) fn distance_squared<T: Scalar>(ax: T, ay: T, bx: T, by: T) -> T::Acc {
    let dx = T::widen(ax) - T::widen(bx);
    let dy = T::widen(ay) - T::widen(by);
    T::sum_squares(dx, dy)
}

/// Squared distance from a stored point to a query location.
#[inline]
pub(crate) fn point_distance_squared<P: Point>(
    point: &P,
    x: P::Scalar,
    y: P::Scalar,
) -> <P::Scalar as Scalar>::Acc {
    distance_squared(point.x(), point.y(), x, y)
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}
