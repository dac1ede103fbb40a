// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The numeric contract all coordinates use.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// An ordered field used for every coordinate in the tree.
///
/// Each node of the tree re-normalizes its content into a local `[0,1]²` frame, so an
/// implementation only ever has to distinguish values within a single frame. Keeping
/// that precision requirement bounded as zoom deepens is the tree's job, not the
/// scalar's: `f64` is plenty for interactive use, and an exact type (rational, or a
/// deferred-exact representation) slots in for lossless unbounded zoom.
///
/// Frame transforms use only `+ - * /` against the constants below, so an exact
/// implementation stays exact through [`to_child`](crate::to_child) /
/// [`from_child`](crate::from_child) round trips.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Additive identity.
    fn zero() -> Self;

    /// Multiplicative identity; the far edge of a local frame.
    fn one() -> Self;

    /// The frame scale factor between adjacent tree levels.
    fn two() -> Self;

    /// The quadrant midline, and the canonical view-size lower bound.
    fn half() -> Self {
        Self::one() / Self::two()
    }

    /// Lossy conversion for handing a coordinate to a platform rasterizer.
    fn to_f64(self) -> f64;
}

impl Scalar for f32 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn two() -> Self {
        2.0
    }

    #[inline]
    fn half() -> Self {
        0.5
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Scalar for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn two() -> Self {
        2.0
    }

    #[inline]
    fn half() -> Self {
        0.5
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}
