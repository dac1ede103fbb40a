// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrant frame transforms.
//!
//! A node's four children each cover one quarter of its `[0,1]²` local frame and
//! re-normalize that quarter to a full `[0,1]²` frame of their own. The functions
//! here map rectangles between a parent frame and a child frame, and test a
//! rectangle against a quadrant's region in the parent frame.
//!
//! [`from_child`] inverts [`to_child`] exactly as long as the scalar's own
//! arithmetic is exact at the magnitudes involved; that round trip is what makes
//! unbounded zoom lossless.

use crate::rect::Rect;
use crate::scalar::Scalar;

/// One of the four quadrants of a node's local frame.
///
/// Quadrant membership of a node is stored as `Option<Quadrant>` (`None` for a
/// root that has never been promoted into a parent).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `[0, ½] × [0, ½]` of the parent frame.
    TopLeft,
    /// `[½, 1] × [0, ½]`.
    TopRight,
    /// `[0, ½] × [½, 1]`.
    BottomLeft,
    /// `[½, 1] × [½, 1]`.
    BottomRight,
}

impl Quadrant {
    /// All quadrants, in the fixed order descent tries them.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Position in a node's child array.
    pub const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }

    /// Whether this quadrant lies in the right half of the parent frame.
    pub const fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    /// Whether this quadrant lies in the bottom half of the parent frame.
    pub const fn is_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }

    /// The quadrant on the opposite side of the vertical midline.
    pub const fn mirror_x(self) -> Self {
        match self {
            Self::TopLeft => Self::TopRight,
            Self::TopRight => Self::TopLeft,
            Self::BottomLeft => Self::BottomRight,
            Self::BottomRight => Self::BottomLeft,
        }
    }

    /// The quadrant on the opposite side of the horizontal midline.
    pub const fn mirror_y(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomLeft,
            Self::TopRight => Self::BottomRight,
            Self::BottomLeft => Self::TopLeft,
            Self::BottomRight => Self::TopRight,
        }
    }
}

/// Re-express `r` (parent local frame) in the local frame of `quadrant`.
///
/// Scales all four fields by two, then shifts the origin left/up by one for
/// right/bottom quadrants. The result is meaningful even when `r` extends beyond
/// the quadrant; containment is a separate question ([`contained_in_child`]).
pub fn to_child<T: Scalar>(r: Rect<T>, quadrant: Quadrant) -> Rect<T> {
    let two = T::two();
    let mut x = r.x * two;
    let mut y = r.y * two;
    if quadrant.is_right() {
        x = x - T::one();
    }
    if quadrant.is_bottom() {
        y = y - T::one();
    }
    Rect::new(x, y, r.w * two, r.h * two)
}

/// Re-express `r` (local frame of `quadrant`) in the parent's local frame.
///
/// Exact inverse of [`to_child`]: shifts the origin back for right/bottom
/// quadrants, then halves all four fields.
pub fn from_child<T: Scalar>(r: Rect<T>, quadrant: Quadrant) -> Rect<T> {
    let mut x = r.x;
    let mut y = r.y;
    if quadrant.is_right() {
        x = x + T::one();
    }
    if quadrant.is_bottom() {
        y = y + T::one();
    }
    let two = T::two();
    Rect::new(x / two, y / two, r.w / two, r.h / two)
}

/// Whether `r` (parent local frame) lies entirely inside `quadrant`'s region.
///
/// Boundary-inclusive: a rectangle ending exactly on the midline still counts as
/// contained in the quadrant it touches, so only true straddlers are kept out of
/// every child.
pub fn contained_in_child<T: Scalar>(r: Rect<T>, quadrant: Quadrant) -> bool {
    let half = T::half();
    let x0 = if quadrant.is_right() { half } else { T::zero() };
    let y0 = if quadrant.is_bottom() { half } else { T::zero() };
    r.x >= x0 && r.y >= y0 && r.max_x() <= x0 + half && r.max_y() <= y0 + half
}

/// Whether `r` (parent local frame) overlaps `quadrant`'s region with positive area.
pub fn intersects_child<T: Scalar>(r: Rect<T>, quadrant: Quadrant) -> bool {
    let half = T::half();
    let x0 = if quadrant.is_right() { half } else { T::zero() };
    let y0 = if quadrant.is_bottom() { half } else { T::zero() };
    r.x < x0 + half && r.max_x() > x0 && r.y < y0 + half && r.max_y() > y0
}
