// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport state and per-frame canonicalization.
//!
//! A view is a rectangle expressed in the local frame of the node it is
//! anchored to. Transforms (pan, zoom) just move that rectangle and mark it
//! stale; once per frame, [`View::canonicalize`] re-anchors it to the most
//! specific node that fully contains it, driving the rectangle's extent into
//! `[½, 1]`. All the numeric headroom the system ever needs is whatever it
//! takes to express a `[½, 1]`-sized rectangle in a `[0,1]²` frame — that is
//! the invariant that makes unbounded zoom work.

use fathom_quadtree::{
    NodeIndex, ObjectStore, QuadTree, Quadrant, Rect, Scalar, contained_in_child, from_child,
    to_child,
};

use crate::types::Invalidation;

/// A viewport anchored to a tree node.
#[derive(Clone, Debug)]
pub struct View<T> {
    node: NodeIndex,
    bounds: Rect<T>,
    dirty: Invalidation,
}

impl<T: Scalar> View<T> {
    /// A view of `anchor`'s whole frame, fully stale.
    pub fn new(anchor: NodeIndex) -> Self {
        Self {
            node: anchor,
            bounds: Rect::unit(),
            dirty: Invalidation::default(),
        }
    }

    /// The node the bounds are expressed relative to.
    pub fn node(&self) -> NodeIndex {
        self.node
    }

    /// The viewport rectangle, in `self.node()`'s local frame.
    pub fn bounds(&self) -> Rect<T> {
        self.bounds
    }

    /// Currently pending invalidation.
    pub fn dirty(&self) -> Invalidation {
        self.dirty
    }

    /// Mark external staleness, e.g. `RENDER` after a document edit.
    pub fn invalidate(&mut self, flags: Invalidation) {
        self.dirty |= flags;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = Invalidation::empty();
    }

    /// Pan by `(dx, dy)` in the current local frame.
    pub fn translate(&mut self, dx: T, dy: T) {
        self.bounds.x = self.bounds.x + dx;
        self.bounds.y = self.bounds.y + dy;
        self.dirty |= Invalidation::BOUNDS | Invalidation::BUFFER;
    }

    /// Zoom by `factor` about the view origin. Factors below one zoom in.
    pub fn scale(&mut self, factor: T) {
        self.scale_about(factor, T::zero(), T::zero());
    }

    /// Zoom by `factor` keeping the point `(cx, cy)` (in unit-viewport
    /// coordinates) fixed on screen.
    pub fn scale_about(&mut self, factor: T, cx: T, cy: T) {
        let px = self.bounds.x + cx * self.bounds.w;
        let py = self.bounds.y + cy * self.bounds.h;
        self.bounds.w = self.bounds.w * factor;
        self.bounds.h = self.bounds.h * factor;
        self.bounds.x = px - cx * self.bounds.w;
        self.bounds.y = py - cy * self.bounds.h;
        self.dirty |= Invalidation::BOUNDS | Invalidation::BUFFER;
    }

    /// Replace the viewport rectangle outright.
    pub fn set_bounds(&mut self, bounds: Rect<T>) {
        self.bounds = bounds;
        self.dirty |= Invalidation::BOUNDS | Invalidation::BUFFER;
    }

    /// Re-anchor the view to the most specific node fully containing it.
    ///
    /// Four phases, re-run to a fixed point: ascend while the view is larger
    /// than its frame (promoting the root if the tree runs out of ancestors),
    /// slide across neighbors while the origin is outside `[0,1)`, descend
    /// while a single quadrant fully contains the view, and force-descend into
    /// `BottomRight` while the view is smaller than half a frame but straddles
    /// a quadrant boundary. The forced step is a tie-break, not an optimality
    /// claim; sliding re-runs after it because the forced frame change can push
    /// the origin outside `[0,1)`, and it only fires while both extents fit the
    /// child frame, so a very elongated view stops early rather than
    /// overshooting its larger axis past one.
    ///
    /// Afterwards `bounds.w` and `bounds.h` lie in `[½, 1]`, except when no
    /// further descent was possible (an extent ratio above two leaves the
    /// smaller axis short). Running twice without an intervening transform
    /// changes nothing. `RENDER` is added to the pending invalidation when the
    /// anchor moved; no flag is cleared here — that belongs to the frame
    /// orchestration.
    pub fn canonicalize<S: ObjectStore<T>>(&mut self, tree: &mut QuadTree, store: &mut S) {
        debug_assert!(
            self.bounds.w > T::zero() && self.bounds.h > T::zero(),
            "degenerate viewport cannot be canonicalized"
        );
        let anchor_before = self.node;
        self.ascend(tree, store);
        self.slide(tree, store);
        let half = T::half();
        loop {
            if let Some(quadrant) = Quadrant::ALL
                .into_iter()
                .find(|&q| contained_in_child(self.bounds, q))
            {
                self.node = tree.child_or_create(store, self.node, quadrant);
                self.bounds = to_child(self.bounds, quadrant);
                continue;
            }
            if (self.bounds.w < half || self.bounds.h < half)
                && self.bounds.w <= half
                && self.bounds.h <= half
            {
                self.node = tree.child_or_create(store, self.node, Quadrant::BottomRight);
                self.bounds = to_child(self.bounds, Quadrant::BottomRight);
                self.slide(tree, store);
                continue;
            }
            break;
        }
        if self.node != anchor_before {
            self.dirty |= Invalidation::RENDER;
        }
    }

    fn ascend<S: ObjectStore<T>>(&mut self, tree: &mut QuadTree, store: &mut S) {
        while self.bounds.w > T::one() || self.bounds.h > T::one() {
            let node = tree.node(self.node);
            let (parent, slot) = match (node.parent(), node.slot()) {
                (Some(parent), Some(slot)) => (parent, slot),
                _ => {
                    // Out of ancestors: grow a root, keeping this one away from
                    // the side the view overflows toward.
                    let slot = match (self.bounds.x < T::zero(), self.bounds.y < T::zero()) {
                        (false, false) => Quadrant::TopLeft,
                        (true, false) => Quadrant::TopRight,
                        (false, true) => Quadrant::BottomLeft,
                        (true, true) => Quadrant::BottomRight,
                    };
                    (tree.promote_root(store, slot), slot)
                }
            };
            self.bounds = from_child(self.bounds, slot);
            self.node = parent;
        }
    }

    fn slide<S: ObjectStore<T>>(&mut self, tree: &mut QuadTree, store: &mut S) {
        while self.bounds.x > T::one() {
            self.bounds.x = self.bounds.x - T::one();
            self.node = tree.neighbor_or_create(store, self.node, 1, 0);
        }
        while self.bounds.x < T::zero() {
            self.bounds.x = self.bounds.x + T::one();
            self.node = tree.neighbor_or_create(store, self.node, -1, 0);
        }
        while self.bounds.y > T::one() {
            self.bounds.y = self.bounds.y - T::one();
            self.node = tree.neighbor_or_create(store, self.node, 0, 1);
        }
        while self.bounds.y < T::zero() {
            self.bounds.y = self.bounds.y + T::one();
            self.node = tree.neighbor_or_create(store, self.node, 0, -1);
        }
    }
}
