// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Neighbor finding across quadrant boundaries.
//!
//! The walk is the classic one: a step toward a sibling on the near side of the
//! parent resolves locally; a step across the parent's boundary first resolves
//! the parent's own neighbor on that side, then descends into the mirrored
//! child. Cost is proportional to the distance to the lowest common ancestor,
//! not to tree depth in the common case.
//!
//! Two modes make the mutation boundary visible at call sites:
//!
//! - [`QuadTree::try_neighbor`] is a pure read. An unmaterialized neighbor is an
//!   ordinary `None`, never an error — absence is the expected state of a lazily
//!   built structure.
//! - [`QuadTree::neighbor_or_create`] materializes missing siblings and
//!   children along the walk, and promotes the root when the walk ascends past
//!   it. It always succeeds, and it is why navigation can query and grow the
//!   index in a single pass.

use crate::scalar::Scalar;
use crate::store::ObjectStore;
use crate::transform::Quadrant;
use crate::tree::{NodeIndex, QuadTree};

#[derive(Copy, Clone)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn far_side(self, slot: Quadrant) -> bool {
        match self {
            Self::X => slot.is_right(),
            Self::Y => slot.is_bottom(),
        }
    }

    fn mirror(self, slot: Quadrant) -> Quadrant {
        match self {
            Self::X => slot.mirror_x(),
            Self::Y => slot.mirror_y(),
        }
    }

    // Promotion slot when walking off an unpromoted root: keep the old root on
    // the side the walk is leaving from, so the requested sibling exists under
    // the new root.
    fn promotion_slot(self, positive: bool) -> Quadrant {
        match (self, positive) {
            (Self::X, true) | (Self::Y, true) => Quadrant::TopLeft,
            (Self::X, false) => Quadrant::TopRight,
            (Self::Y, false) => Quadrant::BottomLeft,
        }
    }
}

fn assert_step(dx: i8, dy: i8) {
    assert!(
        (-1..=1).contains(&dx) && (-1..=1).contains(&dy),
        "neighbor steps are unit steps: dx, dy must be -1, 0, or 1"
    );
}

impl QuadTree {
    /// The neighbor of `start` one frame over in `(dx, dy)`, without mutating.
    ///
    /// `dx` and `dy` are unit steps; the x axis is resolved fully before y when
    /// both are non-zero. Returns `None` when any node on the walk — the
    /// neighbor itself, or an ancestor's neighbor it would hang from — has not
    /// been materialized, or when the walk would leave an unpromoted root.
    pub fn try_neighbor(&self, start: NodeIndex, dx: i8, dy: i8) -> Option<NodeIndex> {
        assert_step(dx, dy);
        if dx != 0 {
            let across = self.try_step(start, Axis::X, dx > 0)?;
            self.try_neighbor(across, 0, dy)
        } else if dy != 0 {
            self.try_step(start, Axis::Y, dy > 0)
        } else {
            Some(start)
        }
    }

    /// The neighbor of `start` one frame over in `(dx, dy)`, growing the tree
    /// as needed.
    ///
    /// Missing siblings and mirrored children are materialized on the way; if
    /// the walk ascends past the current root, the root is promoted first (the
    /// old root keeps the slot opposite the travel direction). The borrow makes
    /// the coupling explicit: this read can append both nodes and objects.
    pub fn neighbor_or_create<T: Scalar, S: ObjectStore<T>>(
        &mut self,
        store: &mut S,
        start: NodeIndex,
        dx: i8,
        dy: i8,
    ) -> NodeIndex {
        assert_step(dx, dy);
        if dx != 0 {
            let across = self.step_or_create(store, start, Axis::X, dx > 0);
            self.neighbor_or_create(store, across, 0, dy)
        } else if dy != 0 {
            self.step_or_create(store, start, Axis::Y, dy > 0)
        } else {
            start
        }
    }

    fn try_step(&self, start: NodeIndex, axis: Axis, positive: bool) -> Option<NodeIndex> {
        let node = self.node(start);
        let slot = node.slot()?;
        let parent = node.parent()?;
        let mirrored = axis.mirror(slot);
        if axis.far_side(slot) == positive {
            // Crossing the parent's boundary: hang off the parent's neighbor.
            let adjacent = self.try_step(parent, axis, positive)?;
            self.child(adjacent, mirrored)
        } else {
            // Sibling under the same parent.
            self.child(parent, mirrored)
        }
    }

    fn step_or_create<T: Scalar, S: ObjectStore<T>>(
        &mut self,
        store: &mut S,
        start: NodeIndex,
        axis: Axis,
        positive: bool,
    ) -> NodeIndex {
        let node = self.node(start);
        let (slot, parent) = match (node.slot(), node.parent()) {
            (Some(slot), Some(parent)) => (slot, parent),
            _ => {
                let slot = axis.promotion_slot(positive);
                let parent = self.promote_root(store, slot);
                (slot, parent)
            }
        };
        let mirrored = axis.mirror(slot);
        if axis.far_side(slot) == positive {
            let adjacent = self.step_or_create(store, parent, axis, positive);
            self.child_or_create(store, adjacent, mirrored)
        } else {
            self.child_or_create(store, parent, mirrored)
        }
    }
}
