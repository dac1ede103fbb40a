// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=fathom_quadtree --heading-base-level=0

//! Fathom Quadtree: a lazily materialized quadtree with per-node coordinate
//! re-normalization.
//!
//! Fathom Quadtree is the spatial core of an infinitely zoomable vector-document
//! viewer. The hard problem it solves is numeric, not structural: a viewport that
//! can zoom without bound must never need unbounded precision in a single
//! coordinate frame. Every node of the tree therefore re-normalizes its quarter
//! of the parent into a local `[0,1]²` frame of its own, and all coordinates —
//! object bounds and the viewport alike — are expressed in the frame of the node
//! they are anchored to.
//!
//! - [`to_child`] / [`from_child`] map rectangles between adjacent frames,
//!   exactly (given an exact [`Scalar`]).
//! - [`QuadTree`] is an append-only node arena over a shared, append-only
//!   [`ObjectStore`]. Children materialize on demand and copy the subset of the
//!   parent's objects that fit their quadrant, re-normalized; boundary
//!   straddlers stay with the ancestor, so deep nodes self-prune by scale.
//! - [`QuadTree::try_neighbor`] / [`QuadTree::neighbor_or_create`] walk across
//!   quadrant boundaries, the latter growing siblings — and promoting the root —
//!   as a side effect of the query.
//!
//! The crate is deliberately free of rendering concerns; a companion view crate
//! anchors a viewport to a node and consumes these queries per frame.
//!
//! # Example
//!
//! ```rust
//! use fathom_quadtree::{FlatStore, ObjectStore, QuadTree, Quadrant, Rect};
//!
//! // Author a tiny document: one square in the upper-left region.
//! let mut store: FlatStore<f64> = FlatStore::new();
//! store.append(0, Rect::new(0.2, 0.2, 0.1, 0.1), 0);
//!
//! // Build the tree; the TopLeft child is materialized eagerly and holds a
//! // copy of the square re-normalized into its own frame.
//! let mut tree = QuadTree::new(&mut store);
//! let child = tree.child(tree.root(), Quadrant::TopLeft).unwrap();
//! let copy = tree.node(child).objects().start;
//! assert_eq!(store.bounds(copy), Rect::new(0.4, 0.4, 0.2, 0.2));
//!
//! // Pure neighbor reads never mutate; generating reads grow the tree.
//! assert_eq!(tree.try_neighbor(child, 1, 0), None);
//! let right = tree.neighbor_or_create(&mut store, child, 1, 0);
//! assert_eq!(tree.try_neighbor(child, 1, 0), Some(right));
//! ```
//!
//! ## Resource model
//!
//! Single-threaded by construction: generating queries take `&mut` on both the
//! tree and the store, so the queries-mutate coupling is visible in every
//! signature. Nothing is ever freed — each materialized level duplicates the
//! objects that fit inside it, and long navigation sessions grow the arena and
//! store without bound. That trade is deliberate (ranges stay valid forever,
//! revisits are free); [`QuadTree::node_count`] and [`ObjectStore::len`] expose
//! the growth so callers can watch it.

#![no_std]

extern crate alloc;

mod neighbor;
pub mod rect;
pub mod scalar;
pub mod store;
pub mod transform;
pub mod tree;

pub use rect::Rect;
pub use scalar::Scalar;
pub use store::{FlatStore, ObjectStore};
pub use transform::{Quadrant, contained_in_child, from_child, intersects_child, to_child};
pub use tree::{Node, NodeIndex, QuadTree};
