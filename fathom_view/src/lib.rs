// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=fathom_view --heading-base-level=0

//! Fathom View: viewport canonicalization and render gating over a fathom
//! quadtree.
//!
//! Fathom View owns the per-frame half of the infinite-zoom story. The tree
//! ([`fathom_quadtree`]) keeps document content re-normalized per node; this
//! crate keeps the *viewport* re-normalized — anchored to the most specific
//! node that fully contains it, with its rectangle's extent held in `[½, 1]` —
//! and decides how much rendering work a frame actually needs.
//!
//! - [`View`]: the anchored viewport. Pan and zoom move its rectangle and mark
//!   staleness; [`View::canonicalize`] re-anchors once per frame, descending,
//!   sliding across neighbors, or promoting the root as navigation demands.
//!   Canonicalization can grow the tree: it is a query that mutates, and the
//!   `&mut` borrows say so.
//! - [`Invalidation`]: three independent dirty flags (`BOUNDS`, `BUFFER`,
//!   `RENDER`), each gating one tier of per-frame cost.
//! - [`render_frame`]: the frame gate. Nothing stale and lazy rendering on —
//!   one [`Rasterizer::blit`], O(1) regardless of document size. Otherwise it
//!   redoes exactly the stale tiers and walks the anchor node plus whichever
//!   right/bottom/diagonal neighbors the view overlaps.
//!
//! # Example
//!
//! ```rust
//! use fathom_quadtree::{FlatStore, ObjectStore, QuadTree, Rect};
//! use fathom_view::{FrameStatus, Rasterizer, RenderOptions, View, render_frame};
//!
//! struct Sink;
//! impl Rasterizer<f64> for Sink {
//!     fn prepare(&mut self) {}
//!     fn upload(&mut self) {}
//!     fn draw(&mut self, _kind: u16, _detail: u32, _frame: kurbo::Rect) {}
//!     fn blit(&mut self) {}
//! }
//!
//! let mut store: FlatStore<f64> = FlatStore::new();
//! store.append(0, Rect::new(0.2, 0.2, 0.1, 0.1), 0);
//! let mut tree = QuadTree::new(&mut store);
//!
//! let mut view = View::new(tree.root());
//! view.scale(0.4); // zoom in
//!
//! let mut raster = Sink;
//! let options = RenderOptions::default();
//! let first = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
//! assert!(matches!(first, FrameStatus::Rendered { .. }));
//!
//! // The viewport has not moved since: the cached output is reused verbatim.
//! let second = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
//! assert_eq!(second, FrameStatus::Reused);
//! ```
//!
//! This crate is `no_std`; the per-frame paths allocate nothing.

#![no_std]

extern crate alloc;

mod render;
pub mod types;
mod view;

pub use render::{Rasterizer, project, render_frame};
pub use types::{FrameStatus, Invalidation, RenderOptions};
pub use view::View;
