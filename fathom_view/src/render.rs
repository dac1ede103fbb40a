// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame orchestration: the rasterizer contract, the spill traversal, and the
//! dirty-flag gate in front of both.
//!
//! Rendering proper happens elsewhere; this module decides *what* to hand the
//! rasterizer and *whether* to hand it anything at all. The anchor node's own
//! objects are always submitted; content spilling in from the right, bottom,
//! and bottom-right neighbors is submitted by shifting the view bounds one
//! frame over and recursing. Clipping to the viewport is the rasterizer's
//! business — spilled objects may project outside the unit viewport.

use fathom_quadtree::{NodeIndex, ObjectStore, QuadTree, Rect, Scalar};

use crate::types::{FrameStatus, Invalidation, RenderOptions};
use crate::view::View;

/// Outgoing contract to the raster layer.
///
/// The three preparation tiers mirror the [`Invalidation`] flags; a backend
/// that caches nothing can implement `prepare`/`upload`/`blit` as no-ops and
/// treat `draw` as immediate-mode.
pub trait Rasterizer<T: Scalar> {
    /// The object set changed; rebuild draw buffers before the draws arrive.
    fn prepare(&mut self);

    /// Pan/zoom changed; re-upload per-object transforms before the draws
    /// arrive.
    fn upload(&mut self);

    /// Draw one object. `frame` is the object's bounds projected into the unit
    /// viewport; mapping to device pixels (and clipping) is the backend's.
    fn draw(&mut self, kind: u16, detail: u32, frame: kurbo::Rect);

    /// Reuse the previously rendered output verbatim.
    fn blit(&mut self);
}

/// Project `object` (anchor-local frame) into the unit viewport of `view`.
pub fn project<T: Scalar>(object: Rect<T>, view: Rect<T>) -> kurbo::Rect {
    let x0 = (object.x - view.x) / view.w;
    let y0 = (object.y - view.y) / view.h;
    let x1 = (object.max_x() - view.x) / view.w;
    let y1 = (object.max_y() - view.y) / view.h;
    kurbo::Rect::new(x0.to_f64(), y0.to_f64(), x1.to_f64(), y1.to_f64())
}

#[derive(Default)]
struct FrameStats {
    nodes: usize,
    objects: usize,
    spilled: usize,
}

/// Produce one frame.
///
/// With nothing stale and `options.lazy` set, this is a single `blit` — the
/// cached output is reused with no recomputation, so a static viewport costs
/// O(1) per frame regardless of document size. Otherwise the stale tiers are
/// redone in order: canonicalization (which may add `RENDER` by moving the
/// anchor), `prepare`, `upload`, then the spill traversal; all flags are
/// cleared once the frame is out.
pub fn render_frame<T, S, R>(
    tree: &mut QuadTree,
    store: &mut S,
    view: &mut View<T>,
    raster: &mut R,
    options: &RenderOptions,
) -> FrameStatus
where
    T: Scalar,
    S: ObjectStore<T>,
    R: Rasterizer<T>,
{
    if view.dirty().is_empty() && options.lazy {
        raster.blit();
        return FrameStatus::Reused;
    }
    if view.dirty().contains(Invalidation::BOUNDS) {
        view.canonicalize(tree, store);
    }
    if view.dirty().contains(Invalidation::RENDER) {
        raster.prepare();
    }
    if view.dirty().contains(Invalidation::BUFFER) {
        raster.upload();
    }
    let mut stats = FrameStats::default();
    render_node(
        tree,
        store,
        raster,
        view.node(),
        view.bounds(),
        options.spill_depth,
        &mut stats,
    );
    view.clear_dirty();
    FrameStatus::Rendered {
        nodes: stats.nodes,
        objects: stats.objects,
        spilled: stats.spilled,
    }
}

// Positive-area overlap in a shared frame.
fn overlaps<T: Scalar>(a: Rect<T>, b: Rect<T>) -> bool {
    a.x < b.max_x() && a.max_x() > b.x && a.y < b.max_y() && a.max_y() > b.y
}

fn render_node<T, S, R>(
    tree: &mut QuadTree,
    store: &mut S,
    raster: &mut R,
    node: NodeIndex,
    bounds: Rect<T>,
    depth: u8,
    stats: &mut FrameStats,
) where
    T: Scalar,
    S: ObjectStore<T>,
    R: Rasterizer<T>,
{
    stats.nodes += 1;
    for i in tree.node(node).objects() {
        raster.draw(store.kind(i), store.detail(i), project(store.bounds(i), bounds));
        stats.objects += 1;
    }
    if depth == 0 {
        return;
    }
    let zero = T::zero();
    let one = T::one();
    // Canonical bounds sit in [0,1) with extent at most one, so content can
    // only spill in from the bottom-right, right, and bottom neighbor frames.
    if overlaps(bounds, Rect::new(one, one, one, one)) {
        let right = tree.neighbor_or_create(store, node, 1, 0);
        let corner = tree.neighbor_or_create(store, right, 0, 1);
        let shifted = Rect::new(bounds.x - one, bounds.y - one, bounds.w, bounds.h);
        stats.spilled += 1;
        render_node(tree, store, raster, corner, shifted, depth - 1, stats);
    }
    if overlaps(bounds, Rect::new(one, zero, one, one)) {
        let right = tree.neighbor_or_create(store, node, 1, 0);
        let shifted = Rect::new(bounds.x - one, bounds.y, bounds.w, bounds.h);
        stats.spilled += 1;
        render_node(tree, store, raster, right, shifted, depth - 1, stats);
    }
    if overlaps(bounds, Rect::new(zero, one, one, one)) {
        let below = tree.neighbor_or_create(store, node, 0, 1);
        let shifted = Rect::new(bounds.x, bounds.y - one, bounds.w, bounds.h);
        stats.spilled += 1;
        render_node(tree, store, raster, below, shifted, depth - 1, stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use fathom_quadtree::{FlatStore, Quadrant};

    #[derive(Default)]
    struct Recorder {
        prepared: usize,
        uploaded: usize,
        blitted: usize,
        drawn: Vec<(u16, u32, kurbo::Rect)>,
    }

    impl Rasterizer<f64> for Recorder {
        fn prepare(&mut self) {
            self.prepared += 1;
        }
        fn upload(&mut self) {
            self.uploaded += 1;
        }
        fn draw(&mut self, kind: u16, detail: u32, frame: kurbo::Rect) {
            self.drawn.push((kind, detail, frame));
        }
        fn blit(&mut self) {
            self.blitted += 1;
        }
    }

    fn document(objects: &[(u16, Rect<f64>, u32)]) -> (FlatStore<f64>, QuadTree) {
        let mut store = FlatStore::new();
        for &(kind, bounds, detail) in objects {
            store.append(kind, bounds, detail);
        }
        let tree = QuadTree::new(&mut store);
        (store, tree)
    }

    #[test]
    fn projection_maps_view_to_unit() {
        let view = Rect::new(0.25, 0.25, 0.5, 0.5);
        let frame = project(view, view);
        assert_eq!(frame, kurbo::Rect::new(0.0, 0.0, 1.0, 1.0));
        let quarter = project(Rect::new(0.5, 0.5, 0.25, 0.25), view);
        assert_eq!(quarter, kurbo::Rect::new(0.5, 0.5, 1.0, 1.0));
    }

    #[test]
    fn first_frame_runs_every_tier_and_clears_flags() {
        let (mut store, mut tree) = document(&[(7, Rect::new(0.2, 0.2, 0.1, 0.1), 9)]);
        let mut view = View::new(tree.root());
        let mut raster = Recorder::default();
        let status = render_frame(
            &mut tree,
            &mut store,
            &mut view,
            &mut raster,
            &RenderOptions::default(),
        );
        assert!(matches!(status, FrameStatus::Rendered { objects: 1, .. }));
        assert_eq!((raster.prepared, raster.uploaded, raster.blitted), (1, 1, 0));
        assert_eq!(raster.drawn[0].0, 7);
        assert_eq!(raster.drawn[0].1, 9);
        assert!(view.dirty().is_empty());
    }

    #[test]
    fn static_viewport_reuses_cached_output() {
        let (mut store, mut tree) = document(&[(0, Rect::new(0.2, 0.2, 0.1, 0.1), 0)]);
        let mut view = View::new(tree.root());
        let mut raster = Recorder::default();
        let options = RenderOptions::default();
        let _ = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
        let drawn_once = raster.drawn.len();
        for _ in 0..3 {
            let status = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
            assert_eq!(status, FrameStatus::Reused);
        }
        assert_eq!(raster.drawn.len(), drawn_once, "no recomputation while static");
        assert_eq!(raster.blitted, 3);
    }

    #[test]
    fn disabling_lazy_rendering_redraws_every_frame() {
        let (mut store, mut tree) = document(&[(0, Rect::new(0.2, 0.2, 0.1, 0.1), 0)]);
        let mut view = View::new(tree.root());
        let mut raster = Recorder::default();
        let options = RenderOptions {
            lazy: false,
            ..RenderOptions::default()
        };
        let _ = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
        let status = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
        assert!(matches!(status, FrameStatus::Rendered { .. }));
        assert_eq!(raster.blitted, 0);
    }

    #[test]
    fn pan_reuploads_without_repreparing() {
        let (mut store, mut tree) = document(&[(0, Rect::new(0.2, 0.2, 0.1, 0.1), 0)]);
        let mut view = View::new(tree.root());
        let mut raster = Recorder::default();
        let options = RenderOptions::default();
        let _ = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
        // A small pan keeps the same anchor: BUFFER work only.
        view.translate(0.05, 0.0);
        let _ = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
        assert_eq!(raster.uploaded, 2);
        assert_eq!(raster.prepared, 1, "object set unchanged");
    }

    #[test]
    fn document_edit_reprepares_via_invalidate() {
        let (mut store, mut tree) = document(&[(0, Rect::new(0.2, 0.2, 0.1, 0.1), 0)]);
        let mut view = View::new(tree.root());
        let mut raster = Recorder::default();
        let options = RenderOptions::default();
        let _ = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
        view.invalidate(Invalidation::RENDER);
        let _ = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
        assert_eq!(raster.prepared, 2);
        assert_eq!(raster.uploaded, 1, "transforms unchanged");
    }

    // A view overlapping the right edge submits the right neighbor's objects,
    // projected through the shifted bounds.
    #[test]
    fn spill_draws_the_right_neighbor() {
        let (mut store, mut tree) = document(&[(3, Rect::new(0.52, 0.1, 0.05, 0.05), 4)]);
        let tl = tree.child(tree.root(), Quadrant::TopLeft).unwrap();
        let mut view = View::new(tl);
        view.set_bounds(Rect::new(0.2, 0.0, 0.9, 0.9));
        let mut raster = Recorder::default();
        let status = render_frame(
            &mut tree,
            &mut store,
            &mut view,
            &mut raster,
            &RenderOptions::default(),
        );
        let FrameStatus::Rendered { spilled, .. } = status else {
            panic!("expected a rendered frame");
        };
        assert_eq!(spilled, 1);
        // The object lives in the root's TopRight quadrant, so its copy sits at
        // (0.04, 0.2) in the neighbor frame and projects to x ≈ 0.933 of the
        // unit viewport.
        let (kind, detail, frame) = raster.drawn[0];
        assert_eq!((kind, detail), (3, 4));
        assert!((frame.x0 - (0.04 + 0.8) / 0.9).abs() < 1e-12);
        assert!((frame.y0 - 0.2 / 0.9).abs() < 1e-12);
    }

    // A view overlapping both far edges spills right, below, and diagonally.
    #[test]
    fn corner_overlap_spills_three_ways() {
        let (mut store, mut tree) = document(&[(0, Rect::new(0.1, 0.1, 0.1, 0.1), 0)]);
        let tl = tree.child(tree.root(), Quadrant::TopLeft).unwrap();
        let mut view = View::new(tl);
        view.set_bounds(Rect::new(0.4, 0.4, 0.9, 0.9));
        let mut raster = Recorder::default();
        let status = render_frame(
            &mut tree,
            &mut store,
            &mut view,
            &mut raster,
            &RenderOptions::default(),
        );
        let FrameStatus::Rendered { spilled, nodes, .. } = status else {
            panic!("expected a rendered frame");
        };
        assert_eq!(spilled, 3);
        assert_eq!(nodes, 4, "anchor plus three neighbors");
        // The traversal materialized the three siblings as a side effect.
        for q in [Quadrant::TopRight, Quadrant::BottomLeft, Quadrant::BottomRight] {
            assert!(tree.child(tree.root(), q).is_some(), "{q:?} materialized");
        }
    }

    // Depth zero disables spilling entirely.
    #[test]
    fn zero_spill_depth_draws_only_the_anchor() {
        let (mut store, mut tree) = document(&[(0, Rect::new(0.1, 0.1, 0.1, 0.1), 0)]);
        let tl = tree.child(tree.root(), Quadrant::TopLeft).unwrap();
        let mut view = View::new(tl);
        view.set_bounds(Rect::new(0.4, 0.4, 0.9, 0.9));
        let mut raster = Recorder::default();
        let options = RenderOptions {
            spill_depth: 0,
            ..RenderOptions::default()
        };
        let status = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
        assert!(matches!(
            status,
            FrameStatus::Rendered { nodes: 1, spilled: 0, .. }
        ));
    }
}
