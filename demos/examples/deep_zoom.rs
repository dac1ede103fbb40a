// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deep zoom basics.
//!
//! Author a small document, zoom in far past anything a single coordinate
//! frame could express, and watch the tree keep every rendered coordinate in
//! `[0,1]²` while the arena grows only along the visited path.
//!
//! Run:
//! - `cargo run -p fathom_demos --example deep_zoom`

use fathom_quadtree::{FlatStore, ObjectStore, QuadTree, Rect};
use fathom_view::{Rasterizer, RenderOptions, View, render_frame};

/// Collects draws and tracks the largest coordinate magnitude ever submitted.
#[derive(Default)]
struct Probe {
    draws: usize,
    max_magnitude: f64,
}

impl Rasterizer<f64> for Probe {
    fn prepare(&mut self) {}
    fn upload(&mut self) {}
    fn draw(&mut self, _kind: u16, _detail: u32, frame: kurbo::Rect) {
        self.draws += 1;
        for v in [frame.x0, frame.y0, frame.x1, frame.y1] {
            self.max_magnitude = self.max_magnitude.max(v.abs());
        }
    }
    fn blit(&mut self) {}
}

fn main() {
    // A document of nested squares shrinking toward the top-left corner, so
    // there is always something to see at the next zoom level.
    let mut store: FlatStore<f64> = FlatStore::new();
    let mut edge = 0.4;
    while edge > 1e-12 {
        store.append(0, Rect::new(edge / 4.0, edge / 4.0, edge / 2.0, edge / 2.0), 0);
        edge /= 2.0;
    }
    let authored = store.len();

    let mut tree = QuadTree::new(&mut store);
    let mut view = View::new(tree.root());
    let mut raster = Probe::default();
    let options = RenderOptions::default();

    // Zoom in by half, thirty times: a combined magnification of 2^30.
    for step in 0..30 {
        view.scale_about(0.5, 0.25, 0.25);
        let status = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
        if step % 10 == 9 {
            println!(
                "after {:>2} halvings: {:?}, nodes={}, store={}",
                step + 1,
                status,
                tree.node_count(),
                store.len()
            );
        }
    }

    println!(
        "authored {authored} objects; drew {} submissions, max |coord| = {:.3}",
        raster.draws, raster.max_magnitude
    );
    // The whole point: thirty doublings of magnification, yet nothing the
    // rasterizer ever saw left the vicinity of the unit viewport.
    assert!(raster.max_magnitude < 8.0, "coordinates stayed bounded");
}
