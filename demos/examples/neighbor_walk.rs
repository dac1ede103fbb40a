// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy growth under panning.
//!
//! Pan a viewport sideways across many quadrant boundaries. Each crossing is a
//! neighbor query that materializes exactly the nodes the walk touches —
//! including promoting the root the first time the pan leaves the original
//! document frame — and a pure re-read afterwards costs nothing.
//!
//! Run:
//! - `cargo run -p fathom_demos --example neighbor_walk`

use fathom_quadtree::{FlatStore, ObjectStore, QuadTree, Rect};
use fathom_view::View;

fn main() {
    let mut store: FlatStore<f64> = FlatStore::new();
    store.append(0, Rect::new(0.1, 0.1, 0.25, 0.25), 0);
    store.append(1, Rect::new(0.6, 0.6, 0.3, 0.3), 1);

    let mut tree = QuadTree::new(&mut store);
    let mut view = View::new(tree.root());
    println!("start: {tree:?}, {store:?}");

    // Pan right one full frame at a time. The first step leaves the original
    // root, so the tree grows upward before it can grow sideways.
    let mut trail = Vec::new();
    for _ in 0..6 {
        view.translate(1.0, 0.0);
        view.canonicalize(&mut tree, &mut store);
        trail.push(view.node());
        println!(
            "panned to {:?}: nodes={}, store={}",
            view.node(),
            tree.node_count(),
            store.len()
        );
    }

    // Walk the trail backwards with pure reads: everything exists now, and
    // nothing grows.
    let frozen = (tree.node_count(), store.len());
    let mut node = *trail.last().unwrap();
    for expected in trail.iter().rev().skip(1) {
        node = tree.try_neighbor(node, -1, 0).unwrap();
        assert_eq!(node, *expected);
    }
    assert_eq!(
        (tree.node_count(), store.len()),
        frozen,
        "pure reads never grow the tree"
    );
    println!("walked back without materializing anything: {tree:?}");
}
