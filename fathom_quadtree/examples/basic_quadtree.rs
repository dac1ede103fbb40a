// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Fathom Quadtree: build, materialize, and cross a boundary.

use fathom_quadtree::{FlatStore, ObjectStore, QuadTree, Quadrant, Rect};

fn main() {
    let mut store: FlatStore<f64> = FlatStore::new();
    store.append(0, Rect::new(0.2, 0.2, 0.1, 0.1), 0);
    store.append(1, Rect::new(0.4, 0.4, 0.2, 0.2), 1);

    let mut tree = QuadTree::new(&mut store);
    let tl = tree.child(tree.root(), Quadrant::TopLeft).unwrap();
    println!("tree: {tree:?}, store: {store:?}");

    // The first object fits the TopLeft quadrant and was copied into the child
    // frame; the second straddles the center and stays with the root.
    for i in tree.node(tl).objects() {
        println!("TopLeft object {i}: {:?}", store.bounds(i));
    }

    // Cross the midline: a pure read sees nothing, a generating read grows the
    // sibling on demand.
    println!("pure right neighbor: {:?}", tree.try_neighbor(tl, 1, 0));
    let tr = tree.neighbor_or_create(&mut store, tl, 1, 0);
    println!("generated right neighbor: {tr:?}, tree now: {tree:?}");
}
