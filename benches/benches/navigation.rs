// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fathom_quadtree::{FlatStore, ObjectStore, QuadTree, Rect};
use fathom_view::{Rasterizer, RenderOptions, View, render_frame};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Scatter small squares over the document frame.
fn gen_document(count: usize, max_edge: f64) -> FlatStore<f64> {
    let mut store = FlatStore::new();
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for i in 0..count {
        let edge = max_edge * (0.25 + 0.75 * rng.next_f64());
        let x = rng.next_f64() * (1.0 - edge);
        let y = rng.next_f64() * (1.0 - edge);
        #[allow(clippy::cast_possible_truncation, reason = "bench fixture kinds")]
        store.append((i % 7) as u16, Rect::new(x, y, edge, edge), i as u32);
    }
    store
}

struct NullRaster;

impl Rasterizer<f64> for NullRaster {
    fn prepare(&mut self) {}
    fn upload(&mut self) {}
    fn draw(&mut self, kind: u16, detail: u32, frame: kurbo::Rect) {
        black_box((kind, detail, frame));
    }
    fn blit(&mut self) {}
}

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize");
    for &count in &[100_usize, 1000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("root_children_{count}"), |b| {
            b.iter_batched(
                || gen_document(count, 0.02),
                |mut store| {
                    let tree = QuadTree::new(&mut store);
                    black_box((tree.node_count(), store.len()))
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_zoom_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");
    for &depth in &[4_u32, 16, 64] {
        group.bench_function(format!("zoom_in_{depth}_levels"), |b| {
            b.iter_batched(
                || {
                    let mut store = gen_document(1000, 0.02);
                    let tree = QuadTree::new(&mut store);
                    let view = View::new(tree.root());
                    (store, tree, view)
                },
                |(mut store, mut tree, mut view)| {
                    // Halve the viewport `depth` times toward the corner; each
                    // canonicalization descends one freshly materialized level.
                    for _ in 0..depth {
                        view.scale_about(0.5, 0.1, 0.1);
                        view.canonicalize(&mut tree, &mut store);
                    }
                    black_box(tree.node_count())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_pan_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor");
    group.bench_function("pan_across_64_frames", |b| {
        b.iter_batched(
            || {
                let mut store = gen_document(1000, 0.02);
                let tree = QuadTree::new(&mut store);
                let view = View::new(tree.root());
                (store, tree, view)
            },
            |(mut store, mut tree, mut view)| {
                for _ in 0..64 {
                    view.translate(1.5, 0.0);
                    view.canonicalize(&mut tree, &mut store);
                }
                black_box(tree.node_count())
            },
            BatchSize::SmallInput,
        );
    });
    // Re-reading materialized neighbors is the steady-state cost of panning.
    group.bench_function("pure_reread_across_64_frames", |b| {
        let mut store = gen_document(1000, 0.02);
        let mut tree = QuadTree::new(&mut store);
        let mut view = View::new(tree.root());
        for _ in 0..64 {
            view.translate(1.5, 0.0);
            view.canonicalize(&mut tree, &mut store);
        }
        let end = view.node();
        b.iter(|| {
            let mut node = end;
            while let Some(prev) = tree.try_neighbor(node, -1, 0) {
                node = prev;
            }
            black_box(node)
        });
    });
    group.finish();
}

fn bench_frame_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.bench_function("static_frame_reuse", |b| {
        let mut store = gen_document(10_000, 0.02);
        let mut tree = QuadTree::new(&mut store);
        let mut view = View::new(tree.root());
        let mut raster = NullRaster;
        let options = RenderOptions::default();
        let _ = render_frame(&mut tree, &mut store, &mut view, &mut raster, &options);
        b.iter(|| {
            // Nothing is stale: this must not scale with document size.
            black_box(render_frame(
                &mut tree,
                &mut store,
                &mut view,
                &mut raster,
                &options,
            ))
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_materialize,
    bench_zoom_cascade,
    bench_pan_walk,
    bench_frame_reuse
);
criterion_main!(benches);
