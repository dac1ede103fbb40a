// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Invalidation flags and frame-level configuration.

bitflags::bitflags! {
    /// Staleness flags gating per-frame work.
    ///
    /// The three flags are independent cost tiers, not a single state machine;
    /// each gates one kind of recomputation and is cleared only when a frame is
    /// actually rendered. The combinations that arise from the public surface:
    ///
    /// | Event | Flags set |
    /// |---|---|
    /// | `translate` / `scale` / `set_bounds` | `BOUNDS \| BUFFER` |
    /// | canonicalization moved the anchor to another node | `RENDER` |
    /// | document append or other external edit (via `invalidate`) | `RENDER` |
    ///
    /// With no flags set and lazy rendering enabled, a frame reuses the cached
    /// output verbatim — a static viewport costs O(1) per frame regardless of
    /// document size.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// The viewport moved: the view must re-canonicalize and the cached
        /// output image no longer matches.
        const BOUNDS = 0b0000_0001;
        /// Pan/zoom changed: per-object transformed bounds must be re-uploaded
        /// to the rasterizer.
        const BUFFER = 0b0000_0010;
        /// The object set to draw changed: the object-to-draw-buffer
        /// preparation must be redone.
        const RENDER = 0b0000_0100;
    }
}

impl Default for Invalidation {
    /// A fresh view is fully stale: every tier must run once before the first
    /// frame can be cached.
    fn default() -> Self {
        Self::all()
    }
}

/// Frame-rendering knobs.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Reuse the cached output when nothing is stale.
    pub lazy: bool,
    /// How many neighbor hops the spill traversal may take. One hop reaches the
    /// right, bottom, and bottom-right neighbors, which is all a canonical view
    /// can overlap; deeper values re-spill from neighbors and can overdraw.
    pub spill_depth: u8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            lazy: true,
            spill_depth: 1,
        }
    }
}

/// What a call to [`render_frame`](crate::render_frame) did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Nothing was stale; the cached output was reused verbatim.
    Reused,
    /// The frame was (re)drawn.
    Rendered {
        /// Nodes visited by the traversal, the anchor included.
        nodes: usize,
        /// Objects submitted to the rasterizer.
        objects: usize,
        /// Neighbor nodes drawn in the same pass because the view overlapped
        /// them.
        spilled: usize,
    },
}
