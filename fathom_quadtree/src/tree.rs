// Copyright 2026 the Fathom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The lazily materialized node arena.
//!
//! Nodes live in a flat, append-only `Vec`; all relations are indices. A node is
//! created either by descending into a quadrant ([`QuadTree::materialize_child`])
//! or by growing a new root above the current one ([`QuadTree::promote_root`]).
//! Nothing is ever freed: the arena and the object store only grow, which keeps
//! every node's object range valid forever. Growth is observable through
//! [`QuadTree::node_count`] and the store's `len`.
//!
//! Materializing a child copies the subset of the parent's objects that fit
//! entirely inside the chosen quadrant, with bounds re-normalized into the
//! child's frame. An object straddling a quadrant boundary is copied into no
//! child and stays visible only through its ancestor. Deeper nodes therefore
//! hold monotonically fewer, larger-relative objects — the index prunes itself
//! by scale, which is what keeps per-frame object counts bounded as zoom
//! increases.

use alloc::vec::Vec;
use core::ops::Range;

use crate::scalar::Scalar;
use crate::store::ObjectStore;
use crate::transform::{Quadrant, contained_in_child, from_child, to_child};

/// Index of a node in the arena.
///
/// Absence (the unmaterialized case) is `Option<NodeIndex>`; an index that is
/// present always refers to a live node, because nodes are never freed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(u32);

impl NodeIndex {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "node indices are intentionally 32-bit; the arena never reaches 2^32 nodes in practice"
    )]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position in the arena.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One arena entry.
///
/// `objects` is a half-open slice of the shared object store, fixed at the
/// moment the node is created and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Node {
    children: [Option<NodeIndex>; 4],
    parent: Option<NodeIndex>,
    slot: Option<Quadrant>,
    objects: Range<usize>,
}

impl Node {
    /// The child occupying `quadrant`, if it has been materialized.
    pub fn child(&self, quadrant: Quadrant) -> Option<NodeIndex> {
        self.children[quadrant.index()]
    }

    /// The parent node; `None` for the current root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Which quadrant of its parent this node occupies; `None` for a root that
    /// has never been promoted under a parent.
    pub fn slot(&self) -> Option<Quadrant> {
        self.slot
    }

    /// This node's slice of the object store.
    pub fn objects(&self) -> Range<usize> {
        self.objects.clone()
    }
}

/// Append-only quadtree over a shared object store.
#[derive(Clone)]
pub struct QuadTree {
    nodes: Vec<Node>,
    root: NodeIndex,
}

impl core::fmt::Debug for QuadTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl QuadTree {
    /// Build the tree for a document whose objects occupy `[0, store.len())`.
    ///
    /// The root covers the whole document frame; its `TopLeft` child is
    /// materialized eagerly so the first descent has somewhere to land.
    pub fn new<T: Scalar, S: ObjectStore<T>>(store: &mut S) -> Self {
        let root = Node {
            children: [None; 4],
            parent: None,
            slot: None,
            objects: 0..store.len(),
        };
        let mut tree = Self {
            nodes: alloc::vec![root],
            root: NodeIndex::new(0),
        };
        tree.materialize_child(store, tree.root, Quadrant::TopLeft);
        tree
    }

    /// The current root.
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Borrow a node. Panics if `index` is out of range.
    pub fn node(&self, index: NodeIndex) -> &Node {
        self.nodes
            .get(index.index())
            .expect("NodeIndex out of arena range")
    }

    /// The child of `parent` occupying `quadrant`, if materialized.
    pub fn child(&self, parent: NodeIndex, quadrant: Quadrant) -> Option<NodeIndex> {
        self.node(parent).child(quadrant)
    }

    /// Number of nodes ever materialized. Monotonically increasing.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Materialize the child of `parent` occupying `quadrant`.
    ///
    /// Every object in `parent`'s range that lies entirely inside the quadrant is
    /// appended to `store` re-normalized into the child frame; the contiguous
    /// slice of those copies becomes the child's object range. Straddlers are
    /// skipped. Materializing a child that already exists is a programmer error.
    pub fn materialize_child<T: Scalar, S: ObjectStore<T>>(
        &mut self,
        store: &mut S,
        parent: NodeIndex,
        quadrant: Quadrant,
    ) -> NodeIndex {
        assert!(
            self.child(parent, quadrant).is_none(),
            "child {quadrant:?} of {parent:?} is already materialized"
        );
        let range = self.node(parent).objects();
        let start = store.len();
        for i in range {
            let bounds = store.bounds(i);
            if contained_in_child(bounds, quadrant) {
                store.append(store.kind(i), to_child(bounds, quadrant), store.detail(i));
            }
        }
        let child = NodeIndex::new(self.nodes.len());
        self.nodes.push(Node {
            children: [None; 4],
            parent: Some(parent),
            slot: Some(quadrant),
            objects: start..store.len(),
        });
        self.nodes[parent.index()].children[quadrant.index()] = Some(child);
        child
    }

    /// The child of `parent` occupying `quadrant`, materializing it if absent.
    pub fn child_or_create<T: Scalar, S: ObjectStore<T>>(
        &mut self,
        store: &mut S,
        parent: NodeIndex,
        quadrant: Quadrant,
    ) -> NodeIndex {
        match self.child(parent, quadrant) {
            Some(child) => child,
            None => self.materialize_child(store, parent, quadrant),
        }
    }

    /// Grow a new root above the current one, keeping the old root as the new
    /// root's `quadrant` child. Returns the new root.
    ///
    /// The old root's objects are duplicated upward through
    /// [`from_child`], so the new root's range holds the document content of its
    /// (four times larger) region at its own scale and rendering anchored there
    /// shows the document small in the kept quadrant. The other three child
    /// slots start empty.
    pub fn promote_root<T: Scalar, S: ObjectStore<T>>(
        &mut self,
        store: &mut S,
        quadrant: Quadrant,
    ) -> NodeIndex {
        let old = self.root;
        let start = store.len();
        for i in self.node(old).objects() {
            store.append(
                store.kind(i),
                from_child(store.bounds(i), quadrant),
                store.detail(i),
            );
        }
        let new_root = NodeIndex::new(self.nodes.len());
        let mut children = [None; 4];
        children[quadrant.index()] = Some(old);
        self.nodes.push(Node {
            children,
            parent: None,
            slot: None,
            objects: start..store.len(),
        });
        let old_root = &mut self.nodes[old.index()];
        old_root.parent = Some(new_root);
        old_root.slot = Some(quadrant);
        self.root = new_root;
        new_root
    }
}
