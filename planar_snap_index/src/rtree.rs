// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-based R-tree over tagged rectangles with SAH-like splits.
//!
//! This is the backing structure for [`SnapIndex`](crate::SnapIndex). Entries are
//! append-only: the snap contract never removes or moves a stored box, so the
//! tree carries no deletion or rebalance-on-update paths.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::index::Tag;

/// Boundary-inclusive intersection test: touching edges and corners count.
///
/// Deliberately not `Rect::intersect(..).is_empty()`, which treats a zero-area
/// overlap as empty and would drop entries lying exactly on the query edge.
#[inline]
pub(crate) fn touches(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
enum Child {
    Node(NodeIdx),
    Entry { tag: Tag, bbox: Rect },
}

#[derive(Clone, Debug)]
struct Node {
    bbox: Rect,
    leaf: bool,
    children: Vec<Child>,
}

/// Append-only R-tree keyed by insertion [`Tag`].
pub(crate) struct RTree {
    max_children: usize,
    min_children: usize,
    root: Option<NodeIdx>,
    arena: Vec<Node>,
    len: usize,
}

impl Default for RTree {
    fn default() -> Self {
        Self {
            max_children: 8,
            min_children: 4,
            root: None,
            arena: Vec::new(),
            len: 0,
        }
    }
}

impl RTree {
    /// Number of stored entries.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Insert `bbox` under `tag`. Duplicate and coincident boxes are stored as
    /// distinct entries.
    pub(crate) fn insert(&mut self, tag: Tag, bbox: Rect) {
        self.len += 1;
        match self.root {
            None => {
                let leaf = Node {
                    bbox,
                    leaf: true,
                    children: vec![Child::Entry { tag, bbox }],
                };
                let idx = self.arena.len();
                self.arena.push(leaf);
                self.root = Some(NodeIdx::new(idx));
            }
            Some(root_idx) => {
                let split = Self::insert_node(
                    &mut self.arena,
                    root_idx.get(),
                    tag,
                    bbox,
                    self.max_children,
                    self.min_children,
                );
                if let Some(right_idx) = split {
                    // Root overflowed: grow the tree by one level.
                    let new_bb = self.arena[root_idx.get()]
                        .bbox
                        .union(self.arena[right_idx].bbox);
                    let idx = self.arena.len();
                    self.arena.push(Node {
                        bbox: new_bb,
                        leaf: false,
                        children: vec![
                            Child::Node(root_idx),
                            Child::Node(NodeIdx::new(right_idx)),
                        ],
                    });
                    self.root = Some(NodeIdx::new(idx));
                }
            }
        }
    }

    /// Collect every entry whose box touches `query` (boundary-inclusive).
    pub(crate) fn search(&self, query: &Rect) -> Vec<(Tag, Rect)> {
        let mut out = Vec::new();
        let Some(root_idx) = self.root else {
            return out;
        };
        let mut stack = vec![root_idx];
        while let Some(i) = stack.pop() {
            let n = &self.arena[i.get()];
            if !touches(&n.bbox, query) {
                continue;
            }
            if n.leaf {
                for c in &n.children {
                    if let Child::Entry { tag, bbox } = c
                        && touches(bbox, query)
                    {
                        out.push((*tag, *bbox));
                    }
                }
            } else {
                for c in &n.children {
                    if let Child::Node(ci) = c {
                        stack.push(*ci);
                    }
                }
            }
        }
        out
    }

    fn node_bbox(arena: &[Node], children: &[Child]) -> Rect {
        let mut it = children.iter();
        let first = match it.next() {
            Some(Child::Node(i)) => arena[i.get()].bbox,
            Some(Child::Entry { bbox, .. }) => *bbox,
            None => Rect::ZERO,
        };
        it.fold(first, |acc, c| match c {
            Child::Node(i) => acc.union(arena[i.get()].bbox),
            Child::Entry { bbox, .. } => acc.union(*bbox),
        })
    }

    fn enlarge_cost(a: &Rect, b: &Rect) -> f64 {
        a.union(*b).area() - a.area()
    }

    /// Pick the child whose box grows the least when absorbing `bbox`.
    fn choose_child(arena: &[Node], children: &[Child], bbox: &Rect) -> usize {
        let mut best_idx = 0_usize;
        let mut best_cost = f64::INFINITY;
        for (i, c) in children.iter().enumerate() {
            let cb = match c {
                Child::Node(idx) => arena[idx.get()].bbox,
                Child::Entry { bbox, .. } => *bbox,
            };
            let cost = Self::enlarge_cost(&cb, bbox);
            if cost < best_cost {
                best_cost = cost;
                best_idx = i;
            }
        }
        best_idx
    }

    /// SAH-like split: sort along each axis by centroid, precompute prefix and
    /// suffix boxes, and take the `k` minimizing
    /// `area(LB_k) * k + area(RB_k) * (n - k)`.
    fn split_children_with<F>(
        children: &[Child],
        min_children: usize,
        mut bbox_of: F,
    ) -> (Vec<Child>, Vec<Child>)
    where
        F: FnMut(&Child) -> Rect,
    {
        let n = children.len();
        let mut best: Option<(f64, Vec<Child>, Vec<Child>)> = None;
        for axis in 0..2 {
            let mut v = children.to_vec();
            v.sort_by(|a, b| {
                let (ca, cb) = if axis == 0 {
                    (bbox_of(a).center().x, bbox_of(b).center().x)
                } else {
                    (bbox_of(a).center().y, bbox_of(b).center().y)
                };
                ca.partial_cmp(&cb).unwrap_or(core::cmp::Ordering::Equal)
            });

            let mut prefix: Vec<Rect> = Vec::with_capacity(n);
            for c in v.iter() {
                let bb = bbox_of(c);
                prefix.push(match prefix.last() {
                    Some(prev) => prev.union(bb),
                    None => bb,
                });
            }
            let mut suffix: Vec<Rect> = Vec::with_capacity(n);
            for c in v.iter().rev() {
                let bb = bbox_of(c);
                suffix.push(match suffix.last() {
                    Some(prev) => bb.union(*prev),
                    None => bb,
                });
            }
            suffix.reverse();

            for k in min_children..=(n - min_children) {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "fan-outs are single digits; exact in f64"
                )]
                let cost = prefix[k - 1].area() * k as f64 + suffix[k].area() * (n - k) as f64;
                if best.as_ref().map(|(bc, _, _)| cost < *bc).unwrap_or(true) {
                    best = Some((cost, v[..k].to_vec(), v[k..].to_vec()));
                }
            }
        }
        let (_, l, r) = best.expect("split requires an overflowing node");
        (l, r)
    }

    fn insert_node(
        arena: &mut Vec<Node>,
        node_idx: usize,
        tag: Tag,
        bbox: Rect,
        max_children: usize,
        min_children: usize,
    ) -> Option<usize> {
        if arena[node_idx].leaf {
            {
                let node = &mut arena[node_idx];
                node.children.push(Child::Entry { tag, bbox });
                node.bbox = node.bbox.union(bbox);
                if node.children.len() <= max_children {
                    return None;
                }
            }
            // Leaf overflow: every child is an Entry.
            let (left, right) =
                Self::split_children_with(&arena[node_idx].children, min_children, |c| match c {
                    Child::Entry { bbox, .. } => *bbox,
                    Child::Node(_) => unreachable!(),
                });
            let l_bbox = Self::node_bbox(arena, &left);
            let r_bbox = Self::node_bbox(arena, &right);
            let node = &mut arena[node_idx];
            node.children = left;
            node.bbox = l_bbox;
            let r_idx = arena.len();
            arena.push(Node {
                bbox: r_bbox,
                leaf: true,
                children: right,
            });
            Some(r_idx)
        } else {
            let idx = {
                let children = &arena[node_idx].children;
                Self::choose_child(arena, children, &bbox)
            };
            let split = match arena[node_idx].children[idx] {
                Child::Node(child_idx) => Self::insert_node(
                    arena,
                    child_idx.get(),
                    tag,
                    bbox,
                    max_children,
                    min_children,
                ),
                Child::Entry { .. } => None,
            };
            arena[node_idx].bbox = arena[node_idx].bbox.union(bbox);
            if let Some(new_right_idx) = split {
                arena[node_idx]
                    .children
                    .insert(idx + 1, Child::Node(NodeIdx::new(new_right_idx)));
                if arena[node_idx].children.len() > max_children {
                    let (left, right) = {
                        let ch = &arena[node_idx].children;
                        Self::split_children_with(ch, min_children, |c| match c {
                            Child::Entry { bbox, .. } => *bbox,
                            Child::Node(i) => arena[i.get()].bbox,
                        })
                    };
                    let l_bbox = Self::node_bbox(arena, &left);
                    let r_bbox = Self::node_bbox(arena, &right);
                    let node = &mut arena[node_idx];
                    node.children = left;
                    node.bbox = l_bbox;
                    let r_idx = arena.len();
                    arena.push(Node {
                        bbox: r_bbox,
                        leaf: false,
                        children: right,
                    });
                    return Some(r_idx);
                }
            }
            None
        }
    }
}

impl core::fmt::Debug for RTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_children", &self.max_children)
            .field("min_children", &self.min_children)
            .field("arena_nodes", &self.arena.len())
            .field("len", &self.len)
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}
