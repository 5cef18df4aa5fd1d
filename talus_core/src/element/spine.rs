// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty spine collection.
//!
//! A *spine* is a root-to-dirty-leaf path: it starts at the layout root and
//! follows dirty children down to a dirty element none of whose children are
//! dirty. The set of spines produced by
//! [`ElementStore::collect_dirty_spines`] covers every dirty element under the
//! root exactly once and nothing else.
//!
//! Spines are emitted in document order. Consecutive spines share a prefix;
//! each spine records its `work_depth`, the length of the prefix it shares
//! with the previous spine, so that a walker only does work from that depth
//! down.

use alloc::vec::Vec;

use super::id::INVALID;
use super::store::ElementStore;

/// One root-to-dirty-leaf path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtySpine<'a> {
    /// Raw slot indices from the root (index 0) down to the dirty leaf.
    pub path: &'a [u32],
    /// Index into `path` of the first element not already covered by the
    /// previous spine.
    pub work_depth: usize,
}

impl DirtySpine<'_> {
    /// The elements this spine adds beyond the previous one.
    #[must_use]
    pub fn work(&self) -> &[u32] {
        &self.path[self.work_depth..]
    }
}

#[derive(Clone, Copy, Debug)]
struct SpineRange {
    start: usize,
    len: usize,
    work_depth: usize,
}

/// Reusable storage for the spines of one pass.
///
/// Paths are stored back to back in a single flat buffer.
#[derive(Debug, Default)]
pub struct SpineList {
    nodes: Vec<u32>,
    ranges: Vec<SpineRange>,
    path: Vec<u32>,
    shared: usize,
}

impl SpineList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all spines, keeping allocations.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.ranges.clear();
        self.path.clear();
        self.shared = 0;
    }

    /// Number of spines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns whether there are no spines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Length of the longest spine.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.ranges.iter().map(|r| r.len).max().unwrap_or(0)
    }

    /// Total number of elements a walker has to visit, counting shared
    /// prefixes once.
    #[must_use]
    pub fn work_nodes(&self) -> usize {
        self.ranges.iter().map(|r| r.len - r.work_depth).sum()
    }

    /// Returns the `i`-th spine.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<DirtySpine<'_>> {
        let r = self.ranges.get(i)?;
        Some(DirtySpine {
            path: &self.nodes[r.start..r.start + r.len],
            work_depth: r.work_depth,
        })
    }

    /// Iterates over spines in document order.
    pub fn iter(&self) -> impl Iterator<Item = DirtySpine<'_>> + '_ {
        self.ranges.iter().map(|r| DirtySpine {
            path: &self.nodes[r.start..r.start + r.len],
            work_depth: r.work_depth,
        })
    }

    fn emit(&mut self) {
        let start = self.nodes.len();
        self.nodes.extend_from_slice(&self.path);
        self.ranges.push(SpineRange {
            start,
            len: self.path.len(),
            work_depth: self.shared,
        });
        self.shared = self.path.len();
    }
}

impl ElementStore {
    /// Collects the dirty spines under `root` into `out`.
    ///
    /// Produces nothing if `root` is clean. Only dirty children are descended
    /// into, so the cost is proportional to the number of dirty elements
    /// times their child counts, not to the tree size.
    pub fn collect_dirty_spines(&self, root: u32, out: &mut SpineList) {
        out.clear();
        if root == INVALID || !self.dirty_layout[root as usize] {
            return;
        }
        self.spine_dfs(root, out);
    }

    fn spine_dfs(&self, idx: u32, out: &mut SpineList) {
        out.path.push(idx);
        let mut any_dirty = false;
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            if self.dirty_layout[child as usize] {
                any_dirty = true;
                self.spine_dfs(child, out);
            }
            child = self.next_sibling[child as usize];
        }
        if !any_dirty {
            out.emit();
        }
        out.path.pop();
        out.shared = out.shared.min(out.path.len());
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::element::ElementKind;

    fn build(store: &mut ElementStore, parent: Option<u32>) -> u32 {
        let idx = store.allocate(ElementKind::Container, None, 1 << 16).unwrap();
        if let Some(p) = parent {
            store.append_child(p, idx);
        }
        idx
    }

    fn clean_all(store: &mut ElementStore) {
        let all: Vec<u32> = (0..store.len).collect();
        store.finish_pass(&all, 1);
    }

    #[test]
    fn clean_root_has_no_spines() {
        let mut store = ElementStore::new();
        let root = build(&mut store, None);
        let _ = build(&mut store, Some(root));
        clean_all(&mut store);

        let mut spines = SpineList::new();
        store.collect_dirty_spines(root, &mut spines);
        assert!(spines.is_empty());
    }

    #[test]
    fn single_dirty_leaf_gives_one_spine() {
        let mut store = ElementStore::new();
        let root = build(&mut store, None);
        let a = build(&mut store, Some(root));
        let b = build(&mut store, Some(root));
        let b1 = build(&mut store, Some(b));
        clean_all(&mut store);
        store.mark_dirty(b1);

        let mut spines = SpineList::new();
        store.collect_dirty_spines(root, &mut spines);
        assert_eq!(spines.len(), 1);
        let s = spines.get(0).unwrap();
        assert_eq!(s.path, &[root, b, b1]);
        assert_eq!(s.work_depth, 0);
        assert!(!s.path.contains(&a), "clean siblings are not on the spine");
    }

    #[test]
    fn work_depth_skips_shared_prefix() {
        let mut store = ElementStore::new();
        let root = build(&mut store, None);
        let a = build(&mut store, Some(root));
        let a1 = build(&mut store, Some(a));
        let a2 = build(&mut store, Some(a));
        let b = build(&mut store, Some(root));
        clean_all(&mut store);
        store.mark_dirty(a1);
        store.mark_dirty(a2);
        store.mark_dirty(b);

        let mut spines = SpineList::new();
        store.collect_dirty_spines(root, &mut spines);
        let got: Vec<_> = spines.iter().map(|s| (s.path.to_vec(), s.work_depth)).collect();
        assert_eq!(
            got,
            vec![
                (vec![root, a, a1], 0),
                (vec![root, a, a2], 2),
                (vec![root, b], 1),
            ]
        );
        // root, a, a1, a2, b: every dirty element once.
        assert_eq!(spines.work_nodes(), 5);
        assert_eq!(spines.max_depth(), 3);
    }

    #[test]
    fn dirty_root_alone_is_a_spine() {
        let mut store = ElementStore::new();
        let root = build(&mut store, None);
        let _ = build(&mut store, Some(root));
        clean_all(&mut store);
        store.mark_dirty(root);

        let mut spines = SpineList::new();
        store.collect_dirty_spines(root, &mut spines);
        assert_eq!(spines.len(), 1);
        assert_eq!(spines.get(0).unwrap().work(), &[root]);
    }
}
