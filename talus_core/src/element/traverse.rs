// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{ElementId, INVALID};
use super::store::ElementStore;

/// An iterator over the direct children of an element, in document order.
///
/// Created by [`ElementStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a ElementStore,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a ElementStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next_sibling[idx as usize];
        Some(self.store.id_at(idx))
    }
}

impl ElementStore {
    /// Returns the paint order: a depth-first pre-order of all live elements,
    /// roots in slot order.
    ///
    /// Only up to date after
    /// [`drain_changes`](crate::LayoutContext::drain_changes) or
    /// [`compute_layout`](crate::LayoutContext::compute_layout).
    #[must_use]
    pub fn paint_order(&self) -> &[u32] {
        &self.paint_order
    }

    /// Rebuilds the paint order if topology changed since the last rebuild.
    ///
    /// Returns whether a rebuild happened.
    pub(crate) fn refresh_paint_order(&mut self) -> bool {
        if !self.paint_order_dirty {
            return false;
        }
        self.paint_order.clear();
        for idx in 0..self.len {
            if self.live[idx as usize] && self.parent[idx as usize] == INVALID {
                self.dfs_collect(idx);
            }
        }
        self.paint_order_dirty = false;
        true
    }

    /// Depth-first pre-order collection starting from `idx`.
    fn dfs_collect(&mut self, idx: u32) {
        self.paint_order.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child);
            child = self.next_sibling[child as usize];
        }
    }
}
