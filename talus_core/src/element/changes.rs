// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer feed: what changed since the last drain.
//!
//! Draining follows the same pattern for each channel:
//!
//! 1. **SIZE**: drain marked indices (local only).
//! 2. **POSITION**: drain marked indices plus everything that depends on
//!    them, so descendants of a moved container are reported too.
//! 3. **TOPOLOGY**: drain; any entry (or any release) means the child lists
//!    changed. The paint order itself is rebuilt up front if needed.
//!
//! [`LayoutChanges`] uses raw slot indices (`u32`) rather than
//! [`ElementId`](super::ElementId) handles so that renderers can index
//! straight into the store via the `*_at()` accessors.

use alloc::vec::Vec;

use super::store::ElementStore;
use crate::dirty;

/// The set of changes reported by one
/// [`drain_changes`](crate::LayoutContext::drain_changes) call.
#[derive(Clone, Debug, Default)]
pub struct LayoutChanges {
    /// Elements whose border-box size changed.
    pub resized: Vec<u32>,
    /// Elements whose absolute origin changed, including every descendant of
    /// a moved container.
    pub moved: Vec<u32>,
    /// Elements created since the last drain.
    pub added: Vec<u32>,
    /// Elements released since the last drain. Their slots may already have
    /// been reused.
    pub removed: Vec<u32>,
    /// Whether any child list changed, so the paint order differs from the
    /// one seen at the previous drain.
    pub topology_changed: bool,
}

impl LayoutChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.resized.clear();
        self.moved.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resized.is_empty()
            && self.moved.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl ElementStore {
    /// Drains the renderer-feed channels into `changes`, reusing its buffers.
    pub(crate) fn drain_changes_into(&mut self, changes: &mut LayoutChanges) {
        changes.clear();

        let rebuilt = self.refresh_paint_order();

        let resized: Vec<u32> = self
            .changes
            .drain(dirty::SIZE)
            .deterministic()
            .run()
            .collect();
        changes
            .resized
            .extend(resized.into_iter().filter(|&idx| self.live[idx as usize]));

        let moved: Vec<u32> = self
            .changes
            .drain(dirty::POSITION)
            .affected()
            .deterministic()
            .run()
            .collect();
        changes
            .moved
            .extend(moved.into_iter().filter(|&idx| self.live[idx as usize]));

        let relinked = self
            .changes
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .count();

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);

        changes.topology_changed = rebuilt || relinked > 0 || !changes.removed.is_empty();
    }
}
