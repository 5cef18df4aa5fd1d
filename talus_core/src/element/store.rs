// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays element storage with allocation, topology, and version
//! tracking.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{ContentId, ElementId, ElementKey, ElementKind, INVALID};
use super::traverse::Children;
use crate::LayoutError;
use crate::dirty;
use crate::style::LayoutStyle;

/// Struct-of-arrays storage for all elements.
///
/// Elements are addressed by [`ElementId`] handles. Each element occupies a
/// slot in parallel arrays. Released elements are recycled via a free list,
/// and generation counters turn stale handles into
/// [`LayoutError::StaleReference`] instead of silently aliasing a new element.
///
/// Geometry (`x`, `y`, `width`, `height`) is container-relative: `x`/`y` is the
/// border-box origin relative to the parent's border-box origin. It is written
/// only by the solver.
#[derive(Debug)]
pub struct ElementStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) last_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,

    // -- Identity --
    pub(crate) kind: Vec<ElementKind>,
    pub(crate) key: Vec<Option<ElementKey>>,
    pub(crate) keys: BTreeMap<ElementKey, u32>,

    // -- Inputs (set by callers) --
    pub(crate) style: Vec<LayoutStyle>,
    pub(crate) content: Vec<Option<ContentId>>,

    // -- Dirty / version --
    pub(crate) dirty_layout: Vec<bool>,
    pub(crate) version: Vec<u64>,
    pub(crate) version_clock: u64,
    pub(crate) subtree_version: Vec<u64>,
    pub(crate) subtree_stamp: Vec<u64>,

    // -- Intrinsic size memo --
    pub(crate) intrinsic_width: Vec<f32>,
    pub(crate) intrinsic_height: Vec<f32>,
    pub(crate) intrinsic_stamp: Vec<u64>,

    // -- Computed geometry (written by the solver) --
    pub(crate) x: Vec<f32>,
    pub(crate) y: Vec<f32>,
    pub(crate) width: Vec<f32>,
    pub(crate) height: Vec<f32>,
    pub(crate) content_width: Vec<f32>,
    pub(crate) content_height: Vec<f32>,
    pub(crate) layout_stamp: Vec<u64>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) live: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,
    pub(crate) live_count: u32,

    // -- Frame construction --
    pub(crate) seen_frame: Vec<u64>,

    // -- Renderer feed --
    pub(crate) changes: DirtyTracker<u32>,
    pub(crate) paint_order: Vec<u32>,
    pub(crate) paint_order_dirty: bool,
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// Creates an empty element store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            last_child: Vec::new(),
            next_sibling: Vec::new(),
            kind: Vec::new(),
            key: Vec::new(),
            keys: BTreeMap::new(),
            style: Vec::new(),
            content: Vec::new(),
            dirty_layout: Vec::new(),
            version: Vec::new(),
            version_clock: 0,
            subtree_version: Vec::new(),
            subtree_stamp: Vec::new(),
            intrinsic_width: Vec::new(),
            intrinsic_height: Vec::new(),
            intrinsic_stamp: Vec::new(),
            x: Vec::new(),
            y: Vec::new(),
            width: Vec::new(),
            height: Vec::new(),
            content_width: Vec::new(),
            content_height: Vec::new(),
            layout_stamp: Vec::new(),
            generation: Vec::new(),
            live: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            live_count: 0,
            seen_frame: Vec::new(),
            changes: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            paint_order: Vec::new(),
            paint_order_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation --

    /// Allocates a detached element slot.
    ///
    /// The element starts dirty, with a fresh version, default style, and no
    /// content. Linking it under a parent is up to the caller.
    pub(crate) fn allocate(
        &mut self,
        kind: ElementKind,
        key: Option<ElementKey>,
        max_elements: u32,
    ) -> Result<u32, LayoutError> {
        if self.live_count >= max_elements {
            return Err(LayoutError::CapacityExceeded {
                capacity: max_elements as usize,
                required: self.live_count as usize + 1,
            });
        }

        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a released slot; its generation was bumped on release.
            let i = idx as usize;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.last_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.kind[i] = kind;
            self.key[i] = key;
            self.style[i] = LayoutStyle::DEFAULT;
            self.content[i] = None;
            self.subtree_stamp[i] = 0;
            self.intrinsic_stamp[i] = 0;
            self.x[i] = 0.0;
            self.y[i] = 0.0;
            self.width[i] = 0.0;
            self.height[i] = 0.0;
            self.content_width[i] = 0.0;
            self.content_height[i] = 0.0;
            self.layout_stamp[i] = 0;
            self.live[i] = true;
            self.seen_frame[i] = 0;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.last_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.kind.push(kind);
            self.key.push(key);
            self.style.push(LayoutStyle::DEFAULT);
            self.content.push(None);
            self.dirty_layout.push(false);
            self.version.push(0);
            self.subtree_version.push(0);
            self.subtree_stamp.push(0);
            self.intrinsic_width.push(0.0);
            self.intrinsic_height.push(0.0);
            self.intrinsic_stamp.push(0);
            self.x.push(0.0);
            self.y.push(0.0);
            self.width.push(0.0);
            self.height.push(0.0);
            self.content_width.push(0.0);
            self.content_height.push(0.0);
            self.layout_stamp.push(0);
            self.generation.push(0);
            self.live.push(true);
            self.seen_frame.push(0);
            idx
        };

        if let Some(key) = key {
            self.keys.insert(key, idx);
        }
        self.live_count += 1;
        self.bump_version(idx);
        self.paint_order_dirty = true;
        self.pending_added.push(idx);
        self.changes.mark(idx, dirty::TOPOLOGY);
        Ok(idx)
    }

    /// Releases a slot, invalidating every handle to it.
    ///
    /// Children still attached to the slot become roots. The caller is
    /// responsible for the parent's child list and for cache entries.
    pub(crate) fn release(&mut self, idx: u32) {
        let i = idx as usize;
        debug_assert!(self.live[i], "releasing a dead slot");

        let mut child = self.first_child[i];
        while child != INVALID {
            let next = self.next_sibling[child as usize];
            if self.parent[child as usize] == idx {
                self.changes.remove_dependency(child, idx, dirty::POSITION);
                self.parent[child as usize] = INVALID;
                self.next_sibling[child as usize] = INVALID;
            }
            child = next;
        }

        if let Some(key) = self.key[i].take() {
            if self.keys.get(&key) == Some(&idx) {
                self.keys.remove(&key);
            }
        }
        self.changes.remove_key(idx);

        self.parent[i] = INVALID;
        self.first_child[i] = INVALID;
        self.last_child[i] = INVALID;
        self.next_sibling[i] = INVALID;
        self.dirty_layout[i] = false;
        self.live[i] = false;

        // Bump generation so old handles immediately fail validation.
        self.generation[i] = self.generation[i].wrapping_add(1);
        self.free_list.push(idx);
        self.live_count -= 1;
        self.paint_order_dirty = true;
        self.pending_removed.push(idx);
    }

    /// Returns whether the given handle refers to a live element.
    #[must_use]
    pub fn is_alive(&self, id: ElementId) -> bool {
        id.idx < self.len
            && self.live[id.idx as usize]
            && self.generation[id.idx as usize] == id.generation
    }

    /// Returns [`LayoutError::StaleReference`] unless `id` is alive.
    pub fn validate(&self, id: ElementId) -> Result<(), LayoutError> {
        if self.is_alive(id) {
            Ok(())
        } else {
            Err(LayoutError::StaleReference { id })
        }
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count as usize
    }

    /// Returns whether no element is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Builds a handle for a live raw slot.
    #[inline]
    pub(crate) fn id_at(&self, idx: u32) -> ElementId {
        ElementId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    // -- Topology --

    /// Appends `child` as the last child of `parent`.
    ///
    /// `child` must be detached.
    pub(crate) fn append_child(&mut self, parent: u32, child: u32) {
        debug_assert!(
            self.parent[child as usize] == INVALID,
            "child already has a parent"
        );
        self.parent[child as usize] = parent;
        self.next_sibling[child as usize] = INVALID;
        let last = self.last_child[parent as usize];
        if last == INVALID {
            self.first_child[parent as usize] = child;
        } else {
            self.next_sibling[last as usize] = child;
        }
        self.last_child[parent as usize] = child;

        // Absolute position of the child depends on the parent.
        let _ = self.changes.add_dependency(child, parent, dirty::POSITION);
        self.paint_order_dirty = true;
        self.changes.mark(parent, dirty::TOPOLOGY);
    }

    /// Points `child` at `parent` ahead of a child-list rebuild, moving its
    /// renderer-feed dependency if the parent changed.
    pub(crate) fn adopt(&mut self, parent: u32, child: u32) {
        let old = self.parent[child as usize];
        if old == parent {
            return;
        }
        if old != INVALID {
            self.changes.remove_dependency(child, old, dirty::POSITION);
            self.changes.mark(old, dirty::TOPOLOGY);
        }
        self.parent[child as usize] = parent;
        if parent != INVALID {
            let _ = self.changes.add_dependency(child, parent, dirty::POSITION);
        }
        self.paint_order_dirty = true;
    }

    /// Replaces the child list of `parent` with `children`, in order.
    ///
    /// Every entry must already have been [`adopt`](Self::adopt)ed by
    /// `parent`.
    pub(crate) fn set_children(&mut self, parent: u32, children: &[u32]) {
        let mut prev = INVALID;
        for &c in children {
            debug_assert!(
                self.parent[c as usize] == parent,
                "child list entry not adopted by parent"
            );
            if prev == INVALID {
                self.first_child[parent as usize] = c;
            } else {
                self.next_sibling[prev as usize] = c;
            }
            prev = c;
        }
        if prev == INVALID {
            self.first_child[parent as usize] = INVALID;
        } else {
            self.next_sibling[prev as usize] = INVALID;
        }
        self.last_child[parent as usize] = prev;
        self.paint_order_dirty = true;
        self.changes.mark(parent, dirty::TOPOLOGY);
    }

    /// Returns the parent of an element, if any.
    pub fn parent(&self, id: ElementId) -> Result<Option<ElementId>, LayoutError> {
        self.validate(id)?;
        let p = self.parent[id.idx as usize];
        Ok((p != INVALID).then(|| self.id_at(p)))
    }

    /// Returns an iterator over the direct children of an element.
    pub fn children(&self, id: ElementId) -> Result<Children<'_>, LayoutError> {
        self.validate(id)?;
        Ok(Children::new(self, self.first_child[id.idx as usize]))
    }

    /// Returns the handles of root elements (those with no parent), in slot
    /// order.
    #[must_use]
    pub fn roots(&self) -> Vec<ElementId> {
        (0..self.len)
            .filter(|&idx| self.live[idx as usize] && self.parent[idx as usize] == INVALID)
            .map(|idx| self.id_at(idx))
            .collect()
    }

    /// Looks up a live element by its key.
    #[must_use]
    pub fn find_key(&self, key: ElementKey) -> Option<ElementId> {
        self.keys.get(&key).map(|&idx| self.id_at(idx))
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the kind tag of an element.
    pub fn kind(&self, id: ElementId) -> Result<ElementKind, LayoutError> {
        self.validate(id)?;
        Ok(self.kind[id.idx as usize])
    }

    /// Returns the key of an element, if it has one.
    pub fn key(&self, id: ElementId) -> Result<Option<ElementKey>, LayoutError> {
        self.validate(id)?;
        Ok(self.key[id.idx as usize])
    }

    /// Returns the layout style of an element.
    pub fn style(&self, id: ElementId) -> Result<&LayoutStyle, LayoutError> {
        self.validate(id)?;
        Ok(&self.style[id.idx as usize])
    }

    /// Returns the content reference of an element.
    pub fn content(&self, id: ElementId) -> Result<Option<ContentId>, LayoutError> {
        self.validate(id)?;
        Ok(self.content[id.idx as usize])
    }

    /// Returns the element's own version counter.
    pub fn version(&self, id: ElementId) -> Result<u64, LayoutError> {
        self.validate(id)?;
        Ok(self.version[id.idx as usize])
    }

    /// Returns whether the element needs layout.
    pub fn is_dirty(&self, id: ElementId) -> Result<bool, LayoutError> {
        self.validate(id)?;
        Ok(self.dirty_layout[id.idx as usize])
    }

    // -- Mutation (auto-marks dirty) --

    /// Writes `style`, bumping the version only if it differs.
    ///
    /// Returns whether anything changed.
    pub(crate) fn set_style(&mut self, idx: u32, style: &LayoutStyle) -> bool {
        if self.style[idx as usize] == *style {
            return false;
        }
        self.style[idx as usize] = *style;
        self.bump_version(idx);
        true
    }

    /// Writes `content`, bumping the version only if it differs.
    pub(crate) fn set_content(&mut self, idx: u32, content: Option<ContentId>) -> bool {
        if self.content[idx as usize] == content {
            return false;
        }
        self.content[idx as usize] = content;
        self.bump_version(idx);
        true
    }

    /// Changes the kind tag, bumping the version only if it differs.
    pub(crate) fn set_kind(&mut self, idx: u32, kind: ElementKind) -> bool {
        if self.kind[idx as usize] == kind {
            return false;
        }
        self.kind[idx as usize] = kind;
        self.bump_version(idx);
        true
    }

    // -- Dirty / version tracking --

    /// Sets the element's dirty flag and walks up to the root setting each
    /// ancestor's flag.
    ///
    /// Stops at the first ancestor that is already dirty: every ancestor of a
    /// dirty element is dirty too.
    pub(crate) fn mark_dirty(&mut self, idx: u32) {
        self.dirty_layout[idx as usize] = true;
        let mut p = self.parent[idx as usize];
        while p != INVALID && !self.dirty_layout[p as usize] {
            self.dirty_layout[p as usize] = true;
            p = self.parent[p as usize];
        }
    }

    /// Gives the element a new version from the store clock and marks it
    /// dirty.
    ///
    /// Versions come from a single monotonic clock, so the newest version
    /// anywhere in a subtree is always its maximum.
    pub(crate) fn bump_version(&mut self, idx: u32) {
        self.version_clock += 1;
        self.version[idx as usize] = self.version_clock;
        self.mark_dirty(idx);
    }

    /// Subtree version of `idx`: the maximum of its own version and its
    /// children's subtree versions.
    ///
    /// Clean elements answer from the memo. Dirty elements recompute once per
    /// pass, recursing only into their dirty children, so the cost is
    /// O(children) per call.
    pub(crate) fn subtree_version(&mut self, idx: u32, pass: u64) -> u64 {
        let i = idx as usize;
        let stamp = self.subtree_stamp[i];
        if stamp == pass || (stamp != 0 && !self.dirty_layout[i]) {
            return self.subtree_version[i];
        }
        let mut v = self.version[i];
        let mut child = self.first_child[i];
        while child != INVALID {
            v = v.max(self.subtree_version(child, pass));
            child = self.next_sibling[child as usize];
        }
        self.subtree_version[i] = v;
        self.subtree_stamp[i] = pass;
        v
    }

    /// Returns whether the intrinsic size memo for `idx` can be used in
    /// `pass`.
    #[inline]
    pub(crate) fn intrinsic_valid(&self, idx: u32, pass: u64) -> bool {
        let stamp = self.intrinsic_stamp[idx as usize];
        stamp == pass || (stamp != 0 && !self.dirty_layout[idx as usize])
    }

    /// Clears the dirty flags of elements laid out in `pass`.
    ///
    /// Intrinsic memos of dirty elements that were not refreshed during the
    /// pass are dropped so that a now-clean element cannot answer with a size
    /// computed before its last change.
    pub(crate) fn finish_pass(&mut self, visited: &[u32], pass: u64) {
        for &idx in visited {
            let i = idx as usize;
            if self.dirty_layout[i] && self.intrinsic_stamp[i] != pass {
                self.intrinsic_stamp[i] = 0;
            }
            self.dirty_layout[i] = false;
        }
    }

    // -- Raw-index accessors for renderers --
    //
    // These accept raw slot indices (as found in `LayoutChanges` or
    // `paint_order()`) rather than `ElementId` handles, skipping generation
    // validation.

    /// Returns the container-relative border box at raw slot `idx` as
    /// `(x, y, width, height)`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn geometry_at(&self, idx: u32) -> (f32, f32, f32, f32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        let i = idx as usize;
        (self.x[i], self.y[i], self.width[i], self.height[i])
    }

    /// Returns the parent at raw slot `idx`, or [`INVALID`].
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn parent_at(&self, idx: u32) -> u32 {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.parent[idx as usize]
    }

    /// Returns the kind at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn kind_at(&self, idx: u32) -> ElementKind {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.kind[idx as usize]
    }

    // -- Internal helpers --

    /// Marks the renderer-feed channels for a geometry write at `idx`.
    pub(crate) fn write_geometry(&mut self, idx: u32, x: f32, y: f32, width: f32, height: f32) {
        let i = idx as usize;
        if self.width[i] != width || self.height[i] != height {
            self.width[i] = width;
            self.height[i] = height;
            self.changes.mark(idx, dirty::SIZE);
        }
        if self.x[i] != x || self.y[i] != y {
            self.x[i] = x;
            self.y[i] = y;
            self.changes.mark_with(idx, dirty::POSITION, &EagerPolicy);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    const MAX: u32 = 1024;

    fn container(store: &mut ElementStore) -> u32 {
        store.allocate(ElementKind::Container, None, MAX).unwrap()
    }

    fn settle(store: &mut ElementStore) {
        let all: Vec<u32> = (0..store.len).collect();
        store.finish_pass(&all, 1);
    }

    #[test]
    fn allocate_and_release() {
        let mut store = ElementStore::new();
        let idx = container(&mut store);
        let id = store.id_at(idx);
        assert!(store.is_alive(id));
        store.release(idx);
        assert!(!store.is_alive(id));
        assert_eq!(store.validate(id), Err(LayoutError::StaleReference { id }));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = ElementStore::new();
        let a = container(&mut store);
        let id1 = store.id_at(a);
        store.release(a);
        let b = container(&mut store);
        let id2 = store.id_at(b);
        // id2 reuses the same slot but has a different generation.
        assert_eq!(id1.index(), id2.index());
        assert_ne!(id1.generation(), id2.generation());
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert!(store.kind(id1).is_err());
    }

    #[test]
    fn capacity_is_enforced() {
        let mut store = ElementStore::new();
        store.allocate(ElementKind::Container, None, 2).unwrap();
        store.allocate(ElementKind::Container, None, 2).unwrap();
        let err = store
            .allocate(ElementKind::Container, None, 2)
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::CapacityExceeded {
                capacity: 2,
                required: 3
            }
        );
    }

    #[test]
    fn append_child_and_query() {
        let mut store = ElementStore::new();
        let parent = container(&mut store);
        let c1 = container(&mut store);
        let c2 = container(&mut store);
        store.append_child(parent, c1);
        store.append_child(parent, c2);

        let pid = store.id_at(parent);
        assert_eq!(store.parent(store.id_at(c1)).unwrap(), Some(pid));
        let kids: Vec<_> = store.children(pid).unwrap().collect();
        assert_eq!(kids, vec![store.id_at(c1), store.id_at(c2)]);
        assert_eq!(store.roots(), vec![pid]);
    }

    #[test]
    fn set_children_relinks_in_order() {
        let mut store = ElementStore::new();
        let p = container(&mut store);
        let a = container(&mut store);
        let b = container(&mut store);
        store.append_child(p, a);
        store.append_child(p, b);
        store.set_children(p, &[b, a]);
        let kids: Vec<u32> = store
            .children(store.id_at(p))
            .unwrap()
            .map(ElementId::index)
            .collect();
        assert_eq!(kids, vec![b, a]);
        assert_eq!(store.last_child[p as usize], a);
        store.set_children(p, &[]);
        assert_eq!(store.first_child[p as usize], INVALID);
    }

    #[test]
    fn mark_dirty_reaches_root_and_stops_early() {
        let mut store = ElementStore::new();
        let root = container(&mut store);
        let mid = container(&mut store);
        let leaf = container(&mut store);
        store.append_child(root, mid);
        store.append_child(mid, leaf);
        settle(&mut store);
        assert!(!store.dirty_layout[root as usize]);

        store.mark_dirty(leaf);
        assert!(store.dirty_layout[leaf as usize]);
        assert!(store.dirty_layout[mid as usize]);
        assert!(store.dirty_layout[root as usize]);

        // Clearing only the root breaks the chain; a second mark below an
        // already-dirty ancestor does not walk past it.
        store.dirty_layout[root as usize] = false;
        store.mark_dirty(leaf);
        assert!(
            !store.dirty_layout[root as usize],
            "walk must stop at the first dirty ancestor"
        );
    }

    #[test]
    fn subtree_version_tracks_descendant_bumps() {
        let mut store = ElementStore::new();
        let root = container(&mut store);
        let child = container(&mut store);
        store.append_child(root, child);

        let v1 = store.subtree_version(root, 1);
        settle(&mut store);
        assert_eq!(store.subtree_version(root, 2), v1, "clean memo is reused");

        store.bump_version(child);
        let v2 = store.subtree_version(root, 3);
        assert!(v2 > v1, "descendant bump must raise the subtree version");
        assert_eq!(v2, store.version[child as usize]);
    }

    #[test]
    fn set_style_bumps_only_on_change() {
        let mut store = ElementStore::new();
        let idx = container(&mut store);
        settle(&mut store);
        let v = store.version[idx as usize];

        assert!(!store.set_style(idx, &LayoutStyle::DEFAULT));
        assert_eq!(store.version[idx as usize], v);
        assert!(!store.dirty_layout[idx as usize]);

        let style = LayoutStyle {
            gap: 4.0,
            ..LayoutStyle::DEFAULT
        };
        assert!(store.set_style(idx, &style));
        assert!(store.version[idx as usize] > v);
        assert!(store.dirty_layout[idx as usize]);
    }

    #[test]
    fn release_orphans_attached_children() {
        let mut store = ElementStore::new();
        let p = container(&mut store);
        let c = container(&mut store);
        store.append_child(p, c);
        store.release(p);
        assert_eq!(store.parent[c as usize], INVALID);
        assert_eq!(store.roots(), vec![store.id_at(c)]);
    }

    #[test]
    fn keys_resolve_to_live_elements() {
        let mut store = ElementStore::new();
        let key = ElementKey::from_label("panel");
        let idx = store
            .allocate(ElementKind::Container, Some(key), MAX)
            .unwrap();
        assert_eq!(store.find_key(key), Some(store.id_at(idx)));
        store.release(idx);
        assert_eq!(store.find_key(key), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn raw_accessor_panics_out_of_range() {
        let store = ElementStore::new();
        let _ = store.geometry_at(0);
    }
}
