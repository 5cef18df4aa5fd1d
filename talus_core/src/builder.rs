// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immediate-mode tree construction.
//!
//! A frame re-declares the whole tree between [`begin_frame`] and
//! [`end_frame`], nesting [`begin_element`]/[`end_element`] pairs. The builder
//! diffs each declaration against the previous frame instead of rebuilding:
//!
//! - Keyed elements are found by key wherever they were before, so they keep
//!   their slot and handle even when they move.
//! - Unkeyed elements are matched by position: the next old child of the same
//!   parent is reused if it is unkeyed, of the same kind, and not yet claimed.
//! - A parent's child list is relinked, and its version bumped, only if the
//!   declared sequence differs from the old one. Relinks are applied at
//!   [`end_frame`], so old sibling chains stay walkable for the whole frame
//!   even when a keyed element moves to a parent declared earlier.
//! - Frame-managed elements not declared in a frame are released at
//!   [`end_frame`], which turns their handles stale.
//!
//! Scopes are tracked on an explicit stack. Unbalanced begin/end pairs are
//! reported by the call that exposes them, never at layout time.
//!
//! [`begin_frame`]: LayoutContext::begin_frame
//! [`end_frame`]: LayoutContext::end_frame
//! [`begin_element`]: LayoutContext::begin_element
//! [`end_element`]: LayoutContext::end_element

use alloc::vec::Vec;

use crate::LayoutContext;
use crate::LayoutError;
use crate::element::{ElementId, ElementKey, ElementKind, INVALID};

/// One open `begin_element` scope.
#[derive(Clone, Copy, Debug)]
struct Scope {
    /// The element whose children are being declared (`INVALID` for the
    /// top level).
    idx: u32,
    /// Next old child expected if nothing changed.
    cursor: u32,
    /// Whether the declared children already differ from the old ones.
    changed: bool,
    /// Start of this scope's children in `pending`.
    start: usize,
}

/// A child list committed by `end_element`, waiting for `end_frame`.
#[derive(Clone, Copy, Debug)]
struct Relink {
    parent: u32,
    /// Range of the new children in `relinked`.
    start: usize,
    end: usize,
}

/// Builder state owned by the context.
#[derive(Debug)]
pub(crate) struct FrameState {
    pub(crate) open: bool,
    frame: u64,
    scopes: Vec<Scope>,
    pending: Vec<u32>,
    relinks: Vec<Relink>,
    relinked: Vec<u32>,
    first_root: u32,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            open: false,
            frame: 0,
            scopes: Vec::new(),
            pending: Vec::new(),
            relinks: Vec::new(),
            relinked: Vec::new(),
            first_root: INVALID,
        }
    }
}

impl FrameState {
    /// Number of element scopes currently open.
    fn open_scopes(&self) -> usize {
        self.scopes.len().saturating_sub(1)
    }
}

impl LayoutContext {
    /// Starts declaring a frame.
    pub fn begin_frame(&mut self) -> Result<(), LayoutError> {
        if self.frame.open {
            return Err(LayoutError::FrameInProgress);
        }
        let f = &mut self.frame;
        f.open = true;
        f.frame += 1;
        f.pending.clear();
        f.relinks.clear();
        f.relinked.clear();
        f.scopes.clear();
        f.scopes.push(Scope {
            idx: INVALID,
            cursor: f.first_root,
            changed: false,
            start: 0,
        });
        Ok(())
    }

    /// Declares an element under the innermost open element (or at the top
    /// level) and opens its scope.
    ///
    /// Returns the element's handle, which is stable across frames for keyed
    /// elements.
    pub fn begin_element(
        &mut self,
        key: Option<ElementKey>,
        kind: ElementKind,
    ) -> Result<ElementId, LayoutError> {
        if !self.frame.open {
            return Err(LayoutError::NoFrameOpen);
        }
        let frame = self.frame.frame;
        let Some(&scope) = self.frame.scopes.last() else {
            return Err(LayoutError::NoFrameOpen);
        };
        let parent = scope.idx;
        if parent != INVALID && self.store.kind[parent as usize].is_content_leaf() {
            return Err(LayoutError::InvalidParent {
                id: self.store.id_at(parent),
            });
        }

        let idx = match key {
            Some(key) => match self.store.keys.get(&key).copied() {
                Some(idx) if self.store.seen_frame[idx as usize] == frame => {
                    return Err(LayoutError::DuplicateKey { key });
                }
                Some(idx) => {
                    self.store.set_kind(idx, kind);
                    idx
                }
                None => self
                    .store
                    .allocate(kind, Some(key), self.config.max_elements)?,
            },
            None => {
                let cur = scope.cursor;
                let reusable = cur != INVALID && {
                    let c = cur as usize;
                    self.store.live[c]
                        && self.store.key[c].is_none()
                        && self.store.kind[c] == kind
                        && self.store.seen_frame[c] != 0
                        && self.store.seen_frame[c] != frame
                };
                if reusable {
                    cur
                } else {
                    self.store.allocate(kind, None, self.config.max_elements)?
                }
            }
        };

        let Some(top) = self.frame.scopes.last_mut() else {
            return Err(LayoutError::NoFrameOpen);
        };
        if idx == top.cursor {
            top.cursor = self.store.next_sibling[idx as usize];
        } else {
            top.changed = true;
            // Unkeyed declarations consume a position even when the old
            // element there could not be reused.
            if key.is_none() && top.cursor != INVALID {
                top.cursor = self.store.next_sibling[top.cursor as usize];
            }
        }

        self.store.adopt(parent, idx);
        self.store.seen_frame[idx as usize] = frame;
        self.frame.pending.push(idx);
        let start = self.frame.pending.len();
        self.frame.scopes.push(Scope {
            idx,
            cursor: self.store.first_child[idx as usize],
            changed: false,
            start,
        });
        Ok(self.store.id_at(idx))
    }

    /// Closes the innermost open element, committing its child list.
    ///
    /// A changed list takes effect at [`end_frame`](Self::end_frame).
    pub fn end_element(&mut self) -> Result<(), LayoutError> {
        if !self.frame.open {
            return Err(LayoutError::NoFrameOpen);
        }
        if self.frame.scopes.len() <= 1 {
            return Err(LayoutError::UnbalancedScope { open: 0 });
        }
        let Some(scope) = self.frame.scopes.pop() else {
            return Err(LayoutError::UnbalancedScope { open: 0 });
        };
        let f = &mut self.frame;
        if scope.changed || scope.cursor != INVALID {
            let start = f.relinked.len();
            f.relinked.extend_from_slice(&f.pending[scope.start..]);
            f.relinks.push(Relink {
                parent: scope.idx,
                start,
                end: f.relinked.len(),
            });
        }
        f.pending.truncate(scope.start);
        Ok(())
    }

    /// Finishes the frame.
    ///
    /// Fails with [`LayoutError::UnbalancedScope`] if element scopes are still
    /// open; the frame then stays open so the caller can close them. On
    /// success, frame-managed elements not declared in this frame are
    /// released. Returns the number of released elements.
    pub fn end_frame(&mut self) -> Result<usize, LayoutError> {
        if !self.frame.open {
            return Err(LayoutError::NoFrameOpen);
        }
        let open = self.frame.open_scopes();
        if open > 0 {
            return Err(LayoutError::UnbalancedScope { open });
        }
        let frame = self.frame.frame;

        let f = &mut self.frame;
        for relink in f.relinks.drain(..) {
            self.store
                .set_children(relink.parent, &f.relinked[relink.start..relink.end]);
            self.store.bump_version(relink.parent);
        }
        f.relinked.clear();

        // Relink the top-level chain used as the cursor for the next frame.
        let roots = &self.frame.pending;
        for (k, &idx) in roots.iter().enumerate() {
            self.store.next_sibling[idx as usize] = roots.get(k + 1).copied().unwrap_or(INVALID);
        }
        self.frame.first_root = roots.first().copied().unwrap_or(INVALID);
        if let Some(sentinel) = self.frame.scopes.pop() {
            if sentinel.changed || sentinel.cursor != INVALID {
                self.store.paint_order_dirty = true;
            }
        }
        self.frame.pending.clear();

        let mut released = 0;
        for idx in 0..self.store.len {
            let i = idx as usize;
            let seen = self.store.seen_frame[i];
            if self.store.live[i] && seen != 0 && seen != frame {
                self.store.release(idx);
                self.cache.invalidate(idx);
                released += 1;
            }
        }
        self.frame.open = false;
        Ok(released)
    }

    /// Returns whether a frame is being declared.
    #[must_use]
    pub fn frame_open(&self) -> bool {
        self.frame.open
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::config::LayoutConfig;

    fn children(ctx: &LayoutContext, id: ElementId) -> Vec<ElementId> {
        ctx.store().children(id).unwrap().collect()
    }

    fn declare(ctx: &mut LayoutContext, labels: &[&str]) -> (ElementId, Vec<ElementId>) {
        ctx.begin_frame().unwrap();
        let root = ctx
            .begin_element(Some(ElementKey::from_label("root")), ElementKind::Container)
            .unwrap();
        let mut kids = Vec::new();
        for label in labels {
            kids.push(
                ctx.begin_element(Some(ElementKey::from_label(label)), ElementKind::Text)
                    .unwrap(),
            );
            ctx.end_element().unwrap();
        }
        ctx.end_element().unwrap();
        ctx.end_frame().unwrap();
        (root, kids)
    }

    #[test]
    fn keyed_elements_keep_handles_across_frames() {
        let mut ctx = LayoutContext::default();
        let (root1, kids1) = declare(&mut ctx, &["a", "b", "c"]);
        let (root2, kids2) = declare(&mut ctx, &["c", "a", "b"]);
        assert_eq!(root1, root2);
        assert_eq!(kids1[0], kids2[1]);
        assert_eq!(kids1[2], kids2[0]);
        assert_eq!(children(&ctx, root2), kids2);
    }

    #[test]
    fn unchanged_frame_does_not_bump_versions() {
        let mut ctx = LayoutContext::default();
        let (root, _) = declare(&mut ctx, &["a", "b"]);
        let v = ctx.store().version(root).unwrap();
        let _ = declare(&mut ctx, &["a", "b"]);
        assert_eq!(ctx.store().version(root).unwrap(), v);

        let _ = declare(&mut ctx, &["a"]);
        assert!(
            ctx.store().version(root).unwrap() > v,
            "dropping a child changes the parent"
        );
    }

    #[test]
    fn undeclared_elements_are_released() {
        let mut ctx = LayoutContext::default();
        let (_, kids) = declare(&mut ctx, &["a", "b"]);
        let (root, _) = declare(&mut ctx, &["a"]);
        assert!(ctx.store().is_alive(kids[0]));
        assert!(!ctx.store().is_alive(kids[1]));
        assert_eq!(
            ctx.store().kind(kids[1]),
            Err(LayoutError::StaleReference { id: kids[1] })
        );
        assert_eq!(children(&ctx, root), vec![kids[0]]);
    }

    #[test]
    fn unkeyed_elements_are_matched_by_position() {
        let mut ctx = LayoutContext::default();
        let build = |ctx: &mut LayoutContext, kinds: &[ElementKind]| {
            ctx.begin_frame().unwrap();
            let mut ids = vec![ctx.begin_element(None, ElementKind::Container).unwrap()];
            for &kind in kinds {
                ids.push(ctx.begin_element(None, kind).unwrap());
                ctx.end_element().unwrap();
            }
            ctx.end_element().unwrap();
            ctx.end_frame().unwrap();
            ids
        };
        let first = build(&mut ctx, &[ElementKind::Text, ElementKind::Image]);
        let second = build(&mut ctx, &[ElementKind::Text, ElementKind::Image]);
        assert_eq!(first, second);

        let third = build(&mut ctx, &[ElementKind::Image, ElementKind::Image]);
        assert_eq!(third[0], first[0]);
        assert_ne!(third[1], first[1], "kind mismatch allocates a new element");
        assert_eq!(third[2], first[2], "later positions still line up");
        assert!(!ctx.store().is_alive(first[1]));
    }

    #[test]
    fn moved_keyed_child_keeps_positional_reuse_in_its_old_parent() {
        let mut ctx = LayoutContext::default();
        let key = ElementKey::from_label("moved");
        let leaf = |ctx: &mut LayoutContext, key: Option<ElementKey>| {
            let id = ctx.begin_element(key, ElementKind::Text).unwrap();
            ctx.end_element().unwrap();
            id
        };

        ctx.begin_frame().unwrap();
        ctx.begin_element(None, ElementKind::Container).unwrap();
        ctx.begin_element(None, ElementKind::Container).unwrap();
        ctx.end_element().unwrap();
        ctx.begin_element(None, ElementKind::Container).unwrap();
        let moved = leaf(&mut ctx, Some(key));
        let tail = leaf(&mut ctx, None);
        ctx.end_element().unwrap();
        ctx.end_element().unwrap();
        ctx.end_frame().unwrap();

        // The keyed leaf moves into the earlier sibling; the later one now
        // declares two unkeyed leaves.
        ctx.begin_frame().unwrap();
        ctx.begin_element(None, ElementKind::Container).unwrap();
        let first = ctx.begin_element(None, ElementKind::Container).unwrap();
        assert_eq!(leaf(&mut ctx, Some(key)), moved);
        ctx.end_element().unwrap();
        let second = ctx.begin_element(None, ElementKind::Container).unwrap();
        let fresh = leaf(&mut ctx, None);
        assert_eq!(leaf(&mut ctx, None), tail, "second position still lines up");
        ctx.end_element().unwrap();
        ctx.end_element().unwrap();
        assert_eq!(ctx.end_frame(), Ok(0));

        assert_eq!(children(&ctx, first), vec![moved]);
        assert_eq!(children(&ctx, second), vec![fresh, tail]);
        assert_eq!(ctx.store().parent(moved).unwrap(), Some(first));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut ctx = LayoutContext::default();
        ctx.begin_frame().unwrap();
        let key = ElementKey::from_label("dup");
        ctx.begin_element(Some(key), ElementKind::Container).unwrap();
        ctx.end_element().unwrap();
        assert_eq!(
            ctx.begin_element(Some(key), ElementKind::Container),
            Err(LayoutError::DuplicateKey { key })
        );
    }

    #[test]
    fn unbalanced_scopes_are_reported() {
        let mut ctx = LayoutContext::default();
        assert_eq!(ctx.end_element(), Err(LayoutError::NoFrameOpen));
        ctx.begin_frame().unwrap();
        assert_eq!(ctx.end_element(), Err(LayoutError::UnbalancedScope { open: 0 }));
        ctx.begin_element(None, ElementKind::Container).unwrap();
        ctx.begin_element(None, ElementKind::Container).unwrap();
        assert_eq!(ctx.end_frame(), Err(LayoutError::UnbalancedScope { open: 2 }));
        assert!(ctx.frame_open());
        ctx.end_element().unwrap();
        ctx.end_element().unwrap();
        assert_eq!(ctx.end_frame(), Ok(0));
        assert_eq!(ctx.begin_frame(), Ok(()));
        assert_eq!(ctx.begin_frame(), Err(LayoutError::FrameInProgress));
    }

    #[test]
    fn leaves_reject_children() {
        let mut ctx = LayoutContext::default();
        ctx.begin_frame().unwrap();
        let text = ctx.begin_element(None, ElementKind::Text).unwrap();
        assert_eq!(
            ctx.begin_element(None, ElementKind::Container),
            Err(LayoutError::InvalidParent { id: text })
        );
    }

    #[test]
    fn element_limit_applies_to_frames() {
        let mut ctx = LayoutContext::new(LayoutConfig {
            max_elements: 1,
            ..LayoutConfig::DEFAULT
        });
        ctx.begin_frame().unwrap();
        ctx.begin_element(None, ElementKind::Container).unwrap();
        assert!(matches!(
            ctx.begin_element(None, ElementKind::Container),
            Err(LayoutError::CapacityExceeded { .. })
        ));
    }
}
