// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout context: one element tree with its caches and scratch memory.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::LayoutError;
use crate::arena::FrameArena;
use crate::builder::FrameState;
use crate::cache::LayoutCache;
use crate::config::LayoutConfig;
use crate::element::{ContentId, ElementId, ElementKind, ElementStore, INVALID, SpineList};
use crate::measure::{ContentMeasure, NoContent};
use crate::style::LayoutStyle;

/// An element tree plus everything needed to lay it out incrementally.
///
/// A context is exclusively owned by one caller. Independent contexts share
/// no state and can be laid out on separate threads.
///
/// Trees are built either in immediate mode
/// ([`begin_frame`](Self::begin_frame) and friends) or in retained mode
/// ([`create_element`](Self::create_element)). Either way, inputs are
/// changed through [`set_style`](Self::set_style) and
/// [`set_content`](Self::set_content), which only invalidate layout when the
/// value actually changes.
pub struct LayoutContext {
    pub(crate) store: ElementStore,
    pub(crate) cache: LayoutCache,
    pub(crate) arena: FrameArena,
    pub(crate) config: LayoutConfig,
    pub(crate) measure: Box<dyn ContentMeasure>,
    pub(crate) spines: SpineList,
    pub(crate) visited: Vec<u32>,
    pub(crate) frame: FrameState,
    pub(crate) pass: u64,
}

impl core::fmt::Debug for LayoutContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("store", &self.store)
            .field("cache", &self.cache)
            .field("arena", &self.arena)
            .field("config", &self.config)
            .field("frame", &self.frame)
            .field("pass", &self.pass)
            .finish_non_exhaustive()
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new(LayoutConfig::DEFAULT)
    }
}

impl LayoutContext {
    /// Creates an empty context whose content leaves all measure as zero.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_measure(config, NoContent)
    }

    /// Creates an empty context with a content measurement collaborator.
    #[must_use]
    pub fn with_measure(config: LayoutConfig, measure: impl ContentMeasure + 'static) -> Self {
        Self {
            store: ElementStore::new(),
            cache: LayoutCache::new(),
            arena: FrameArena::new(config.arena_budget),
            config,
            measure: Box::new(measure),
            spines: SpineList::new(),
            visited: Vec::new(),
            frame: FrameState::default(),
            pass: 0,
        }
    }

    /// Replaces the measurement collaborator.
    ///
    /// Every content leaf is re-measured on the next pass.
    pub fn set_measure(&mut self, measure: impl ContentMeasure + 'static) {
        self.measure = Box::new(measure);
        for idx in 0..self.store.len {
            if self.store.live[idx as usize] && self.store.kind[idx as usize].is_content_leaf() {
                self.store.bump_version(idx);
            }
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// A change of `pixel_snapping` discards every cached result.
    pub fn set_config(&mut self, config: LayoutConfig) {
        if config.pixel_snapping != self.config.pixel_snapping {
            self.cache.clear();
            for idx in 0..self.store.len {
                if self.store.live[idx as usize] {
                    self.store.mark_dirty(idx);
                }
            }
        }
        self.arena.set_budget(config.arena_budget);
        self.config = config;
    }

    /// Read access to the element store.
    #[must_use]
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// Read access to the layout cache.
    #[must_use]
    pub fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    /// Read access to the frame arena.
    #[must_use]
    pub fn arena(&self) -> &FrameArena {
        &self.arena
    }

    /// Number of layout passes run so far.
    #[must_use]
    pub fn pass(&self) -> u64 {
        self.pass
    }

    // -- Retained-mode edits --

    /// Creates an element and appends it as the last child of `parent`, or
    /// as a new root when `parent` is `None`.
    ///
    /// Fails with [`LayoutError::InvalidParent`] if `parent` is a content
    /// leaf or is managed by immediate-mode frames, and with
    /// [`LayoutError::FrameInProgress`] while a frame is being built.
    pub fn create_element(
        &mut self,
        parent: Option<ElementId>,
        kind: ElementKind,
    ) -> Result<ElementId, LayoutError> {
        if self.frame.open {
            return Err(LayoutError::FrameInProgress);
        }
        if let Some(p) = parent {
            self.store.validate(p)?;
            let pi = p.idx as usize;
            if self.store.kind[pi].is_content_leaf() || self.store.seen_frame[pi] != 0 {
                return Err(LayoutError::InvalidParent { id: p });
            }
        }
        let idx = self
            .store
            .allocate(kind, None, self.config.max_elements)?;
        if let Some(p) = parent {
            self.store.append_child(p.idx, idx);
            self.store.bump_version(p.idx);
        }
        Ok(self.store.id_at(idx))
    }

    /// Sets the layout style of an element.
    ///
    /// Returns whether the style differed from the current one. Layout is
    /// invalidated only if it did.
    pub fn set_style(&mut self, id: ElementId, style: &LayoutStyle) -> Result<bool, LayoutError> {
        self.store.validate(id)?;
        Ok(self.store.set_style(id.idx, style))
    }

    /// Sets the content reference of an element.
    ///
    /// Returns whether it differed from the current one.
    pub fn set_content(
        &mut self,
        id: ElementId,
        content: Option<ContentId>,
    ) -> Result<bool, LayoutError> {
        self.store.validate(id)?;
        Ok(self.store.set_content(id.idx, content))
    }

    /// Marks an element and its ancestors as needing layout without changing
    /// its version.
    pub fn mark_dirty(&mut self, id: ElementId) -> Result<(), LayoutError> {
        self.store.validate(id)?;
        self.store.mark_dirty(id.idx);
        Ok(())
    }

    /// Gives an element a new version, invalidating every cached result that
    /// includes it.
    ///
    /// Use this when caller-owned content behind a [`ContentId`] changed.
    pub fn bump_version(&mut self, id: ElementId) -> Result<(), LayoutError> {
        self.store.validate(id)?;
        self.store.bump_version(id.idx);
        Ok(())
    }

    /// Returns the root of the tree containing `id`.
    pub fn root_of(&self, id: ElementId) -> Result<ElementId, LayoutError> {
        self.store.validate(id)?;
        let mut idx = id.idx;
        while self.store.parent[idx as usize] != INVALID {
            idx = self.store.parent[idx as usize];
        }
        Ok(self.store.id_at(idx))
    }
}
