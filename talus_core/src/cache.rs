// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element layout result cache.
//!
//! There is at most one [`CacheEntry`] per element slot. An entry is keyed by
//! the border-box size the element was laid out at, its subtree version, and
//! the slot generation. A lookup hits only when all of them match. Sizes are
//! compared bit-for-bit so that a hit reproduces the previous pass exactly.
//!
//! Entries are overwritten in place on every solver run, so no eviction policy
//! is needed. A hit means the child geometry written by that run is still in
//! the store, since nothing else writes to it in between.

use alloc::vec::Vec;

/// Output of laying out an element's subtree, as seen from its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Border-box width the subtree was laid out at.
    pub width: f32,
    /// Border-box height the subtree was laid out at.
    pub height: f32,
    /// Extent of the content, including padding.
    pub content_width: f32,
    /// Extent of the content, including padding.
    pub content_height: f32,
}

/// A cached layout result for one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CacheEntry {
    /// Width the element was given (`f32::to_bits`).
    input_width: u32,
    /// Height the element was given (`f32::to_bits`).
    input_height: u32,
    /// Subtree version at the time of the run.
    version: u64,
    /// Slot generation at the time of the run.
    generation: u32,
    /// The result.
    output: Geometry,
}

impl CacheEntry {
    /// Creates an entry for a result computed at `output.width × output.height`.
    #[must_use]
    pub fn new(output: Geometry, version: u64, generation: u32) -> Self {
        Self {
            input_width: output.width.to_bits(),
            input_height: output.height.to_bits(),
            version,
            generation,
            output,
        }
    }

    /// Subtree version the entry was computed under.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The cached result.
    #[must_use]
    pub fn output(&self) -> Geometry {
        self.output
    }

    fn input_matches(&self, width: f32, height: f32, generation: u32) -> bool {
        self.input_width == width.to_bits()
            && self.input_height == height.to_bits()
            && self.generation == generation
    }
}

/// One-entry-per-element layout cache.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: Vec<Option<CacheEntry>>,
}

impl LayoutCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for slot `idx` if it was computed at exactly
    /// `width × height`, under `version`, for the same slot generation.
    #[must_use]
    pub fn lookup(
        &self,
        idx: u32,
        generation: u32,
        width: f32,
        height: f32,
        version: u64,
    ) -> Option<Geometry> {
        let entry = self.entries.get(idx as usize)?.as_ref()?;
        (entry.input_matches(width, height, generation) && entry.version == version)
            .then_some(entry.output)
    }

    /// Returns whether slot `idx` has an entry computed at `width × height`,
    /// regardless of version.
    ///
    /// Used to decide whether a clean child needs to be laid out again after
    /// its parent handed it a new size.
    #[must_use]
    pub fn has_input(&self, idx: u32, generation: u32, width: f32, height: f32) -> bool {
        self.entries
            .get(idx as usize)
            .and_then(Option::as_ref)
            .is_some_and(|e| e.input_matches(width, height, generation))
    }

    /// Stores `entry` for slot `idx`, replacing any previous entry.
    pub fn store(&mut self, idx: u32, entry: CacheEntry) {
        let i = idx as usize;
        if self.entries.len() <= i {
            self.entries.resize(i + 1, None);
        }
        self.entries[i] = Some(entry);
    }

    /// Drops the entry for slot `idx`.
    pub fn invalidate(&mut self, idx: u32) {
        if let Some(slot) = self.entries.get_mut(idx as usize) {
            *slot = None;
        }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of slots holding an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Returns whether no slot holds an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}
