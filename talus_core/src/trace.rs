// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layout passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! layout engine calls at each stage of a pass. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates the per-element
//!   [`CacheLookupEvent`] and the corresponding `TraceSink` method.

use crate::LayoutStats;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a layout pass starts.
#[derive(Clone, Copy, Debug)]
pub struct PassBeginEvent {
    /// Pass counter.
    pub pass: u64,
    /// Raw slot index of the layout root.
    pub root: u32,
    /// Viewport width.
    pub viewport_width: f32,
    /// Viewport height.
    pub viewport_height: f32,
}

/// Emitted once the dirty spines of a pass are known.
#[derive(Clone, Copy, Debug)]
pub struct SpinesEvent {
    /// Pass counter.
    pub pass: u64,
    /// Number of spines.
    pub count: u32,
    /// Elements on the spines, counting shared prefixes once.
    pub work_nodes: u32,
    /// Length of the longest spine.
    pub max_depth: u32,
}

/// Emitted after the solver lays out the children of one container.
#[derive(Clone, Copy, Debug)]
pub struct ContainerSolvedEvent {
    /// Pass counter.
    pub pass: u64,
    /// Raw slot index of the container.
    pub element: u32,
    /// Number of children laid out.
    pub children: u32,
    /// Number of flex lines.
    pub lines: u32,
    /// Border-box width of the container.
    pub width: f32,
    /// Border-box height of the container.
    pub height: f32,
    /// Content width after the solve.
    pub content_width: f32,
    /// Content height after the solve.
    pub content_height: f32,
}

/// Emitted for every layout cache lookup.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct CacheLookupEvent {
    /// Pass counter.
    pub pass: u64,
    /// Raw slot index of the element.
    pub element: u32,
    /// Whether the cached output was reused.
    pub hit: bool,
    /// Subtree version the lookup was keyed on.
    pub version: u64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the layout engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a pass starts.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called once the dirty spines of a pass are collected.
    fn on_spines(&mut self, e: &SpinesEvent) {
        _ = e;
    }

    /// Called after each container solve.
    fn on_container_solved(&mut self, e: &ContainerSolvedEvent) {
        _ = e;
    }

    /// Called when a pass completes successfully.
    fn on_pass_end(&mut self, stats: &LayoutStats) {
        _ = stats;
    }

    /// Called for every cache lookup (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_cache_lookup(&mut self, e: &CacheLookupEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SpinesEvent`].
    #[inline]
    pub fn spines(&mut self, e: &SpinesEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_spines(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ContainerSolvedEvent`].
    #[inline]
    pub fn container_solved(&mut self, e: &ContainerSolvedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_container_solved(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits the end-of-pass [`LayoutStats`].
    #[inline]
    pub fn pass_end(&mut self, stats: &LayoutStats) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_end(stats);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = stats;
        }
    }

    /// Emits a [`CacheLookupEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn cache_lookup(&mut self, e: &CacheLookupEvent) {
        if let Some(s) = &mut self.sink {
            s.on_cache_lookup(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
